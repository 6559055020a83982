use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;
use crate::core::Period;
use crate::record::wire;

const USAGE: &str = "usage: config [show|set <key> <value>|reset]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change shop preferences",
        "config [show|set <storage_key|seed_when_empty|seed_start|default_period|currency_symbol> <value>|reset]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(
                    "usage: config set <key> <value>".into(),
                ));
            }
            let value = args[2..].join(" ");
            let mut updated = context.config.clone();
            apply_setting(&mut updated, args[1], value.trim())?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            output::success(format!("{} updated.", args[1]));
            if args[1].eq_ignore_ascii_case("storage_key") {
                output::hint("The new key takes effect the next time the shell starts.");
            }
            Ok(())
        }
        "reset" => {
            let defaults = Config::default();
            context.config_manager.save(&defaults)?;
            context.config = defaults;
            output::success("Preferences reset to defaults.");
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(USAGE.into())),
    }
}

fn show_config(context: &ShellContext) {
    let config = &context.config;
    output::section("Configuration");
    output::info(format!("  storage_key     : {}", config.storage_key));
    output::info(format!("  seed_when_empty : {}", config.seed_when_empty));
    output::info(format!(
        "  seed_start      : {}",
        wire::format_date(config.seed_start)
    ));
    output::info(format!("  default_period  : {}", config.default_period));
    output::info(format!("  currency_symbol : {}", config.currency_symbol));
    output::info(format!(
        "  file            : {}",
        context.config_manager.path().display()
    ));
}

fn apply_setting(config: &mut Config, key: &str, value: &str) -> Result<(), CommandError> {
    match key.to_lowercase().as_str() {
        "storage_key" => {
            if value.is_empty() {
                return Err(CommandError::InvalidArguments(
                    "storage_key cannot be empty".into(),
                ));
            }
            config.storage_key = value.to_string();
        }
        "seed_when_empty" => {
            config.seed_when_empty = match value.to_lowercase().as_str() {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => {
                    return Err(CommandError::InvalidArguments(format!(
                        "expected on or off, got `{other}`"
                    )))
                }
            };
        }
        "seed_start" => {
            config.seed_start = wire::parse_date(value).ok_or_else(|| {
                CommandError::InvalidArguments(format!("`{value}` is not a date (use M/D/YYYY)"))
            })?;
        }
        "default_period" => {
            config.default_period = value.parse::<Period>()?;
        }
        "currency_symbol" => {
            config.currency_symbol = value.to_string();
        }
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown setting `{other}`"
            )))
        }
    }
    Ok(())
}
