//! Shell state, dispatch, and error reporting.

use std::{io, path::PathBuf};

use strsim::levenshtein;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::{Config, ConfigManager},
    core::RecordStore,
    errors::LaundryError,
    record::RecordField,
    seed,
    session::{InputSession, Key},
    storage::JsonFileStorage,
    time::{Clock, SystemClock},
    utils::paths,
};

use super::{commands, output, registry::CommandRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Core(#[from] LaundryError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that end the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LaundryError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Readline(#[from] rustyline::error::ReadlineError),
}

pub type CommandResult = Result<(), CommandError>;

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: RecordStore,
    pub session: InputSession,
    pub config: Config,
    pub config_manager: ConfigManager,
    pub clock: Box<dyn Clock>,
    pub base_dir: PathBuf,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::open(mode, paths::app_data_dir(), Box::new(SystemClock))
    }

    /// Opens the shell against `base_dir`, loading config and the record log
    /// and seeding sample entries when nothing usable is stored.
    pub fn open(mode: CliMode, base_dir: PathBuf, clock: Box<dyn Clock>) -> Result<Self, CliError> {
        let config_manager = ConfigManager::with_base_dir(base_dir.clone())?;
        let config = config_manager.load()?;
        let storage = JsonFileStorage::new(paths::data_dir_in(&base_dir))?;
        let mut store = RecordStore::new(Box::new(storage), config.storage_key.clone());

        let report = store.load();
        for warning in &report.warnings {
            output::warning(warning);
        }
        if config.seed_when_empty && report.nothing_stored() {
            let samples = seed::sample_records(config.seed_start, clock.today());
            if store.seed_if_empty(samples)? {
                info!(records = store.len(), "sample entries generated");
            }
        }

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(Self {
            mode,
            registry,
            store,
            session: InputSession::new(),
            config,
            config_manager,
            clock,
            base_dir,
            running: true,
        })
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    /// Routes one tokenised line. Keypad tokens (`50`, `.`, `12.5`) are typed
    /// into the selected field; anything else is looked up as a command.
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if is_keypad_input(raw) {
            self.type_keys(raw)?;
            return Ok(LoopControl::Continue);
        }
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    fn type_keys(&mut self, input: &str) -> CommandResult {
        if self.session.selected_field().is_none() {
            return Err(CommandError::InvalidArguments(
                "No field selected. Use `select <field>` first.".into(),
            ));
        }
        for ch in input.chars() {
            let key = if ch == '.' {
                Key::DecimalPoint
            } else {
                Key::Digit(ch)
            };
            self.session.press(key);
        }
        self.print_selected_value();
        Ok(())
    }

    pub(crate) fn print_selected_value(&self) {
        if let Some(field) = self.session.selected_field() {
            output::info(format!("{}: {}", field.label(), self.session.value(field)));
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                output::hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Core(LaundryError::UnknownField(name)) => {
                output::error(format!("Unknown field `{name}`."));
                output::hint(format!("Fields: {}", field_names()));
                Ok(())
            }
            other => {
                warn!(error = %other, "command failed");
                output::error(other);
                Ok(())
            }
        }
    }

    pub fn prompt(&self) -> String {
        let mode = if self.session.is_editing() {
            "edit"
        } else {
            "new"
        };
        match self.session.selected_field() {
            Some(field) => format!("laundry[{mode}:{}]> ", field.short_name()),
            None => format!("laundry[{mode}]> "),
        }
    }
}

pub(crate) fn field_names() -> String {
    RecordField::ALL
        .iter()
        .map(|field| field.short_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn is_keypad_input(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|ch| ch.is_ascii_digit() || ch == '.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::FixedClock;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    fn context(base: PathBuf) -> ShellContext {
        let clock = FixedClock::at(
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            NaiveTime::from_hms_opt(10, 15, 0).unwrap(),
        );
        ShellContext::open(CliMode::Script, base, Box::new(clock)).expect("open shell")
    }

    #[test]
    fn fresh_directory_is_seeded_with_samples() {
        let dir = tempdir().unwrap();
        let shell = context(dir.path().to_path_buf());
        assert!(!shell.store.is_empty());
    }

    #[test]
    fn existing_log_with_mixed_cells_is_not_replaced_by_samples() {
        let dir = tempdir().unwrap();
        let data = paths::data_dir_in(dir.path());
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(
            data.join("laundry_data.json"),
            r#"[{"Date":"4/2/2025 09:00 AM","Coin":"5"},{"Date":"4/3/2025 10:00 AM","Coin":50}]"#,
        )
        .unwrap();

        let shell = context(dir.path().to_path_buf());
        assert_eq!(shell.store.len(), 2);
    }

    #[test]
    fn undecodable_log_is_kept_aside_before_seeding() {
        let dir = tempdir().unwrap();
        let data = paths::data_dir_in(dir.path());
        std::fs::create_dir_all(&data).unwrap();
        std::fs::write(data.join("laundry_data.json"), "[{\"Date\": ").unwrap();

        let shell = context(dir.path().to_path_buf());
        assert!(!shell.store.is_empty());
        let kept = std::fs::read_to_string(data.join("laundry_data_unreadable.json")).unwrap();
        assert_eq!(kept, "[{\"Date\": ");
    }

    #[test]
    fn keypad_tokens_type_into_the_selected_field() {
        let dir = tempdir().unwrap();
        let mut shell = context(dir.path().to_path_buf());
        shell.session.select_field(RecordField::Coin);
        shell.dispatch("12.5", "12.5", &[]).unwrap();
        shell.dispatch(".", ".", &[]).unwrap();
        assert_eq!(shell.session.value(RecordField::Coin), "12.5");
    }

    #[test]
    fn keypad_tokens_without_selection_are_rejected() {
        let dir = tempdir().unwrap();
        let mut shell = context(dir.path().to_path_buf());
        let err = shell.dispatch("5", "5", &[]).unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn prompt_reflects_selection_and_edit_mode() {
        let dir = tempdir().unwrap();
        let mut shell = context(dir.path().to_path_buf());
        assert_eq!(shell.prompt(), "laundry[new]> ");
        shell.session.select_field(RecordField::Soap);
        assert_eq!(shell.prompt(), "laundry[new:soap]> ");
    }

    #[test]
    fn unknown_commands_continue_the_loop() {
        let dir = tempdir().unwrap();
        let mut shell = context(dir.path().to_path_buf());
        let control = shell.dispatch("sael", "sael", &[]).unwrap();
        assert_eq!(control, LoopControl::Continue);
    }
}
