use crate::cli::context::{field_names, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::EntryService;
use crate::errors::LaundryError;
use crate::record::{wire, RecordField};
use crate::session::{EditTarget, Key};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "select",
            "Point the keypad at a field",
            "select <coin|hopper|soap|vending|drop1|code|drop2>",
            cmd_select,
        ),
        CommandEntry::new(
            "del",
            "Remove the last character of the selected field",
            "del",
            cmd_delete,
        ),
        CommandEntry::new(
            "clr",
            "Discard the whole form, including an edit in progress",
            "clr",
            cmd_clear,
        ),
        CommandEntry::new(
            "date",
            "File the next save under another day",
            "date <M/D/YYYY|today>",
            cmd_date,
        ),
        CommandEntry::new("form", "Show the form being filled in", "form", cmd_form),
        CommandEntry::new(
            "save",
            "Store the form as a new record or apply the edit",
            "save",
            cmd_save,
        ),
        CommandEntry::new(
            "edit",
            "Load a record from the log into the form",
            "edit <row>",
            cmd_edit,
        ),
    ]
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = args.join(" ");
    if name.trim().is_empty() {
        return Err(CommandError::InvalidArguments(format!(
            "usage: select <field> (one of: {})",
            field_names()
        )));
    }
    let field: RecordField = name.parse()?;
    context.session.select_field(field);
    output::info(format!(
        "Selected {}: {}",
        field.label(),
        context.session.value(field)
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if context.session.selected_field().is_none() {
        return Err(CommandError::InvalidArguments(
            "No field selected. Use `select <field>` first.".into(),
        ));
    }
    context.session.press(Key::Delete);
    context.print_selected_value();
    Ok(())
}

fn cmd_clear(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let was_editing = context.session.is_editing();
    context.session.press(Key::Clear);
    if was_editing {
        output::info("Form cleared; edit cancelled.");
    } else {
        output::info("Form cleared.");
    }
    Ok(())
}

fn cmd_date(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(input) = args.first() else {
        return Err(CommandError::InvalidArguments(
            "usage: date <M/D/YYYY|today>".into(),
        ));
    };
    let date = if input.eq_ignore_ascii_case("today") {
        context.clock.today()
    } else {
        wire::parse_date(input).ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{input}` is not a date (use M/D/YYYY)"))
        })?
    };
    context.session.set_date(date);
    output::info(format!("Next save is filed under {}.", wire::format_date(date)));
    Ok(())
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = &context.session;
    let heading = match session.edit_target() {
        EditTarget::New => "New entry".to_string(),
        EditTarget::Existing { time, .. } => {
            let date = session.date().unwrap_or_else(|| context.clock.today());
            format!("Editing {}", wire::format_timestamp(date, time))
        }
    };
    output::section(heading);
    for field in RecordField::ALL {
        let marker = if session.selected_field() == Some(field) {
            ">"
        } else {
            " "
        };
        output::info(format!(
            "{marker} {:<18} {}",
            field.label(),
            session.value(field)
        ));
    }
    let date = session
        .date()
        .map(wire::format_date)
        .unwrap_or_else(|| "today".into());
    output::info(format!("  {:<18} {}", "Filed under", date));
    output::info(format!(
        "  {:<18} {}{:.2}",
        "Total",
        context.config.currency_symbol,
        session.values().total()
    ));
    Ok(())
}

fn cmd_save(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let editing = context.session.is_editing();
    let id = match EntryService::save(
        &mut context.store,
        &mut context.session,
        context.clock.as_ref(),
    ) {
        Ok(id) => id,
        Err(LaundryError::Validation(_)) => {
            output::warning("Nothing to save. Select a field and type an amount first.");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };
    let row = context.store.position(id).map_or(0, |index| index + 1);
    if editing {
        output::success(format!("Record updated (row {row})."));
    } else {
        output::success(format!("Record saved (row {row})."));
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let row = args
        .first()
        .and_then(|value| value.parse::<usize>().ok())
        .filter(|row| *row > 0)
        .ok_or_else(|| CommandError::InvalidArguments("usage: edit <row> (see `log`)".into()))?;
    EntryService::begin_edit(&context.store, &mut context.session, row - 1)?;
    output::info(format!("Editing row {row}. Change fields, then `save`."));
    cmd_form(context, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::context::CliMode;
    use crate::config::Config;
    use crate::time::FixedClock;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::{tempdir, TempDir};

    fn shell() -> (TempDir, ShellContext) {
        let dir = tempdir().unwrap();
        let config = Config {
            seed_when_empty: false,
            ..Config::default()
        };
        crate::config::ConfigManager::with_base_dir(dir.path().to_path_buf())
            .unwrap()
            .save(&config)
            .unwrap();
        let clock = FixedClock::at(
            NaiveDate::from_ymd_opt(2025, 4, 5).unwrap(),
            NaiveTime::from_hms_opt(22, 35, 0).unwrap(),
        );
        let context =
            ShellContext::open(CliMode::Script, dir.path().to_path_buf(), Box::new(clock))
                .unwrap();
        (dir, context)
    }

    #[test]
    fn select_rejects_unknown_fields() {
        let (_dir, mut context) = shell();
        let err = cmd_select(&mut context, &["tips"]).unwrap_err();
        assert!(matches!(
            err,
            CommandError::Core(LaundryError::UnknownField(_))
        ));
        assert!(context.session.selected_field().is_none());
    }

    #[test]
    fn select_accepts_multi_word_labels() {
        let (_dir, mut context) = shell();
        cmd_select(&mut context, &["Drop", "Off", "Code"]).unwrap();
        assert_eq!(
            context.session.selected_field(),
            Some(RecordField::DropOffCode)
        );
    }

    #[test]
    fn save_then_edit_round_trip() {
        let (_dir, mut context) = shell();
        cmd_select(&mut context, &["coin"]).unwrap();
        context.session.press(Key::Digit('5'));
        cmd_save(&mut context, &[]).unwrap();
        assert_eq!(context.store.len(), 1);

        cmd_edit(&mut context, &["1"]).unwrap();
        assert!(context.session.is_editing());
        cmd_select(&mut context, &["coin"]).unwrap();
        context.session.press(Key::Digit('0'));
        cmd_save(&mut context, &[]).unwrap();

        assert_eq!(context.store.len(), 1);
        let record = context.store.get(0).unwrap();
        assert_eq!(record.values.get(RecordField::Coin), Some("50"));
    }

    #[test]
    fn empty_save_keeps_the_log_unchanged() {
        let (_dir, mut context) = shell();
        cmd_save(&mut context, &[]).unwrap();
        assert!(context.store.is_empty());
    }

    #[test]
    fn edit_requires_a_row_in_range() {
        let (_dir, mut context) = shell();
        assert!(matches!(
            cmd_edit(&mut context, &["0"]),
            Err(CommandError::InvalidArguments(_))
        ));
        assert!(matches!(
            cmd_edit(&mut context, &["3"]),
            Err(CommandError::Core(LaundryError::IndexOutOfRange { .. }))
        ));
    }

    #[test]
    fn date_sets_the_filing_day() {
        let (_dir, mut context) = shell();
        cmd_date(&mut context, &["4/1/2025"]).unwrap();
        assert_eq!(
            context.session.date(),
            NaiveDate::from_ymd_opt(2025, 4, 1)
        );
        cmd_date(&mut context, &["4/5/25"]).unwrap();
        assert_eq!(
            context.session.date(),
            NaiveDate::from_ymd_opt(2025, 4, 5)
        );
        assert!(cmd_date(&mut context, &["someday"]).is_err());
        assert!(cmd_date(&mut context, &["4/5/0999"]).is_err());
    }
}
