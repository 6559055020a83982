use std::path::PathBuf;

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::table::{Table, TableColumn};
use crate::core::services::AggregationEngine;
use crate::core::Period;
use crate::export;
use crate::record::{wire, RecordField};
use crate::utils::paths;

const DEFAULT_LOG_LIMIT: usize = 20;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "log",
            "List records, newest first",
            "log [limit|all]",
            cmd_log,
        ),
        CommandEntry::new(
            "sales",
            "Daily totals and summary for a trailing window",
            "sales [week|month|year]",
            cmd_sales,
        ),
        CommandEntry::new(
            "export",
            "Write the record log to a CSV file",
            "export [path]",
            cmd_export,
        ),
    ]
}

fn cmd_log(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let limit = match args.first() {
        None => DEFAULT_LOG_LIMIT,
        Some(value) if value.eq_ignore_ascii_case("all") => usize::MAX,
        Some(value) => value.parse::<usize>().map_err(|_| {
            CommandError::InvalidArguments("usage: log [limit|all]".into())
        })?,
    };

    let records = context.store.all();
    if records.is_empty() {
        output::info("No records yet.");
        return Ok(());
    }

    let mut columns = vec![TableColumn::right("#"), TableColumn::left("Date")];
    columns.extend(
        RecordField::ALL
            .iter()
            .map(|field| TableColumn::right(field.short_name())),
    );
    columns.push(TableColumn::right("Total"));

    let mut table = Table::new(columns);
    for (index, record) in records.iter().take(limit).enumerate() {
        let mut row = vec![
            (index + 1).to_string(),
            wire::format_timestamp(record.date, record.time),
        ];
        row.extend(
            RecordField::ALL
                .iter()
                .map(|field| record.values.get(*field).unwrap_or_default().to_string()),
        );
        row.push(format!("{:.2}", record.total()));
        table.push(row);
    }

    output::section("Records");
    output::info(table.render());
    if records.len() > limit {
        output::hint(format!(
            "Showing {limit} of {} records. Use `log all` to see everything.",
            records.len()
        ));
    }
    Ok(())
}

fn cmd_sales(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let period = match args.first() {
        Some(value) => value.parse::<Period>()?,
        None => context.config.default_period,
    };
    let engine = AggregationEngine::new(context.store.all(), context.clock.as_ref());
    let totals = engine.daily_totals(period);
    let summary = engine.summary(period);
    let symbol = &context.config.currency_symbol;

    output::section(format!("Sales, {}", period.label()));
    if totals.is_empty() {
        output::info("No sales in this window.");
    } else {
        let mut table = Table::new(vec![TableColumn::left("Day"), TableColumn::right("Total")]);
        for day in &totals {
            table.push(vec![
                day.display_date.clone(),
                format!("{symbol}{:.2}", day.total),
            ]);
        }
        output::info(table.render());
    }
    output::info(format!("Total sales    : {symbol}{:.2}", summary.total));
    output::info(format!("Days with sales: {}", summary.days));
    match summary.average_per_day {
        Some(average) => output::info(format!("Average per day: {symbol}{average:.2}")),
        None => output::info("Average per day: n/a"),
    }
    Ok(())
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(path) => PathBuf::from(path),
        None => {
            let stamp = context.clock.now().format("%Y%m%d_%H%M");
            paths::export_dir_in(&context.base_dir).join(format!("laundry_records_{stamp}.csv"))
        }
    };
    export::export_csv(context.store.all(), &path)?;
    output::success(format!(
        "Exported {} records to {}",
        context.store.len(),
        path.display()
    ));
    Ok(())
}
