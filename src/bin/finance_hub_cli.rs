use std::process::ExitCode;

use colored::Colorize;
use uuid::Uuid;

use finance_hub::api::{HttpApiClient, Session};
use finance_hub::config::{Config, ConfigManager};
use finance_hub::core::services::{
    BudgetService, CategoryService, ChartService, DashboardService, HistoryService,
};
use finance_hub::core::KindFilter;
use finance_hub::domain::{parse_day, DateFilter, DateRange, Period};
use finance_hub::errors::{FinanceError, Result};
use finance_hub::init;
use finance_hub::utils::build_info;
use finance_hub::utils::format::{format_currency, format_short_date};
use finance_hub::utils::time::{Clock, SystemClock};

const USAGE: &str = "\
Usage: finance_hub_cli <USER_ID> [--from YYYY-MM-DD] [--to YYYY-MM-DD]

Prints the dashboard report for a user of the Finance Hub backend.

Options:
  --from <DATE>   First day of the reporting window
  --to <DATE>     Last day of the reporting window
  -h, --help      Show this message
  -V, --version   Show build information

The backend address and token come from config.json in $FINANCE_HUB_HOME
(default ~/.finance_hub) and the FINANCE_HUB_* environment variables.";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    Report {
        user_id: Uuid,
        from: Option<String>,
        to: Option<String>,
    },
}

fn parse_args(args: &[String]) -> Result<Command> {
    let mut user_id = None;
    let mut from = None;
    let mut to = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "--from" | "--to" => {
                let value = iter
                    .next()
                    .ok_or_else(|| FinanceError::InvalidInput(format!("{arg} needs a date")))?;
                if arg == "--from" {
                    from = Some(value.clone());
                } else {
                    to = Some(value.clone());
                }
            }
            other if user_id.is_none() => {
                let id = Uuid::parse_str(other).map_err(|_| {
                    FinanceError::InvalidInput(format!("`{other}` is not a user id"))
                })?;
                user_id = Some(id);
            }
            other => {
                return Err(FinanceError::InvalidInput(format!(
                    "unexpected argument `{other}`"
                )))
            }
        }
    }
    let user_id = user_id.ok_or_else(|| FinanceError::InvalidInput("missing user id".into()))?;
    Ok(Command::Report { user_id, from, to })
}

fn run_report(user_id: Uuid, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let config: Config = ConfigManager::new().load_effective()?;
    let client = HttpApiClient::new(&config.api, config.auth.token.clone())?;
    let session = Session::new(user_id, config.auth.token.clone());
    let clock = SystemClock;
    let currency = config.display.currency.as_str();

    let from = from.map(parse_day).transpose()?;
    let to = to.map(parse_day).transpose()?;
    let window = match (from, to) {
        (Some(start), Some(end)) => DateRange::new(start, end)?,
        (Some(start), None) => DateRange::new(start, clock.today())?,
        (None, Some(end)) => DateRange::month_of(end),
        (None, None) => DateRange::current_month(clock.today()),
    };

    let snapshot =
        DashboardService::load(&client, &session, config.display.balance_history_points)?;
    println!("{}", "Dashboard".bold());
    for (label, value) in snapshot.cards(currency) {
        println!("  {label:<14}{value}");
    }

    let charts = ChartService::load(&client, &session, &config.display)?;
    println!("\n{}", "Top expense categories".bold());
    if charts.expense_slices.is_empty() {
        println!("  {}", "no expenses yet".dimmed());
    }
    for slice in &charts.expense_slices {
        println!(
            "  {:<20}{}",
            slice.category_name,
            format_currency(slice.total_amount, currency)
        );
    }

    let categories = CategoryService::list(&client, &session)?;
    let comparison =
        BudgetService::compare(&client, &session, &categories, Period::Range(window))?;
    println!(
        "\n{} {} - {}",
        "Budget".bold(),
        format_short_date(window.start),
        format_short_date(window.end)
    );
    println!(
        "  {:<14}{} predicted, {} actual",
        "Income",
        format_currency(comparison.predicted_income, currency),
        format_currency(comparison.actual_income, currency).green()
    );
    println!(
        "  {:<14}{} predicted, {} actual",
        "Expenses",
        format_currency(comparison.predicted_expenses, currency),
        format_currency(comparison.actual_expenses, currency).red()
    );

    let history = HistoryService::load(
        &client,
        &session,
        DateFilter::from(window),
        KindFilter::All,
        &clock,
    )?;
    let recurring = history
        .entries
        .iter()
        .filter(|entry| entry.source.is_recurring())
        .count();
    println!(
        "\n{} {} entries ({} recurring)",
        "History".bold(),
        history.entries.len(),
        recurring
    );
    if history.truncated {
        println!("  {}", "recurring entries were truncated".yellow());
    }
    Ok(())
}

fn main() -> ExitCode {
    init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("Error: {err}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Help => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        Command::Version => {
            println!("finance_hub_cli {}", build_info::current().summary());
            ExitCode::SUCCESS
        }
        Command::Report { user_id, from, to } => {
            match run_report(user_id, from.as_deref(), to.as_deref()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("Error: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
