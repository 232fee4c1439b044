//! Non-interactive command line front end: load provider event files, run one
//! forecast, and render either the sortable table or the weekly calendar view.

pub mod output;
pub mod table;

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::SettingsManager;
use crate::errors::ForecastError;
use crate::event::{date::parse_all_day_date, load_events, RawEvent};
use crate::forecast::calendar::{build_weeks, BandScale, ScaleStrategy, WeekStart};
use crate::forecast::engine::{run_forecast, EntryKind, ForecastEntry, ForecastOptions};
use crate::forecast::view::{filter_entries, sort_entries, SortDirection, SortKey};
use crate::forecast::DateWindow;

#[derive(Parser)]
#[command(name = "fincal", version, about = "Calendar-driven balance forecasting")]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a forecast over credit and debit event files.
    Forecast(ForecastArgs),
    /// Show or update the persisted defaults.
    Config(ConfigArgs),
}

#[derive(Args)]
struct ForecastArgs {
    /// JSON file with the income calendar's events.
    #[arg(long, value_name = "FILE")]
    credit: PathBuf,
    /// JSON file with the expense calendar's events.
    #[arg(long, value_name = "FILE")]
    debit: PathBuf,
    /// Starting balance; falls back to the saved default.
    #[arg(long)]
    balance: Option<f64>,
    /// First forecast day; defaults to today or tomorrow per settings.
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last forecast day; falls back to the saved default.
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Render the weekly calendar view instead of the table.
    #[arg(long)]
    calendar: bool,
    /// Table sort column; omitted means date order.
    #[arg(long, value_enum)]
    sort: Option<SortColumn>,
    /// Table sort direction.
    #[arg(long, value_enum)]
    direction: Option<Direction>,
    /// Case-insensitive table filter.
    #[arg(long)]
    filter: Option<String>,
    /// Week start day for the calendar view.
    #[arg(long, value_enum)]
    week_start: Option<WeekStartArg>,
    /// Y-axis scale strategy for the calendar view.
    #[arg(long, value_enum)]
    scale: Option<ScaleArg>,
}

#[derive(Args)]
struct ConfigArgs {
    /// Save a new default starting balance.
    #[arg(long)]
    balance: Option<f64>,
    /// Save a new default end date.
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Save the default week start day.
    #[arg(long, value_enum)]
    week_start: Option<WeekStartArg>,
    /// Save the default scale strategy.
    #[arg(long, value_enum)]
    scale: Option<ScaleArg>,
    /// Save whether forecasts start from tomorrow.
    #[arg(long)]
    start_from_tomorrow: Option<bool>,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortColumn {
    When,
    Summary,
    Amount,
    Balance,
}

impl From<SortColumn> for SortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::When => SortKey::When,
            SortColumn::Summary => SortKey::Summary,
            SortColumn::Amount => SortKey::Amount,
            SortColumn::Balance => SortKey::Balance,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum Direction {
    #[default]
    Asc,
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortDirection::Asc,
            Direction::Desc => SortDirection::Desc,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum WeekStartArg {
    Sunday,
    Monday,
}

impl From<WeekStartArg> for WeekStart {
    fn from(arg: WeekStartArg) -> Self {
        match arg {
            WeekStartArg::Sunday => WeekStart::Sunday,
            WeekStartArg::Monday => WeekStart::Monday,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ScaleArg {
    Global,
    Smoothed,
}

impl From<ScaleArg> for ScaleStrategy {
    fn from(arg: ScaleArg) -> Self {
        match arg {
            ScaleArg::Global => ScaleStrategy::Global,
            ScaleArg::Smoothed => ScaleStrategy::Smoothed,
        }
    }
}

/// Parses arguments and dispatches the selected command.
pub fn run() -> Result<(), ForecastError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Forecast(args) => forecast_command(args),
        Command::Config(args) => config_command(args),
    }
}

fn forecast_command(args: ForecastArgs) -> Result<(), ForecastError> {
    let settings = SettingsManager::new()?.load()?;

    let starting_balance = args.balance.unwrap_or(settings.starting_balance);
    let end = args.end.or(settings.end_date).ok_or_else(|| {
        ForecastError::InvalidInput("an end date is required (--end or a saved default)".into())
    })?;
    let window = match args.start {
        Some(start) => DateWindow::new(start, end)?,
        None => DateWindow::from_reference(
            Local::now().date_naive(),
            end,
            settings.start_from_tomorrow,
        )?,
    };

    let credit_events = clip_to_window_end(load_events(&args.credit)?, window);
    let debit_events = clip_to_window_end(load_events(&args.debit)?, window);
    let entries = run_forecast(
        &credit_events,
        &debit_events,
        ForecastOptions::new(starting_balance, window),
    )?;

    if args.calendar {
        let week_start = args
            .week_start
            .map(WeekStart::from)
            .unwrap_or(settings.week_start);
        let strategy = args.scale.map(ScaleStrategy::from).unwrap_or(settings.scale);
        print_calendar(&entries, week_start, strategy, window);
    } else {
        let filtered = match &args.filter {
            Some(query) => filter_entries(&entries, query),
            None => entries,
        };
        let sorted = sort_entries(
            &filtered,
            args.sort.map(SortKey::from),
            args.direction.unwrap_or_default().into(),
        );
        output::info(table::render_forecast_table(&sorted));
    }
    Ok(())
}

/// Upper-bound clip standing in for a provider's date-range query: the
/// transaction builder only re-checks the lower bound, so events dated past
/// the window end must not reach the engine. Events without a parseable date
/// pass through and are dropped later with diagnostics.
fn clip_to_window_end(events: Vec<RawEvent>, window: DateWindow) -> Vec<RawEvent> {
    events
        .into_iter()
        .filter(|event| match parse_all_day_date(event.start_date()) {
            Some(when) => when <= window.end,
            None => true,
        })
        .collect()
}

fn print_calendar(
    entries: &[ForecastEntry],
    week_start: WeekStart,
    strategy: ScaleStrategy,
    window: DateWindow,
) {
    let weeks = build_weeks(entries, week_start, window);
    let scale = BandScale::new(entries, strategy, window);
    for week in &weeks {
        let bounds = scale.bounds_for(week);
        output::section(format!(
            "{} - {}  scale {:.2}..{:.2}, zero at {:.0}%, start ${:.2}",
            week.start.format("%b %d"),
            week.end.format("%b %d, %Y"),
            bounds.min,
            bounds.max,
            bounds.zero_fraction() * 100.0,
            week.start_balance,
        ));
        for (day, day_balance) in week.days.iter().zip(week.day_end_balances()) {
            let on_day = week.entries_on(*day);
            if on_day.is_empty() {
                continue;
            }
            for entry in on_day {
                let sign = if entry.kind == EntryKind::Debit { '-' } else { '+' };
                output::info(format!(
                    "  {}  {sign}${:.2}  {}",
                    entry.when.format("%a %b %d"),
                    entry.display_amount,
                    entry.summary,
                ));
            }
            if let Some(balance) = day_balance {
                output::info(format!(
                    "  {}  end of day ${balance:.2}",
                    day.format("%a %b %d")
                ));
            }
        }
    }
}

fn config_command(args: ConfigArgs) -> Result<(), ForecastError> {
    let manager = SettingsManager::new()?;
    let mut settings = manager.load()?;
    let mut changed = false;

    if let Some(balance) = args.balance {
        settings.starting_balance = balance;
        changed = true;
    }
    if let Some(end) = args.end {
        settings.end_date = Some(end);
        changed = true;
    }
    if let Some(week_start) = args.week_start {
        settings.week_start = week_start.into();
        changed = true;
    }
    if let Some(scale) = args.scale {
        settings.scale = scale.into();
        changed = true;
    }
    if let Some(start_from_tomorrow) = args.start_from_tomorrow {
        settings.start_from_tomorrow = start_from_tomorrow;
        changed = true;
    }

    if changed {
        manager.save(&settings)?;
        output::info(format!("Saved {}", manager.path().display()));
    }

    output::section("Forecast defaults");
    output::info(format!("starting balance     ${:.2}", settings.starting_balance));
    output::info(format!(
        "end date             {}",
        settings
            .end_date
            .map(|date| date.to_string())
            .unwrap_or_else(|| "unset".into())
    ));
    output::info(format!("week start           {:?}", settings.week_start));
    output::info(format!("scale                {:?}", settings.scale));
    output::info(format!("start from tomorrow  {}", settings.start_from_tomorrow));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, m, d).unwrap()
    }

    #[test]
    fn clip_drops_only_events_past_the_window_end() {
        let window = DateWindow::new(day(9, 1), day(9, 30)).expect("window");
        let events = vec![
            RawEvent::all_day("on-end", "$10 OnEnd", day(9, 30)),
            RawEvent::all_day("after-end", "$10 AfterEnd", day(10, 1)),
        ];
        let clipped = clip_to_window_end(events, window);
        assert_eq!(clipped.len(), 1);
        assert_eq!(clipped[0].id, "on-end");
    }

    #[test]
    fn clip_keeps_events_without_a_parseable_date() {
        let window = DateWindow::new(day(9, 1), day(9, 30)).expect("window");
        let timed = RawEvent {
            id: "timed".into(),
            summary: Some("$50 Dinner".into()),
            start: None,
        };
        let clipped = clip_to_window_end(vec![timed], window);
        assert_eq!(clipped.len(), 1);
    }
}
