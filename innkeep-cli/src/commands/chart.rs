//! Chart command implementation.
//!
//! The table form prints one line per room and one column per day. A booked
//! night shows `#<id>` on the arrival day and `~` after it; checked-in
//! stays carry a trailing `*`. Free nights are empty cells, which the
//! table form shows as `-`.

use crate::error::CliError;
use crate::output::{resolve_format, FormatArg, Listing};
use crate::utils::{open_desk, GlobalOptions};
use chrono::{Local, NaiveDate};
use clap::Args;
use innkeep::config::MAX_CHART_DAYS;
use innkeep::{DateRange, ReservationStatus, TapeCell, TapeChart};

/// Show the tape chart of bookings per room and day.
#[derive(Args)]
pub struct ChartCommand {
    /// First day (defaults to today)
    #[arg(long, value_name = "DATE")]
    pub from: Option<NaiveDate>,

    /// Number of days (defaults to `chart_days` from the configuration)
    #[arg(long, value_name = "DAYS", conflicts_with = "to")]
    pub days: Option<u32>,

    /// Last day, inclusive
    #[arg(long, value_name = "DATE")]
    pub to: Option<NaiveDate>,

    /// Output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<FormatArg>,
}

impl ChartCommand {
    /// Execute the chart command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        let (config, desk) = open_desk(global, false)?;
        let start = self.from.unwrap_or_else(|| Local::now().date_naive());
        let too_long =
            || CliError::InvalidArguments(format!("a chart covers at most {MAX_CHART_DAYS} days"));
        let range = match self.to {
            Some(end) => DateRange::new(start, end),
            None => {
                let days = self.days.unwrap_or_else(|| config.chart_days());
                if days > MAX_CHART_DAYS {
                    return Err(too_long());
                }
                DateRange::starting(start, days)
            }
        }
        .map_err(|e| CliError::InvalidArguments(e.to_string()))?;
        if range.len() > MAX_CHART_DAYS as usize {
            return Err(too_long());
        }

        let chart = desk.tape_chart(&range)?;
        grid(&chart).print(resolve_format(self.format, &config), &chart)
    }
}

fn grid(chart: &TapeChart) -> Listing {
    let mut headers = vec!["room".to_string(), "type".to_string()];
    headers.extend(chart.dates.iter().map(|d| d.format("%m-%d").to_string()));

    let mut listing = Listing::new(&headers);
    for row in &chart.rows {
        let mut line = vec![row.number.clone(), row.room_type.clone()];
        line.extend(row.cells.iter().map(cell_text));
        listing.push(line);
    }
    listing
}

fn cell_text(cell: &TapeCell) -> String {
    let Some(ref booking) = cell.booking else {
        return String::new();
    };
    let mark = if booking.status == ReservationStatus::CheckedIn {
        "*"
    } else {
        ""
    };
    if booking.is_start {
        format!("#{}{mark}", booking.reservation_id)
    } else {
        format!("~{mark}")
    }
}
