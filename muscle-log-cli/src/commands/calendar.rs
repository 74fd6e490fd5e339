use anyhow::Result;
use chrono::{Datelike, Local, Weekday};
use clap::Args;
use colored::Colorize;

use super::AppContext;
use crate::calendar::{self, CalendarCell, MonthGrid, YearMonth};

#[derive(Args)]
pub struct CalendarCommand {
    /// Year to show (defaults to the current year)
    #[arg(long)]
    year: Option<i32>,

    /// Month to show, 1-12 (defaults to the current month)
    #[arg(long)]
    month: Option<u32>,

    /// Step back one month from the selected month
    #[arg(long, conflicts_with = "next")]
    prev: bool,

    /// Step forward one month from the selected month
    #[arg(long)]
    next: bool,

    /// First day of the week: sunday or monday (overrides the config)
    #[arg(long)]
    week_start: Option<String>,
}

impl CalendarCommand {
    pub async fn execute(self, ctx: &AppContext) -> Result<()> {
        ctx.require_login()?;

        let today = Local::now().date_naive();
        let mut selected = YearMonth::new(
            self.year.unwrap_or_else(|| today.year()),
            self.month.unwrap_or_else(|| today.month()),
        )?;

        let week_start = match self.week_start {
            Some(raw) => {
                let mut calendar = ctx.config.calendar.clone();
                calendar.week_start = raw;
                calendar.week_start()?
            }
            None => ctx.config.calendar.week_start()?,
        };

        if self.prev || self.next {
            selected = if self.prev {
                selected.prev()
            } else {
                selected.next()
            };
            // Moving to another month always re-reads the workout days.
            ctx.dates.invalidate().await;
        }

        let done = ctx.dates.get().await?;
        let grid = calendar::project_month(selected, &done, week_start);

        print!("{}", render(&grid));

        Ok(())
    }
}

fn weekday_header(week_start: Weekday) -> String {
    let mut day = week_start;
    let mut names = Vec::with_capacity(7);
    for _ in 0..7 {
        names.push(format!("{:>3}", &day.to_string()[..2]));
        day = day.succ();
    }
    names.join(" ")
}

/// Text rendering of a month; done days are starred
fn render(grid: &MonthGrid) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:^27}\n", grid.month.to_string()));
    out.push_str(&weekday_header(grid.week_start));
    out.push('\n');

    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Blank => "   ".to_string(),
                CalendarCell::Day { day, done: true, .. } => {
                    format!("{:>2}*", day).green().bold().to_string()
                }
                CalendarCell::Day { day, .. } => format!("{:>2} ", day),
            })
            .collect();
        out.push_str(row.join(" ").trim_end());
        out.push('\n');
    }

    let done = grid.done_days().count();
    out.push_str(&format!("\n{} workout day(s) this month\n", done));
    out
}
