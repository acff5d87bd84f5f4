use super::grid::{Grid, DAYS_PER_WEEK};
use super::window::WindowClock;
use crate::model::{
    ClassifiedCell, DayEntry, HeatOutput, Report, Tier, WindowInfo, SCHEMA_VERSION,
};
use chrono::{Datelike, Utc};
use console::Style;
use std::io::{self, Write};

const LABEL_WIDTH: usize = 5;
const REPORT_WIDTH: usize = 29;

fn tier_style(tier: Tier) -> Style {
    let base = Style::new().bold();
    match tier {
        Tier::Empty => base.white().on_red(),
        Tier::Low => base.black().on_white(),
        Tier::Medium => base.black().on_yellow(),
        Tier::High => base.black().on_green(),
        Tier::Today => base.white().on_magenta(),
    }
}

fn day_label(weekday: usize) -> &'static str {
    match weekday {
        1 => " Mon ",
        3 => " Wed ",
        5 => " Fri ",
        _ => "     ",
    }
}

pub fn render_cell<W: Write>(out: &mut W, cell: &ClassifiedCell) -> io::Result<()> {
    let text = format!(" {:>2} ", cell.count);
    write!(out, "{}", tier_style(cell.tier).apply_to(text))
}

/// Writes the month header and seven weekday rows, oldest week on the left.
pub fn render_heatmap<W: Write>(out: &mut W, grid: &Grid) -> io::Result<()> {
    write!(out, "{}", " ".repeat(LABEL_WIDTH))?;
    let mut month = None;
    for week in 0..grid.window_weeks() {
        match grid.column_start(week) {
            Some(start) if month != Some(start.month()) => {
                write!(out, "{:<4}", start.format("%b").to_string())?;
                month = Some(start.month());
            }
            _ => write!(out, "    ")?,
        }
    }
    writeln!(out)?;

    for weekday in 0..DAYS_PER_WEEK {
        write!(out, "{}", day_label(weekday))?;
        for week in 0..grid.window_weeks() {
            render_cell(out, &grid.cell(week, weekday))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn report_row(label: &str, value: &str) -> String {
    let body = format!(" {:<21}{}", label, value);
    format!("│{:<width$}│", body, width = REPORT_WIDTH)
}

pub fn render_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    let rule = "─".repeat(REPORT_WIDTH);
    writeln!(out, "┌{rule}┐")?;
    writeln!(out, "│{:^width$}│", "Stats", width = REPORT_WIDTH)?;
    writeln!(out, "├{rule}┤")?;
    writeln!(out, "{}", report_row("totalDays:", &report.total_days.to_string()))?;
    writeln!(out, "{}", report_row("totalMonths:", &report.total_months.to_string()))?;
    writeln!(out, "{}", report_row("totalCommits:", &report.total_commits.to_string()))?;
    writeln!(
        out,
        "{}",
        report_row("avgCommitsPerDay:", &format!("{:.2}", report.average_commits_per_day))
    )?;
    writeln!(out, "└{rule}┘")?;
    Ok(())
}

pub fn build_output(
    grid: &Grid,
    report: &Report,
    window: &WindowClock,
    repository_path: &str,
    author_email: Option<&str>,
) -> HeatOutput {
    let days = grid
        .cells()
        .filter(|(_, _, cell)| cell.count > 0 || cell.is_today)
        .filter_map(|(week, weekday, cell)| {
            grid.date_of(week, weekday).map(|date| DayEntry {
                date,
                week: week as u32,
                weekday: weekday as u32,
                count: cell.count,
                tier: cell.tier,
            })
        })
        .collect();

    HeatOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        repository_path: repository_path.to_string(),
        author_email: author_email.map(str::to_string),
        window: WindowInfo {
            today: window.today(),
            window_days: window.window_days(),
            window_weeks: window.window_weeks(),
            alignment_offset: window.alignment_offset(),
        },
        report: report.clone(),
        days,
    }
}

pub fn output_json<W: Write>(out: &mut W, output: &HeatOutput) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, output)?;
    writeln!(out)?;
    Ok(())
}
