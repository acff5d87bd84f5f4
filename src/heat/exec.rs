use super::{
    aggregate, build_output, output_json, render_heatmap, render_report, DayBuckets, Grid,
    WindowClock,
};
use crate::git::GitRepo;
use crate::model::{CommitEvent, Report};
use anyhow::Context;
use console::style;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};

fn report_source_error(path: &std::path::Path, err: &dyn std::fmt::Display) {
    eprintln!(
        "{} {}",
        style("Error in processing repository:").red().bold(),
        path.display()
    );
    eprintln!("{}", style(err).red().bold());
}

pub fn exec(email: Option<String>, folder: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let window = WindowClock::now();
    let folder = match folder {
        Some(folder) => folder,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };

    let (repository_path, email, events) = match GitRepo::open(Some(&folder)) {
        Ok(repo) => {
            let email = email.or_else(|| repo.user_email());
            let events = repo.collect_events(!json).unwrap_or_else(|e| {
                warn!("failed to walk history: {e}");
                report_source_error(repo.path(), &e);
                Vec::<CommitEvent>::new()
            });
            (repo.path().to_path_buf(), email, events)
        }
        Err(e) => {
            warn!("failed to open repository: {e}");
            report_source_error(&folder, &e);
            (folder, email, Vec::new())
        }
    };

    let buckets = match email.as_deref() {
        Some(target) => aggregate(&events, target, &window),
        None => {
            warn!("no author email configured, nothing will match");
            DayBuckets::new()
        }
    };
    info!(
        commits = events.len(),
        days = buckets.len(),
        window_days = window.window_days(),
        "built day buckets"
    );

    let grid = Grid::build(&buckets, &window);
    let report = Report::compute(&buckets, &window);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        let output = build_output(
            &grid,
            &report,
            &window,
            &repository_path.to_string_lossy(),
            email.as_deref(),
        );
        output_json(&mut out, &output).context("Failed to write JSON")?;
    } else {
        render_heatmap(&mut out, &grid).context("Failed to render heatmap")?;
        render_report(&mut out, &report).context("Failed to render report")?;
    }
    out.flush().context("Failed to flush output")?;

    Ok(())
}
