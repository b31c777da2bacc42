//! Application entry: settings, scan and report for one invocation.

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::{Cli, OutputFormat};
use crate::config::{Overrides, Settings};
use crate::duplicates::{DuplicateFinder, DuplicateGroup, ScanSummary};
use crate::error::ExitCode;
use crate::logging::init_logging;
use crate::output::{JsonOutput, TextReport};
use crate::progress::Progress;

/// Run a scan as described by `cli` and write the report to stdout.
///
/// # Errors
///
/// Returns an error if the settings are invalid, a file cannot be
/// classified, or the report cannot be written. Nothing is written to
/// stdout in the first two cases.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    init_logging(cli.verbose, cli.quiet);

    let settings =
        Settings::load(&Overrides::from(&cli)).context("Failed to load configuration")?;
    log::debug!("Effective settings: {:?}", settings);

    let mut config = settings.finder_config();
    if !cli.quiet {
        config = config.with_progress_callback(Arc::new(Progress::new(false)));
    }

    let (groups, summary) = DuplicateFinder::new(config)
        .find_duplicates_in_paths(&cli.paths)
        .context("Scan failed")?;
    let exit_code = ExitCode::for_scan(&summary);

    let stdout = io::stdout();
    let color = !cli.no_color && stdout.is_terminal();
    let mut out = stdout.lock();
    write_report(&mut out, settings.output, &groups, &summary, exit_code, color)?;
    out.flush().context("Failed to flush report")?;

    log_summary(&summary);
    Ok(exit_code)
}

fn write_report<W: Write>(
    out: &mut W,
    format: OutputFormat,
    groups: &[DuplicateGroup],
    summary: &ScanSummary,
    exit_code: ExitCode,
    color: bool,
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => TextReport::new(groups)
            .with_color(color)
            .write_to(out)
            .context("Failed to write report"),
        OutputFormat::Json => JsonOutput::new(groups, summary, exit_code)
            .write_to(out, true)
            .context("Failed to write JSON report"),
    }
}

fn log_summary(summary: &ScanSummary) {
    log::info!(
        "{} files ({}) scanned in {:.2?}; {} groups, {} redundant copies, {} reclaimable",
        summary.total_files,
        summary.total_size_display(),
        summary.scan_duration,
        summary.duplicate_groups,
        summary.duplicate_files,
        summary.reclaimable_display()
    );
    for err in &summary.scan_errors {
        log::warn!("Not scanned: {}", err);
    }
    if !summary.skipped_files.is_empty() {
        log::warn!("{} unreadable files skipped", summary.skipped_files.len());
    }
}
