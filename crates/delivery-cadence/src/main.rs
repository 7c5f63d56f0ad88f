mod bootstrap;

use anyhow::Result;
use cadence_core::config::{PipelineConfig, Settings};
use cadence_core::error::CadenceError;
use cadence_data::analyzer::analyze_cadence;
use cadence_data::pipeline::ingest_directory;
use cadence_data::report::write_reports;
use clap::Parser;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Delivery cadence analyzer v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Data dir: {}, output dir: {}, operating year: {}",
        settings.data_dir.display(),
        settings.output_dir.display(),
        settings.year
    );

    // ── Step 1: Ingest ────────────────────────────────────────────────────────
    let config = PipelineConfig::from_settings(&settings);
    let ingest = ingest_directory(&settings.data_dir, &config)?;

    if !ingest.units_skipped.is_empty() {
        tracing::warn!(
            "{} unit(s) skipped during ingestion",
            ingest.units_skipped.len()
        );
    }
    if ingest.row_stats.rejected() > 0 {
        tracing::info!(
            "{} row(s) rejected ({} control labels, {} blank customers, {} blank products, {} bad quantities)",
            ingest.row_stats.rejected(),
            ingest.row_stats.control_label,
            ingest.row_stats.blank_customer,
            ingest.row_stats.blank_product,
            ingest.row_stats.unparseable_quantity + ingest.row_stats.non_positive_quantity
        );
    }

    // Nothing to analyze or report when every unit came up empty.
    if ingest.records.is_empty() {
        return Err(CadenceError::NoValidData(settings.data_dir).into());
    }

    tracing::info!(
        "Extracted {} records from {} unit(s)",
        ingest.records.len(),
        ingest.units_processed
    );

    // ── Step 2: Analyze ───────────────────────────────────────────────────────
    let summaries = analyze_cadence(&ingest.records);

    // ── Step 3: Report ────────────────────────────────────────────────────────
    let (records_path, summary_path) = write_reports(
        &ingest.records,
        &summaries,
        &settings.output_dir,
        &settings.records_file,
        &settings.summary_file,
    )?;

    tracing::info!(
        "Analysis complete: {} summaries written to {} (records: {})",
        summaries.len(),
        summary_path.display(),
        records_path.display()
    );

    Ok(())
}
