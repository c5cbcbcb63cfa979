// [apps/pipeline-cli/src/commands.rs]
/*!
 * APARATO: OPERATOR COMMANDS (V1.0)
 * RESPONSABILIDAD: seed / stats / reset / export (§6.4)
 */

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use sentinel_domain_models::{CompanyRecord, OrgNumber, Stage, Status};
use sentinel_infra_adapters::load_from_file;
use tracing::info;

use crate::bootstrap::PipelineContext;
use crate::graph_sink::GraphSink;

/// §6.4 `seed --source <file> [--limit N] [--types CSV]`. `--types` filters
/// on the first two digits of the orgnr (the Swedish legal-form prefix) —
/// the seed file itself carries no legal-form field to filter on directly.
pub async fn seed<S: GraphSink>(
    ctx: &PipelineContext<S>,
    source: &Path,
    limit: Option<usize>,
    types: Option<Vec<String>>,
) -> Result<()> {
    let mut discovered = load_from_file(source, 0).context("failed to load the seed file")?;

    if let Some(prefixes) = &types {
        discovered.retain(|entry| prefixes.iter().any(|prefix| entry.orgnr.prefix_2() == prefix));
    }
    if let Some(limit) = limit {
        discovered.truncate(limit);
    }

    let orgnrs: Vec<OrgNumber> = discovered.iter().map(|entry| entry.orgnr.clone()).collect();
    if orgnrs.is_empty() {
        info!("📥 [SEED]: nothing to seed after filtering");
        return Ok(());
    }

    let repo = ctx.job_repository()?;
    // One call per distinct priority keeps add_jobs' per-call priority
    // argument honest instead of collapsing every entry to one value.
    let mut by_priority: std::collections::BTreeMap<i64, Vec<OrgNumber>> = std::collections::BTreeMap::new();
    for entry in &discovered {
        by_priority.entry(entry.priority).or_default().push(entry.orgnr.clone());
    }

    let mut total_added = 0usize;
    for (priority, group) in by_priority {
        total_added += repo.add_jobs(&group, priority, Stage::Registry).await?;
    }

    info!("📥 [SEED]: {} new job(s) added out of {} candidate(s)", total_added, orgnrs.len());
    Ok(())
}

/// §6.4 `stats`: per-(stage, status) counts, plus a derived terminal-error
/// rate — there is no separate "requests today" counter in the Job Store
/// schema (§6.5 `request_log` is append-only and unbounded), so this
/// reports what the schema actually tracks rather than inventing a rollup.
pub async fn stats<S: GraphSink>(ctx: &PipelineContext<S>) -> Result<()> {
    let repo = ctx.job_repository()?;
    let counts = repo.stats().await?;

    let mut rows: Vec<_> = counts.into_iter().collect();
    rows.sort_by(|a, b| (a.0 .0.as_str(), a.0 .1.as_str()).cmp(&(b.0 .0.as_str(), b.0 .1.as_str())));

    println!("{:<10} {:<12} {:>8}", "stage", "status", "count");
    let mut total = 0i64;
    let mut failed = 0i64;
    for ((stage, status), count) in &rows {
        println!("{:<10} {:<12} {:>8}", stage.as_str(), status.as_str(), count);
        total += count;
        if *status == Status::Failed {
            failed += count;
        }
    }

    let error_rate = if total > 0 { (failed as f64 / total as f64) * 100.0 } else { 0.0 };
    println!("---");
    println!("total jobs: {total}, terminally failed: {failed} ({error_rate:.2}%)");
    Ok(())
}

/// §6.4 `reset [--in-progress|--blocked]`: with neither flag, resets both —
/// the common "the process died, get everything claimable again" case.
pub async fn reset<S: GraphSink>(ctx: &PipelineContext<S>, in_progress: bool, blocked: bool) -> Result<()> {
    let repo = ctx.job_repository()?;
    let reset_both = !in_progress && !blocked;

    if in_progress || reset_both {
        let affected = repo.reset_in_progress().await?;
        info!("♻️ [RESET]: {} in-progress job(s) returned to Pending", affected);
    }
    if blocked || reset_both {
        let affected = repo.reset_blocked().await?;
        info!("🔓 [RESET]: {} blocked job(s) returned to Pending", affected);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ExportRow {
    orgnr: String,
    primary_name: String,
    legal_form: Option<String>,
    status_code: Option<String>,
    municipality: Option<String>,
    county: Option<String>,
    primary_code: Option<String>,
    director_count: usize,
    director_names: String,
    source_tag: String,
    fetched_at: String,
}

impl From<&CompanyRecord> for ExportRow {
    fn from(record: &CompanyRecord) -> Self {
        Self {
            orgnr: record.orgnr.to_string(),
            primary_name: record.primary_name.clone(),
            legal_form: record.legal_form.clone(),
            status_code: record.status_code.clone(),
            municipality: record.municipality.clone(),
            county: record.county.clone(),
            primary_code: record.primary_code.clone(),
            director_count: record.directors.len(),
            director_names: record.directors.iter().map(|d| d.full_name()).collect::<Vec<_>>().join("; "),
            source_tag: record.source_tag.clone(),
            fetched_at: record.fetched_at.to_rfc3339(),
        }
    }
}

/// §6.4 `export --output PATH --format {json,csv}`. Reads every company
/// payload the Registry and Scraped stages have persisted; a company
/// covered by both stages contributes one row per stage rather than a
/// merged one, since the Job Store keeps payloads per (orgnr, stage).
pub async fn export<S: GraphSink>(ctx: &PipelineContext<S>, output: &PathBuf, format: &str) -> Result<()> {
    let repo = ctx.job_repository()?;
    let raw_payloads = repo.export_company_payloads().await?;

    let mut records = Vec::with_capacity(raw_payloads.len());
    for payload in raw_payloads {
        let Some(company) = payload.get("company").cloned() else { continue };
        match serde_json::from_value::<CompanyRecord>(company) {
            Ok(record) => records.push(record),
            Err(fault) => tracing::warn!("⚠️ [EXPORT]: skipping a company payload that failed to deserialize: {}", fault),
        }
    }

    let written = write_export(&records, output, format)?;
    info!("📤 [EXPORT]: wrote {} record(s) to {} as {}", written, output.display(), format);
    Ok(())
}

/// The actual serialization step, split out from the Job Store read so it
/// can be exercised directly against an in-memory list of records.
pub fn write_export(records: &[CompanyRecord], output: &Path, format: &str) -> Result<usize> {
    match format {
        "json" => {
            let file = File::create(output).with_context(|| format!("failed to create {}", output.display()))?;
            serde_json::to_writer_pretty(file, records)?;
        }
        "csv" => {
            let mut writer = csv::WriterBuilder::new().from_path(output).with_context(|| format!("failed to create {}", output.display()))?;
            for record in records {
                writer.serialize(ExportRow::from(record))?;
            }
            writer.flush()?;
        }
        other => bail!("unsupported export format '{}', expected 'json' or 'csv'", other),
    }
    Ok(records.len())
}
