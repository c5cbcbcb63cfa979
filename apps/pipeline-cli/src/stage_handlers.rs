// [apps/pipeline-cli/src/stage_handlers.rs]
/*!
 * APARATO: STAGE HANDLERS (V1.0)
 * RESPONSABILIDAD: TRADUCIR stage_handler(stage, job) DEL BUCLE PRINCIPAL (§4.6)
 *
 * Cada handler devuelve un StageOutcome en vez de lanzar una excepción: el
 * orquestador decide la transición del Job Store a partir de esta variante
 * en un único lugar, tal como exige §7 ("the Orchestrator is the single
 * place that translates a kind into a Job Store transition").
 */

use serde_json::{json, Value};
use tracing::{debug, warn};

use sentinel_domain_models::{CompanyRecord, Job, OrgNumber, Stage};
use sentinel_infra_adapters::{project_registry_company, AdapterError, AdapterOutcome};

use crate::bootstrap::PipelineContext;
use crate::graph_sink::GraphSink;
use crate::raw_documents::persist_raw_document;

#[derive(Debug)]
pub enum StageOutcome {
    Completed(Value),
    Blocked { reason: String },
    RateLimited { retry_after_secs: u64 },
    RetryableError(String),
    FatalError(String),
}

fn from_adapter_error(err: AdapterError) -> StageOutcome {
    match err {
        AdapterError::Configuration(reason) => StageOutcome::FatalError(reason),
        other => StageOutcome::RetryableError(other.to_string()),
    }
}

/// Folds a `Completed`/`NotFound`/... outcome into a `StageOutcome`.
/// `NotFound` is terminal *success* for the stage (§7), so it becomes a
/// `Completed` payload recording the miss rather than an exception branch.
fn from_outcome<T>(outcome: AdapterOutcome<T>, on_completed: impl FnOnce(T) -> Value) -> StageOutcome {
    match outcome {
        AdapterOutcome::Completed(value) => StageOutcome::Completed(on_completed(value)),
        AdapterOutcome::NotFound => StageOutcome::Completed(json!({ "found": false })),
        AdapterOutcome::Blocked { reason } => StageOutcome::Blocked { reason },
        AdapterOutcome::RateLimited { retry_after_secs } => StageOutcome::RateLimited { retry_after_secs },
        AdapterOutcome::TransientError { reason } => StageOutcome::RetryableError(reason),
    }
}

/// Discovery is a no-op claim loop in the common file-seeded flow: `seed`
/// inserts jobs directly at stage Registry (Discovery-complete), so a job
/// only reaches this handler if a live Discovery endpoint is wired up, which
/// this deployment never configures (`LiveDiscoveryAdapter` stays unwired).
pub async fn run_discovery_stage(job: &Job) -> StageOutcome {
    debug!("🗂️ [STAGE:discovery]: {} claimed with no live Discovery source configured, passing through", job.orgnr);
    StageOutcome::Completed(json!({}))
}

/// §4.5.2: FetchCompany, then ListAnnualReports + DownloadDocument for the
/// most recent report. The document body rides the stage payload hex-encoded
/// so the Graph stage can decode it without a second network round trip —
/// `stage_payloads` is defined as an opaque JSON blob (§6.5) and annual
/// report PDFs/ZIPs are small enough that this stays well within SQLite's
/// comfort zone.
pub async fn run_registry_stage<S: GraphSink>(ctx: &PipelineContext<S>, job: &Job) -> StageOutcome {
    let orgnr = &job.orgnr;

    let company_raw = match ctx.registry.fetch_company_raw(orgnr).await {
        Err(err) => return from_adapter_error(err),
        Ok(AdapterOutcome::Completed(raw)) => raw,
        Ok(AdapterOutcome::NotFound) => return StageOutcome::Completed(json!({ "found": false })),
        Ok(AdapterOutcome::Blocked { reason }) => return StageOutcome::Blocked { reason },
        Ok(AdapterOutcome::RateLimited { retry_after_secs }) => return StageOutcome::RateLimited { retry_after_secs },
        Ok(AdapterOutcome::TransientError { reason }) => return StageOutcome::RetryableError(reason),
    };

    let record = project_registry_company(orgnr, &company_raw, &ctx.config.source_tag);
    let (document_id, document_hex) = fetch_latest_document(ctx, orgnr).await;

    StageOutcome::Completed(json!({
        "found": true,
        "company": record,
        "document_id": document_id,
        "document_hex": document_hex,
    }))
}

/// Best-effort: a failed or empty document list/download never fails the
/// company job itself — the Graph stage just runs with no directors.
async fn fetch_latest_document<S: GraphSink>(ctx: &PipelineContext<S>, orgnr: &OrgNumber) -> (Option<String>, Option<String>) {
    let documents = match ctx.registry.list_annual_reports(orgnr).await {
        Ok(AdapterOutcome::Completed(documents)) => documents,
        Ok(_) => {
            debug!("📄 [STAGE:registry]: no annual report list available for {}", orgnr);
            return (None, None);
        }
        Err(err) => {
            warn!("⚠️ [STAGE:registry]: annual report listing faulted for {}: {}", orgnr, err);
            return (None, None);
        }
    };

    let Some(latest) = documents
        .into_iter()
        .max_by(|a, b| a.reporting_period_end.cmp(&b.reporting_period_end))
    else {
        return (None, None);
    };

    match ctx.registry.download_document(&latest.document_id).await {
        Ok(AdapterOutcome::Completed(bytes)) => {
            if ctx.config.store_raw_docs {
                if let Err(fault) = persist_raw_document(&ctx.config, orgnr, &latest.file_format, &bytes) {
                    warn!("⚠️ [STAGE:registry]: failed to archive raw document for {}: {}", orgnr, fault);
                }
            }
            (Some(latest.document_id), Some(hex::encode(&bytes)))
        }
        Ok(_) => {
            debug!("📄 [STAGE:registry]: document body unavailable for {}, continuing without it", orgnr);
            (None, None)
        }
        Err(err) => {
            warn!("⚠️ [STAGE:registry]: document download faulted for {}: {}", orgnr, err);
            (None, None)
        }
    }
}

/// §4.3: runs the Document Extractor over the Registry stage's hex-encoded
/// document and emits the enriched record to the Graph Sink — the only
/// stage that does (§4.6 pseudocode, "if stage == Graph: emit").
pub async fn run_graph_stage<S: GraphSink>(ctx: &PipelineContext<S>, job: &Job) -> StageOutcome {
    let Some(registry_payload) = job.payload_for(Stage::Registry) else {
        return StageOutcome::FatalError(format!("{} reached stage Graph with no Registry payload", job.orgnr));
    };

    let found = registry_payload.get("found").and_then(Value::as_bool).unwrap_or(false);
    if !found {
        debug!("🕸️ [STAGE:graph]: {} has no Registry company record, nothing to emit", job.orgnr);
        return StageOutcome::Completed(json!({ "extracted": false }));
    }

    let mut record: CompanyRecord = match registry_payload.get("company").cloned() {
        Some(value) => match serde_json::from_value(value) {
            Ok(record) => record,
            Err(fault) => return StageOutcome::FatalError(format!("corrupt Registry payload for {}: {}", job.orgnr, fault)),
        },
        None => return StageOutcome::FatalError(format!("{} Registry payload marked found with no 'company'", job.orgnr)),
    };

    let document_hex = registry_payload.get("document_hex").and_then(Value::as_str);
    let document_id = registry_payload.get("document_id").and_then(Value::as_str).unwrap_or("unknown");

    let extraction_summary = if let Some(hex_body) = document_hex {
        match hex::decode(hex_body) {
            Ok(bytes) => {
                let extraction = ctx.extractor.extract(&job.orgnr, document_id, &bytes);
                let summary = json!({
                    "method": extraction.method,
                    "confidence": extraction.overall_confidence,
                    "director_count": extraction.directors.len(),
                    "warnings": extraction.warnings,
                });
                record.directors = extraction.directors;
                summary
            }
            Err(fault) => {
                warn!("⚠️ [STAGE:graph]: malformed document hex for {}: {}", job.orgnr, fault);
                json!({ "method": null, "confidence": 0.0, "director_count": 0 })
            }
        }
    } else {
        json!({ "method": null, "confidence": 0.0, "director_count": 0 })
    };

    if let Err(fault) = ctx.graph_sink.emit_company(&record) {
        return StageOutcome::FatalError(format!("Graph Sink rejected {}: {}", job.orgnr, fault));
    }

    StageOutcome::Completed(json!({
        "extracted": true,
        "extraction": extraction_summary,
    }))
}

/// §4.5.3: canonical company-page fetch. When `enable_person_pass` is on,
/// every director with a known `external_id` is enqueued onto the person
/// job queue rather than fetched inline — the second pass "runs only when
/// configured, is driven by its own claim queue keyed by person_id...and a
/// failure in the second pass never fails or blocks the owning company
/// job," which a queue enforces structurally instead of by convention.
pub async fn run_scraped_stage<S: GraphSink>(ctx: &PipelineContext<S>, job: &Job) -> StageOutcome {
    let outcome = match ctx.scraped.fetch_company(&job.orgnr).await {
        Ok(outcome) => outcome,
        Err(err) => return from_adapter_error(err),
    };

    if ctx.config.enable_person_pass {
        if let AdapterOutcome::Completed(record) = &outcome {
            enqueue_person_pass(ctx, record).await;
        }
    }

    from_outcome(outcome, |record| json!({ "found": true, "company": record }))
}

async fn enqueue_person_pass<S: GraphSink>(ctx: &PipelineContext<S>, record: &CompanyRecord) {
    let Ok(repo) = ctx.job_repository() else {
        warn!("⚠️ [STAGE:scraped]: could not open a connection to enqueue the person pass for {}", record.orgnr);
        return;
    };
    for director in &record.directors {
        let Some(person_id) = director.external_id.as_deref() else { continue };
        let name = director.full_name();
        if let Err(fault) = repo.enqueue_person(person_id, &name).await {
            warn!("⚠️ [STAGE:scraped]: failed to enqueue person job {} ({}): {}", name, person_id, fault);
        }
    }
}
