// [apps/pipeline-cli/src/orchestrator.rs]
/*!
 * APARATO: PIPELINE ORCHESTRATOR (V1.0)
 * RESPONSABILIDAD: BUCLE PRINCIPAL, CONCURRENCIA POR ETAPA, APAGADO ORDENADO (§4.6)
 *
 * Un worker por (stage, ranura de concurrencia); un ticker de mantenimiento
 * separado libera bloqueos vencidos. Refleja el bucle `while True` de
 * `allabolag/orchestrator.py`: reiniciar huérfanos al arrancar, reclamar,
 * procesar, informar progreso cada N, y drenar con gracia ante la señal.
 */

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Datelike, Timelike};
use tokio::time::sleep;
use tracing::{debug, info, warn};

use sentinel_domain_models::{Job, Stage, Status};
use sentinel_infra_adapters::AdapterOutcome;
use sentinel_infra_jobstore::JobRepository;
use sentinel_shared_config::PipelineConfig;

use crate::bootstrap::PipelineContext;
use crate::graph_sink::GraphSink;
use crate::stage_handlers::{self, StageOutcome};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub stages: Vec<Stage>,
    pub max_jobs: Option<u64>,
    pub watch: bool,
    pub poll_interval: Duration,
}

impl RunOptions {
    pub fn new(stages: Vec<Stage>, max_jobs: Option<u64>, watch: bool, poll_interval_secs: u64) -> Self {
        Self { stages, max_jobs, watch, poll_interval: Duration::from_secs(poll_interval_secs.max(1)) }
    }
}

struct ProgressTracker {
    completed: AtomicU64,
    started_at: Instant,
    report_every: u64,
}

impl ProgressTracker {
    fn new(report_every: u64) -> Self {
        Self { completed: AtomicU64::new(0), started_at: Instant::now(), report_every }
    }

    fn record_completion(&self, pending_remaining: i64) {
        let completed = self.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if self.report_every == 0 || completed % self.report_every != 0 {
            return;
        }
        let elapsed_min = (self.started_at.elapsed().as_secs_f64() / 60.0).max(f64::MIN_POSITIVE);
        let rate_per_min = completed as f64 / elapsed_min;
        let eta_min = if rate_per_min > 0.0 { pending_remaining as f64 / rate_per_min } else { f64::INFINITY };
        info!(
            "📈 [PROGRESS]: {} job(s) completed, {:.1} jobs/min, ETA {:.1} min ({} pending)",
            completed, rate_per_min, eta_min, pending_remaining
        );
    }
}

/// §4.6: drives `stages_enabled` to completion (or indefinitely, in watch
/// mode), one worker per (stage, concurrency slot), plus a `ResetBlocked`
/// maintenance ticker. On `FatalError` (§7 "stops the orchestrator") every
/// worker stops claiming new work and the run drains within
/// `shutdown_grace_secs`, same as an operator-sent signal.
pub async fn run<S: GraphSink + 'static>(ctx: Arc<PipelineContext<S>>, options: RunOptions) -> anyhow::Result<()> {
    let startup_repo = ctx.job_repository()?;
    let reclaimed_at_startup = startup_repo.reset_in_progress().await?;
    if reclaimed_at_startup > 0 {
        warn!("♻️ [ORCHESTRATOR]: reclaimed {} in-progress job(s) left over from a previous run", reclaimed_at_startup);
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    {
        let shutdown_for_signal = shutdown.clone();
        let _ = ctrlc::set_handler(move || {
            warn!("🛑 [ORCHESTRATOR]: shutdown signal received, draining in-flight work");
            shutdown_for_signal.store(true, Ordering::SeqCst);
        });
    }

    let progress = Arc::new(ProgressTracker::new(ctx.config.progress_report_every));
    let jobs_processed = Arc::new(AtomicU64::new(0));

    let maintenance_handle = spawn_maintenance_ticker(ctx.clone(), shutdown.clone());

    let mut worker_handles = Vec::new();
    for stage in options.stages.clone() {
        for _slot in 0..stage_concurrency(&ctx.config, stage) {
            let ctx = ctx.clone();
            let shutdown = shutdown.clone();
            let progress = progress.clone();
            let jobs_processed = jobs_processed.clone();
            let options = options.clone();
            worker_handles.push(tokio::spawn(async move {
                worker_loop(ctx, stage, options, shutdown, progress, jobs_processed).await
            }));
        }
    }

    if ctx.config.enable_person_pass {
        let ctx = ctx.clone();
        let shutdown = shutdown.clone();
        let options = options.clone();
        worker_handles.push(tokio::spawn(async move { person_pass_worker_loop(ctx, options, shutdown).await }));
    }

    let grace = Duration::from_secs(ctx.config.shutdown_grace_secs);
    let workers_future = futures::future::join_all(worker_handles);
    tokio::pin!(workers_future);

    tokio::select! {
        results = &mut workers_future => {
            for result in results {
                if let Err(fault) = result {
                    warn!("⚠️ [ORCHESTRATOR]: a worker task panicked: {}", fault);
                }
            }
        }
        _ = grace_watchdog(shutdown.clone(), grace) => {
            warn!("⏱️ [ORCHESTRATOR]: shutdown_grace elapsed with workers still in flight, proceeding to recovery");
        }
    }

    maintenance_handle.abort();

    let shutdown_repo = ctx.job_repository()?;
    let reclaimed_on_exit = shutdown_repo.reset_in_progress().await?;
    if reclaimed_on_exit > 0 {
        info!("♻️ [ORCHESTRATOR]: reclaimed {} in-progress job(s) on exit", reclaimed_on_exit);
    }

    Ok(())
}

/// Resolves once `shutdown` flips true and `grace` has elapsed; never
/// resolves otherwise, letting `tokio::select!` prefer the worker future in
/// the common (no-signal, `max_jobs`/queue-exhaustion) exit path.
async fn grace_watchdog(shutdown: Arc<AtomicBool>, grace: Duration) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            sleep(grace).await;
            return;
        }
        sleep(Duration::from_millis(200)).await;
    }
}

fn spawn_maintenance_ticker<S: GraphSink + 'static>(ctx: Arc<PipelineContext<S>>, shutdown: Arc<AtomicBool>) -> tokio::task::JoinHandle<()> {
    let interval = Duration::from_secs(ctx.config.maintenance_interval_secs.max(1));
    tokio::spawn(async move {
        while !shutdown.load(Ordering::SeqCst) {
            sleep(interval).await;
            let repo = match ctx.job_repository() {
                Ok(repo) => repo,
                Err(fault) => {
                    warn!("⚠️ [MAINTENANCE]: could not open a connection: {}", fault);
                    continue;
                }
            };
            if let Err(fault) = repo.reset_blocked().await {
                warn!("⚠️ [MAINTENANCE]: reset_blocked faulted: {}", fault);
            }
        }
    })
}

/// Registry must stay at 1 (token cache + server-side rate limit, §4.5.2);
/// Graph is CPU/PDF-bound extraction work with no such coupling, so it
/// scales with the host's core count rather than a dedicated config knob
/// (mirrors `num_cpus::get()` sizing in `apps/miner-worker/src/engine.rs`).
fn stage_concurrency(config: &PipelineConfig, stage: Stage) -> u32 {
    match stage {
        Stage::Discovery => config.discovery_workers.max(1),
        Stage::Registry => 1,
        Stage::Graph => num_cpus::get() as u32,
        Stage::Scraped => config.scraped_workers.max(1),
    }
}

async fn worker_loop<S: GraphSink + 'static>(
    ctx: Arc<PipelineContext<S>>,
    stage: Stage,
    options: RunOptions,
    shutdown: Arc<AtomicBool>,
    progress: Arc<ProgressTracker>,
    jobs_processed: Arc<AtomicU64>,
) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }
        if let Some(max_jobs) = options.max_jobs {
            if jobs_processed.load(Ordering::SeqCst) >= max_jobs {
                break;
            }
        }

        if stage == Stage::Scraped && !in_active_window(&ctx.config) {
            if !options.watch {
                debug!("⏸️ [ORCHESTRATOR]: stage {} is outside the active window, ending this pass", stage);
                break;
            }
            sleep(options.poll_interval).await;
            continue;
        }

        let repo = match ctx.job_repository() {
            Ok(repo) => repo,
            Err(fault) => {
                warn!("⚠️ [ORCHESTRATOR]: {} worker failed to open a Job Store connection: {}", stage, fault);
                sleep(options.poll_interval).await;
                continue;
            }
        };

        let job = match repo.claim_next(stage).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                if !options.watch {
                    break;
                }
                sleep(options.poll_interval).await;
                continue;
            }
            Err(fault) => {
                warn!("⚠️ [ORCHESTRATOR]: {} claim_next faulted: {}", stage, fault);
                sleep(options.poll_interval).await;
                continue;
            }
        };

        process_claimed_job(&ctx, &repo, stage, job, &options, &shutdown).await;
        jobs_processed.fetch_add(1, Ordering::SeqCst);

        let pending = current_pending_count(&repo).await.unwrap_or(0);
        progress.record_completion(pending);
    }
}

/// §4.5.3: drains the person-pass queue independently of the orgnr stage
/// machine. A single worker is deliberately enough here — the second pass
/// is an enrichment side-channel, not a throughput-critical path, and its
/// traffic rides the same Polite Fetcher pacing as the Scraped stage.
async fn person_pass_worker_loop<S: GraphSink + 'static>(ctx: Arc<PipelineContext<S>>, options: RunOptions, shutdown: Arc<AtomicBool>) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            break;
        }

        let repo = match ctx.job_repository() {
            Ok(repo) => repo,
            Err(fault) => {
                warn!("⚠️ [ORCHESTRATOR]: person-pass worker failed to open a Job Store connection: {}", fault);
                sleep(options.poll_interval).await;
                continue;
            }
        };

        let person_job = match repo.claim_next_person().await {
            Ok(Some(person_job)) => person_job,
            Ok(None) => {
                if !options.watch {
                    break;
                }
                sleep(options.poll_interval).await;
                continue;
            }
            Err(fault) => {
                warn!("⚠️ [ORCHESTRATOR]: claim_next_person faulted: {}", fault);
                sleep(options.poll_interval).await;
                continue;
            }
        };

        let outcome = ctx.scraped.fetch_person(&person_job.name, &person_job.person_id).await;
        match outcome {
            Ok(AdapterOutcome::Completed(profile)) => {
                info!(
                    "🧑 [PERSON-PASS]: resolved {} ({}) — {} connection(s)",
                    person_job.name,
                    person_job.person_id,
                    profile.connections.len()
                );
                if let Err(fault) = repo.complete_person(&person_job.person_id).await {
                    warn!("⚠️ [ORCHESTRATOR]: failed to record person-pass completion for {}: {}", person_job.person_id, fault);
                }
            }
            Ok(AdapterOutcome::NotFound) => {
                if let Err(fault) = repo.complete_person(&person_job.person_id).await {
                    warn!("⚠️ [ORCHESTRATOR]: failed to record person-pass completion for {}: {}", person_job.person_id, fault);
                }
            }
            Ok(AdapterOutcome::Blocked { reason }) | Ok(AdapterOutcome::TransientError { reason }) => {
                let _ = repo
                    .fail_person(&person_job.person_id, &reason, true, person_job.attempts, ctx.config.max_retries as i64)
                    .await;
            }
            Ok(AdapterOutcome::RateLimited { retry_after_secs }) => {
                sleep(Duration::from_secs(retry_after_secs)).await;
                let _ = repo
                    .fail_person(&person_job.person_id, "rate_limited", true, person_job.attempts, ctx.config.max_retries as i64)
                    .await;
            }
            Err(err) => {
                let reason = err.to_string();
                warn!("⚠️ [PERSON-PASS]: faulted for {} ({}): {}", person_job.name, person_job.person_id, reason);
                let _ = repo
                    .fail_person(&person_job.person_id, &reason, true, person_job.attempts, ctx.config.max_retries as i64)
                    .await;
            }
        }
    }
}

async fn dispatch_stage<S: GraphSink + 'static>(ctx: Arc<PipelineContext<S>>, stage: Stage, job: Job) -> StageOutcome {
    match stage {
        Stage::Discovery => stage_handlers::run_discovery_stage(&job).await,
        Stage::Registry => stage_handlers::run_registry_stage(&ctx, &job).await,
        Stage::Graph => stage_handlers::run_graph_stage(&ctx, &job).await,
        Stage::Scraped => stage_handlers::run_scraped_stage(&ctx, &job).await,
    }
}

/// §5: "A stage handler that does not return within `stage_timeout` is
/// cancelled; the job is marked retryable-failed." §7's `FatalError` ("stops
/// the orchestrator") is implemented here as: fail the job terminally *and*
/// flip the shared shutdown flag, so every worker stops claiming new jobs
/// and the run drains exactly like a signal-triggered shutdown — §4.6's
/// pseudocode only shows the per-job `FailJob` call, so this reconciles it
/// with §7's process-wide language without inventing a second exit path.
async fn process_claimed_job<S: GraphSink + 'static>(
    ctx: &Arc<PipelineContext<S>>,
    repo: &JobRepository,
    stage: Stage,
    job: Job,
    options: &RunOptions,
    shutdown: &Arc<AtomicBool>,
) {
    let orgnr = job.orgnr.clone();
    let attempts_next = job.attempts + 1;
    let timeout = ctx.config.stage_timeout();

    let handler_ctx = ctx.clone();
    let outcome = match tokio::time::timeout(timeout, dispatch_stage(handler_ctx, stage, job)).await {
        Ok(outcome) => outcome,
        Err(_) => StageOutcome::RetryableError(format!("stage {stage} exceeded its {timeout:?} timeout")),
    };

    match outcome {
        StageOutcome::Completed(payload) => {
            if let Err(fault) = repo.complete_stage(&orgnr, stage, payload, &options.stages).await {
                warn!("⚠️ [ORCHESTRATOR]: failed to persist completion for {}: {}", orgnr, fault);
            }
        }
        StageOutcome::Blocked { reason } => {
            if let Err(fault) = repo.block_job(&orgnr, stage, ctx.config.block_cooldown(), None, Some(&reason)).await {
                warn!("⚠️ [ORCHESTRATOR]: failed to record block for {}: {}", orgnr, fault);
            }
        }
        StageOutcome::RateLimited { retry_after_secs } => {
            sleep(Duration::from_secs(retry_after_secs)).await;
            if let Err(fault) = repo.requeue_without_attempt_bump(&orgnr, "rate_limited").await {
                warn!("⚠️ [ORCHESTRATOR]: failed to requeue rate-limited job {}: {}", orgnr, fault);
            }
        }
        StageOutcome::RetryableError(reason) => {
            if let Err(fault) = repo.fail_job(&orgnr, &reason, true, attempts_next, ctx.config.max_retries as i64).await {
                warn!("⚠️ [ORCHESTRATOR]: failed to record retryable failure for {}: {}", orgnr, fault);
            }
        }
        StageOutcome::FatalError(reason) => {
            warn!("🔥 [ORCHESTRATOR]: fatal error on {} at stage {}: {} — stopping the orchestrator", orgnr, stage, reason);
            if let Err(fault) = repo.fail_job(&orgnr, &reason, false, attempts_next, ctx.config.max_retries as i64).await {
                warn!("⚠️ [ORCHESTRATOR]: failed to record fatal failure for {}: {}", orgnr, fault);
            }
            shutdown.store(true, Ordering::SeqCst);
        }
    }
}

async fn current_pending_count(repo: &JobRepository) -> Result<i64, sentinel_infra_jobstore::JobStoreError> {
    let counts = repo.stats().await?;
    Ok(counts
        .iter()
        .filter(|((_, status), _)| *status == Status::Pending)
        .map(|(_, count)| *count)
        .sum())
}

/// §6.1 `active_hours_start`/`active_hours_end`/`skip_weekends`: the Scraped
/// stage's polite-crawling time-of-day gate. Exposed for testing.
pub fn in_active_window(config: &PipelineConfig) -> bool {
    let now = chrono::Local::now();
    if config.skip_weekends && matches!(now.weekday(), chrono::Weekday::Sat | chrono::Weekday::Sun) {
        return false;
    }
    let hour = now.hour() as u8;
    hour >= config.active_hours_start && hour < config.active_hours_end
}
