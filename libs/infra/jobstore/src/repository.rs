// [libs/infra/jobstore/src/repository.rs]
/*!
 * =================================================================
 * APARATO: JOB REPOSITORY (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTIÓN DEL CICLO DE VIDA DE LA COLA DE TRABAJO
 *
 * `claim_next` y `complete_stage` corren cada uno dentro de una transacción
 * que compromete por completo o aborta; un crash entre ambos deja la fila
 * en `in_progress`, reparada por `reset_in_progress` en el próximo arranque.
 * =================================================================
 */

use chrono::{DateTime, Duration, Utc};
use libsql::{params, Connection};
use sentinel_domain_models::{Job, OrgNumber, Stage, StageStatusCounts, Status};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

use crate::errors::JobStoreError;
use crate::queries as sql;

pub struct JobRepository {
    connection: Connection,
}

/// §4.5.3: a claim off the person-pass queue, independent of the orgnr
/// stage machine and keyed by `person_id`.
#[derive(Debug, Clone)]
pub struct PersonJob {
    pub person_id: String,
    pub name: String,
    pub attempts: i64,
}

impl JobRepository {
    pub fn new(connection: Connection) -> Self {
        Self { connection }
    }

    /// §4.1 `AddJobs`: inserts each orgnr not already present. Duplicates are
    /// silently ignored via `ON CONFLICT DO NOTHING`, satisfying idempotent
    /// seeding (§8 property 4).
    #[instrument(skip(self, orgnrs))]
    pub async fn add_jobs(
        &self,
        orgnrs: &[OrgNumber],
        priority: i64,
        initial_stage: Stage,
    ) -> Result<usize, JobStoreError> {
        let now = Utc::now().to_rfc3339();
        let mut added = 0usize;
        for orgnr in orgnrs {
            let rows = self
                .connection
                .execute(
                    sql::INSERT_JOB_IF_ABSENT,
                    params![orgnr.as_str(), initial_stage.as_str(), priority, now.clone()],
                )
                .await
                .map_err(JobStoreError::QueryError)?;
            if rows > 0 {
                added += 1;
            }
        }
        info!("📥 [JOBSTORE]: Seeded {} new job(s) at stage {}", added, initial_stage);
        Ok(added)
    }

    /// §4.1 `ClaimNext`: atomically selects the single highest-priority
    /// oldest Pending job at `stage`, marks it InProgress, and returns it.
    #[instrument(skip(self))]
    pub async fn claim_next(&self, stage: Stage) -> Result<Option<Job>, JobStoreError> {
        let transaction = self
            .connection
            .transaction()
            .await
            .map_err(|e| JobStoreError::TransactionError(e.to_string()))?;

        let mut candidate_rows = transaction
            .query(sql::FIND_NEXT_CLAIMABLE, params![stage.as_str()])
            .await
            .map_err(JobStoreError::QueryError)?;

        let Some(row) = candidate_rows.next().await.map_err(JobStoreError::QueryError)? else {
            transaction.commit().await.map_err(|e| JobStoreError::TransactionError(e.to_string()))?;
            return Ok(None);
        };

        let orgnr_text: String = row.get(0).map_err(JobStoreError::QueryError)?;
        drop(candidate_rows);

        let now = Utc::now().to_rfc3339();
        transaction
            .execute(sql::CLAIM_JOB, params![orgnr_text.clone(), now])
            .await
            .map_err(JobStoreError::QueryError)?;

        transaction
            .commit()
            .await
            .map_err(|e| JobStoreError::TransactionError(e.to_string()))?;

        debug!("🔒 [JOBSTORE]: Claimed {} at stage {}", orgnr_text, stage);

        self.load_job(&orgnr_text).await
    }

    /// §4.1 `CompleteStage`: writes the stage payload, advances the stage
    /// pointer, and resets status to Pending — or to Completed if `stage`
    /// was the last in `enabled_stages`.
    #[instrument(skip(self, payload, enabled_stages))]
    pub async fn complete_stage(
        &self,
        orgnr: &OrgNumber,
        stage: Stage,
        payload: serde_json::Value,
        enabled_stages: &[Stage],
    ) -> Result<(), JobStoreError> {
        let now = Utc::now().to_rfc3339();
        let payload_text = serde_json::to_string(&payload)
            .map_err(|e| JobStoreError::MappingError(e.to_string()))?;

        self.connection
            .execute(
                sql::UPSERT_STAGE_PAYLOAD,
                params![orgnr.as_str(), stage.as_str(), payload_text, now.clone()],
            )
            .await
            .map_err(JobStoreError::QueryError)?;

        match stage.next(enabled_stages) {
            Some(next_stage) => {
                self.connection
                    .execute(
                        sql::COMPLETE_STAGE_ADVANCE,
                        params![orgnr.as_str(), next_stage.as_str(), now],
                    )
                    .await
                    .map_err(JobStoreError::QueryError)?;
            }
            None => {
                self.connection
                    .execute(sql::COMPLETE_STAGE_FINAL, params![orgnr.as_str(), now])
                    .await
                    .map_err(JobStoreError::QueryError)?;
            }
        }

        info!("✅ [JOBSTORE]: {} completed stage {}", orgnr, stage);
        Ok(())
    }

    /// §4.1 `FailJob`: Pending again if retryable and under `max_retries`,
    /// else terminally Failed.
    #[instrument(skip(self, error))]
    pub async fn fail_job(
        &self,
        orgnr: &OrgNumber,
        error: &str,
        retryable: bool,
        attempts: i64,
        max_retries: i64,
    ) -> Result<(), JobStoreError> {
        let now = Utc::now().to_rfc3339();
        let sql = if retryable && attempts < max_retries {
            sql::FAIL_JOB_RETRYABLE
        } else {
            sql::FAIL_JOB_TERMINAL
        };

        self.connection
            .execute(sql, params![orgnr.as_str(), error, now])
            .await
            .map_err(JobStoreError::QueryError)?;

        warn!("⚠️ [JOBSTORE]: {} failed ({}): {}", orgnr, if retryable { "retryable" } else { "terminal" }, error);
        Ok(())
    }

    /// §4.1 `BlockJob` plus a `block_events` audit row (§6.5).
    #[instrument(skip(self, error))]
    pub async fn block_job(
        &self,
        orgnr: &OrgNumber,
        stage: Stage,
        cool_down: Duration,
        status_code: Option<i64>,
        error: Option<&str>,
    ) -> Result<(), JobStoreError> {
        let now = Utc::now();
        let cool_down_until = (now + cool_down).to_rfc3339();

        self.connection
            .execute(
                sql::BLOCK_JOB,
                params![orgnr.as_str(), cool_down_until, now.to_rfc3339()],
            )
            .await
            .map_err(JobStoreError::QueryError)?;

        self.connection
            .execute(
                sql::INSERT_BLOCK_EVENT,
                params![
                    now.to_rfc3339(),
                    stage.as_str(),
                    status_code,
                    error.unwrap_or(""),
                    cool_down.num_seconds()
                ],
            )
            .await
            .map_err(JobStoreError::QueryError)?;

        warn!("🛑 [JOBSTORE]: {} blocked at stage {} for {}s", orgnr, stage, cool_down.num_seconds());
        Ok(())
    }

    /// §7 `RateLimited`: sleep + re-queue Pending without bumping attempts.
    /// The sleep itself is the caller's responsibility (it belongs to the
    /// Registry Adapter, §5); this only performs the re-queue.
    #[instrument(skip(self))]
    pub async fn requeue_without_attempt_bump(&self, orgnr: &OrgNumber, reason: &str) -> Result<(), JobStoreError> {
        let now = Utc::now().to_rfc3339();
        self.connection
            .execute(sql::RE_QUEUE_WITHOUT_ATTEMPT_BUMP, params![orgnr.as_str(), reason, now])
            .await
            .map_err(JobStoreError::QueryError)?;
        Ok(())
    }

    /// §4.5.3: enqueues a director's person-page lookup, idempotent on
    /// `person_id`. Runs off its own queue, entirely separate from the
    /// orgnr/stage machine that drives `jobs`.
    #[instrument(skip(self))]
    pub async fn enqueue_person(&self, person_id: &str, name: &str) -> Result<(), JobStoreError> {
        let now = Utc::now().to_rfc3339();
        self.connection
            .execute(sql::INSERT_PERSON_JOB_IF_ABSENT, params![person_id, name, now])
            .await
            .map_err(JobStoreError::QueryError)?;
        Ok(())
    }

    /// §4.5.3 `ClaimNext` analogue for the person-pass queue.
    #[instrument(skip(self))]
    pub async fn claim_next_person(&self) -> Result<Option<PersonJob>, JobStoreError> {
        let transaction = self
            .connection
            .transaction()
            .await
            .map_err(|e| JobStoreError::TransactionError(e.to_string()))?;

        let mut candidate_rows = transaction
            .query(sql::FIND_NEXT_CLAIMABLE_PERSON, ())
            .await
            .map_err(JobStoreError::QueryError)?;

        let Some(row) = candidate_rows.next().await.map_err(JobStoreError::QueryError)? else {
            transaction.commit().await.map_err(|e| JobStoreError::TransactionError(e.to_string()))?;
            return Ok(None);
        };

        let person_id: String = row.get(0).map_err(JobStoreError::QueryError)?;
        let name: String = row.get(1).map_err(JobStoreError::QueryError)?;
        let attempts: i64 = row.get(2).map_err(JobStoreError::QueryError)?;
        drop(candidate_rows);

        let now = Utc::now().to_rfc3339();
        transaction
            .execute(sql::CLAIM_PERSON_JOB, params![person_id.clone(), now])
            .await
            .map_err(JobStoreError::QueryError)?;

        transaction
            .commit()
            .await
            .map_err(|e| JobStoreError::TransactionError(e.to_string()))?;

        debug!("🔒 [JOBSTORE]: claimed person job {}", person_id);
        Ok(Some(PersonJob { person_id, name, attempts: attempts + 1 }))
    }

    #[instrument(skip(self))]
    pub async fn complete_person(&self, person_id: &str) -> Result<(), JobStoreError> {
        let now = Utc::now().to_rfc3339();
        self.connection
            .execute(sql::COMPLETE_PERSON_JOB, params![person_id, now])
            .await
            .map_err(JobStoreError::QueryError)?;
        Ok(())
    }

    #[instrument(skip(self, error))]
    pub async fn fail_person(&self, person_id: &str, error: &str, retryable: bool, attempts: i64, max_retries: i64) -> Result<(), JobStoreError> {
        let now = Utc::now().to_rfc3339();
        let sql = if retryable && attempts < max_retries {
            sql::FAIL_PERSON_JOB_RETRYABLE
        } else {
            sql::FAIL_PERSON_JOB_TERMINAL
        };
        self.connection
            .execute(sql, params![person_id, error, now])
            .await
            .map_err(JobStoreError::QueryError)?;
        Ok(())
    }

    /// §4.1 `ResetBlocked`: bulk maintenance for cool-down expiry.
    #[instrument(skip(self))]
    pub async fn reset_blocked(&self) -> Result<u64, JobStoreError> {
        let now = Utc::now().to_rfc3339();
        let affected = self
            .connection
            .execute(sql::RESET_BLOCKED, params![now])
            .await
            .map_err(JobStoreError::QueryError)?;
        if affected > 0 {
            info!("🔓 [JOBSTORE]: {} blocked job(s) returned to Pending", affected);
        }
        Ok(affected)
    }

    /// §4.1 `ResetInProgress`: crash recovery, run at startup and periodically.
    #[instrument(skip(self))]
    pub async fn reset_in_progress(&self) -> Result<u64, JobStoreError> {
        let now = Utc::now().to_rfc3339();
        let affected = self
            .connection
            .execute(sql::RESET_IN_PROGRESS, params![now])
            .await
            .map_err(JobStoreError::QueryError)?;
        if affected > 0 {
            warn!("♻️ [JOBSTORE]: {} in-progress job(s) reset after restart", affected);
        }
        Ok(affected)
    }

    /// §4.1 `Stats`: counts grouped by (stage, status).
    #[instrument(skip(self))]
    pub async fn stats(&self) -> Result<StageStatusCounts, JobStoreError> {
        let mut rows = self
            .connection
            .query(sql::STATS_BY_STAGE_STATUS, ())
            .await
            .map_err(JobStoreError::QueryError)?;

        let mut counts = StageStatusCounts::new();
        while let Some(row) = rows.next().await.map_err(JobStoreError::QueryError)? {
            let stage_text: String = row.get(0).map_err(JobStoreError::QueryError)?;
            let status_text: String = row.get(1).map_err(JobStoreError::QueryError)?;
            let count: i64 = row.get(2).map_err(JobStoreError::QueryError)?;

            let stage = Stage::from_str(&stage_text)
                .map_err(JobStoreError::MappingError)?;
            let status = Status::from_str(&status_text)
                .map_err(JobStoreError::MappingError)?;
            counts.insert((stage, status), count);
        }
        Ok(counts)
    }

    #[instrument(skip(self))]
    pub async fn log_request(
        &self,
        orgnr: Option<&OrgNumber>,
        stage: Option<Stage>,
        success: bool,
        status_code: Option<i64>,
        response_time_ms: Option<i64>,
        error_kind: Option<&str>,
    ) -> Result<(), JobStoreError> {
        self.connection
            .execute(
                sql::INSERT_REQUEST_LOG,
                params![
                    Utc::now().to_rfc3339(),
                    orgnr.map(|o| o.as_str().to_string()),
                    stage.map(|s| s.as_str().to_string()),
                    success as i64,
                    status_code,
                    response_time_ms,
                    error_kind.map(|s| s.to_string())
                ],
            )
            .await
            .map_err(JobStoreError::QueryError)?;
        Ok(())
    }

    async fn load_job(&self, orgnr: &str) -> Result<Option<Job>, JobStoreError> {
        let mut rows = self
            .connection
            .query(
                "SELECT orgnr, stage, status, priority, attempts, last_attempt, error, cool_down_until, created_at, updated_at FROM jobs WHERE orgnr = ?1;",
                params![orgnr],
            )
            .await
            .map_err(JobStoreError::QueryError)?;

        let Some(row) = rows.next().await.map_err(JobStoreError::QueryError)? else {
            return Ok(None);
        };

        let orgnr_value = OrgNumber::parse(&row.get::<String>(0).map_err(JobStoreError::QueryError)?)
            .map_err(|e| JobStoreError::MappingError(e.to_string()))?;
        let stage = Stage::from_str(&row.get::<String>(1).map_err(JobStoreError::QueryError)?)
            .map_err(JobStoreError::MappingError)?;
        let status = Status::from_str(&row.get::<String>(2).map_err(JobStoreError::QueryError)?)
            .map_err(JobStoreError::MappingError)?;
        let priority: i64 = row.get(3).map_err(JobStoreError::QueryError)?;
        let attempts: i64 = row.get(4).map_err(JobStoreError::QueryError)?;
        let last_attempt: Option<String> = row.get(5).map_err(JobStoreError::QueryError)?;
        let error: Option<String> = row.get(6).map_err(JobStoreError::QueryError)?;
        let cool_down_until: Option<String> = row.get(7).map_err(JobStoreError::QueryError)?;
        let created_at: String = row.get(8).map_err(JobStoreError::QueryError)?;
        let updated_at: String = row.get(9).map_err(JobStoreError::QueryError)?;

        let stage_payloads = self.load_stage_payloads(orgnr).await?;

        Ok(Some(Job {
            orgnr: orgnr_value,
            stage,
            status,
            priority,
            attempts,
            last_attempt: parse_optional_rfc3339(last_attempt)?,
            stage_payloads,
            error,
            cool_down_until: parse_optional_rfc3339(cool_down_until)?,
            created_at: parse_rfc3339(&created_at)?,
            updated_at: parse_rfc3339(&updated_at)?,
        }))
    }

    /// Collects every company payload persisted by either the Registry or
    /// Scraped stage (export's data source, §6.4 `export`). A company found
    /// by both contributes two rows — the CLI is responsible for merging or
    /// simply preferring the richer one, since the Job Store stores one
    /// payload per (orgnr, stage) rather than a single merged projection.
    #[instrument(skip(self))]
    pub async fn export_company_payloads(&self) -> Result<Vec<serde_json::Value>, JobStoreError> {
        let mut rows = self
            .connection
            .query(sql::LOAD_COMPANY_PAYLOADS, ())
            .await
            .map_err(JobStoreError::QueryError)?;

        let mut payloads = Vec::new();
        while let Some(row) = rows.next().await.map_err(JobStoreError::QueryError)? {
            let payload_text: String = row.get(0).map_err(JobStoreError::QueryError)?;
            let payload: serde_json::Value = serde_json::from_str(&payload_text)
                .map_err(|e| JobStoreError::MappingError(e.to_string()))?;
            payloads.push(payload);
        }
        Ok(payloads)
    }

    async fn load_stage_payloads(
        &self,
        orgnr: &str,
    ) -> Result<HashMap<String, serde_json::Value>, JobStoreError> {
        let mut rows = self
            .connection
            .query(sql::LOAD_STAGE_PAYLOADS, params![orgnr])
            .await
            .map_err(JobStoreError::QueryError)?;

        let mut payloads = HashMap::new();
        while let Some(row) = rows.next().await.map_err(JobStoreError::QueryError)? {
            let stage: String = row.get(0).map_err(JobStoreError::QueryError)?;
            let payload_text: String = row.get(1).map_err(JobStoreError::QueryError)?;
            let payload: serde_json::Value = serde_json::from_str(&payload_text)
                .map_err(|e| JobStoreError::MappingError(e.to_string()))?;
            payloads.insert(stage, payload);
        }
        Ok(payloads)
    }
}

fn parse_rfc3339(value: &str) -> Result<DateTime<Utc>, JobStoreError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| JobStoreError::MappingError(format!("bad timestamp '{value}': {e}")))
}

fn parse_optional_rfc3339(value: Option<String>) -> Result<Option<DateTime<Utc>>, JobStoreError> {
    value.map(|v| parse_rfc3339(&v)).transpose()
}
