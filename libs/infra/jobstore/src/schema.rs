// [libs/infra/jobstore/src/schema.rs]
/*!
 * =================================================================
 * APARATO: JOB STORE SCHEMA (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GOBERNANZA ESTRUCTURAL E IDEMPOTENCIA TOTAL
 *
 * VISION HIPER-HOLÍSTICA:
 * 1. TACTICAL TABLES: jobs, stage_payloads, request_log, block_events,
 *    pipeline_runs, person_jobs (§6.5, §10.6).
 * 2. IDEMPOTENCIA: tolerante a "duplicate column name" en migraciones en
 *    caliente.
 * 3. PERFORMANCE: índices de aceleración para el despacho masivo.
 * =================================================================
 */

use libsql::Connection;
use tracing::{debug, info, instrument, warn};

use crate::errors::JobStoreError;

const TACTICAL_TABLES: &[(&str, &str)] = &[
    ("TABLE_JOBS", r#"
        CREATE TABLE IF NOT EXISTS jobs (
            orgnr TEXT PRIMARY KEY,
            stage TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            priority INTEGER NOT NULL DEFAULT 0,
            attempts INTEGER NOT NULL DEFAULT 0,
            last_attempt DATETIME,
            error TEXT,
            cool_down_until DATETIME,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
    "#),
    ("TABLE_STAGE_PAYLOADS", r#"
        CREATE TABLE IF NOT EXISTS stage_payloads (
            orgnr TEXT NOT NULL,
            stage TEXT NOT NULL,
            payload TEXT NOT NULL,
            written_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            PRIMARY KEY (orgnr, stage)
        );
    "#),
    ("TABLE_REQUEST_LOG", r#"
        CREATE TABLE IF NOT EXISTS request_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            orgnr TEXT,
            stage TEXT,
            success INTEGER NOT NULL,
            status_code INTEGER,
            response_time_ms INTEGER,
            error_kind TEXT
        );
    "#),
    ("TABLE_BLOCK_EVENTS", r#"
        CREATE TABLE IF NOT EXISTS block_events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            stage TEXT NOT NULL,
            status_code INTEGER,
            error TEXT,
            cool_down_seconds INTEGER NOT NULL
        );
    "#),
    ("TABLE_PIPELINE_RUNS", r#"
        CREATE TABLE IF NOT EXISTS pipeline_runs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            started_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            completed_at DATETIME,
            stats TEXT
        );
    "#),
    ("TABLE_PERSON_JOBS", r#"
        CREATE TABLE IF NOT EXISTS person_jobs (
            person_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT 'pending',
            attempts INTEGER NOT NULL DEFAULT 0,
            error TEXT,
            created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
        );
    "#),
];

const EVOLUTIONARY_STRATA: &[(&str, &str)] = &[
    ("JOBS_PRIORITY_BACKFILL", "ALTER TABLE jobs ADD COLUMN priority INTEGER NOT NULL DEFAULT 0"),
];

const ACCELERATION_INDEXES: &[(&str, &str)] = &[
    ("IDX_JOBS_STAGE_STATUS", "CREATE INDEX IF NOT EXISTS idx_jobs_stage_status ON jobs(stage, status);"),
    ("IDX_JOBS_ORDERING", "CREATE INDEX IF NOT EXISTS idx_jobs_ordering ON jobs(priority DESC, created_at ASC);"),
    ("IDX_REQUEST_LOG_TIMESTAMP", "CREATE INDEX IF NOT EXISTS idx_request_log_timestamp ON request_log(timestamp);"),
];

#[instrument(skip(database_connection))]
pub async fn apply_job_store_schema(database_connection: &Connection) -> Result<(), JobStoreError> {
    info!("🏗️ [SCHEMA]: Initiating job store structural synchronization...");

    solidify_base_strata(database_connection).await?;
    execute_evolutionary_repair(database_connection).await?;
    harden_access_layer(database_connection).await?;

    info!("✅ [SCHEMA]: Job store schema level and certified.");
    Ok(())
}

async fn solidify_base_strata(db: &Connection) -> Result<(), JobStoreError> {
    for (identifier, sql) in TACTICAL_TABLES {
        debug!("  ↳ Solidifying: {}", identifier);
        db.execute(sql, ()).await.map_err(JobStoreError::QueryError)?;
    }
    Ok(())
}

async fn execute_evolutionary_repair(db: &Connection) -> Result<(), JobStoreError> {
    for (identifier, sql) in EVOLUTIONARY_STRATA {
        match db.execute(sql, ()).await {
            Ok(_) => info!("  🟢 [REPAIR_OK]: Applied evolutionary stratum {}", identifier),
            Err(e) => {
                let message = e.to_string();
                if message.contains("duplicate column name") {
                    debug!("  ⚪ [REPAIR_SKIP]: {} already level.", identifier);
                } else {
                    warn!("  ⚠️ [REPAIR_BYPASS]: {} check incomplete: {}", identifier, message);
                }
            }
        }
    }
    Ok(())
}

async fn harden_access_layer(db: &Connection) -> Result<(), JobStoreError> {
    for (identifier, sql) in ACCELERATION_INDEXES {
        debug!("  ↳ Hardening: {}", identifier);
        db.execute(sql, ()).await.map_err(JobStoreError::QueryError)?;
    }
    Ok(())
}
