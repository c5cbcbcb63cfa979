// [libs/infra/jobstore/src/queries.rs]
/*!
 * APARATO: JOB STORE SQL REGISTRY (V1.0)
 * RESPONSABILIDAD: CENTRALIZACIÓN DE SENTENCIAS SQL NOMINALES
 */

pub const INSERT_JOB_IF_ABSENT: &str = r#"
    INSERT INTO jobs (orgnr, stage, status, priority, created_at, updated_at)
    VALUES (?1, ?2, 'pending', ?3, ?4, ?4)
    ON CONFLICT(orgnr) DO NOTHING;
"#;

pub const FIND_NEXT_CLAIMABLE: &str = r#"
    SELECT orgnr, stage, status, priority, attempts, last_attempt, error,
           cool_down_until, created_at, updated_at
    FROM jobs
    WHERE stage = ?1 AND status = 'pending'
    ORDER BY priority DESC, created_at ASC, orgnr ASC
    LIMIT 1;
"#;

pub const CLAIM_JOB: &str = r#"
    UPDATE jobs
    SET status = 'in_progress', attempts = attempts + 1, last_attempt = ?2, updated_at = ?2
    WHERE orgnr = ?1 AND status = 'pending';
"#;

pub const LOAD_STAGE_PAYLOADS: &str = r#"
    SELECT stage, payload FROM stage_payloads WHERE orgnr = ?1;
"#;

pub const UPSERT_STAGE_PAYLOAD: &str = r#"
    INSERT INTO stage_payloads (orgnr, stage, payload, written_at)
    VALUES (?1, ?2, ?3, ?4)
    ON CONFLICT(orgnr, stage) DO UPDATE SET payload = excluded.payload, written_at = excluded.written_at;
"#;

pub const COMPLETE_STAGE_ADVANCE: &str = r#"
    UPDATE jobs
    SET stage = ?2, status = 'pending', updated_at = ?3, error = NULL
    WHERE orgnr = ?1;
"#;

pub const COMPLETE_STAGE_FINAL: &str = r#"
    UPDATE jobs
    SET status = 'completed', updated_at = ?2, error = NULL
    WHERE orgnr = ?1;
"#;

pub const FAIL_JOB_RETRYABLE: &str = r#"
    UPDATE jobs
    SET status = 'pending', error = ?2, updated_at = ?3
    WHERE orgnr = ?1;
"#;

pub const FAIL_JOB_TERMINAL: &str = r#"
    UPDATE jobs
    SET status = 'failed', error = ?2, updated_at = ?3
    WHERE orgnr = ?1;
"#;

pub const BLOCK_JOB: &str = r#"
    UPDATE jobs
    SET status = 'blocked', cool_down_until = ?2, updated_at = ?3
    WHERE orgnr = ?1;
"#;

pub const INSERT_BLOCK_EVENT: &str = r#"
    INSERT INTO block_events (timestamp, stage, status_code, error, cool_down_seconds)
    VALUES (?1, ?2, ?3, ?4, ?5);
"#;

pub const RESET_BLOCKED: &str = r#"
    UPDATE jobs
    SET status = 'pending', cool_down_until = NULL, updated_at = ?1
    WHERE status = 'blocked' AND cool_down_until IS NOT NULL AND cool_down_until <= ?1;
"#;

pub const RESET_IN_PROGRESS: &str = r#"
    UPDATE jobs
    SET status = 'pending', updated_at = ?1
    WHERE status = 'in_progress';
"#;

pub const STATS_BY_STAGE_STATUS: &str = r#"
    SELECT stage, status, COUNT(*) FROM jobs GROUP BY stage, status;
"#;

pub const RE_QUEUE_WITHOUT_ATTEMPT_BUMP: &str = r#"
    UPDATE jobs
    SET status = 'pending', error = ?2, updated_at = ?3
    WHERE orgnr = ?1;
"#;

pub const INSERT_REQUEST_LOG: &str = r#"
    INSERT INTO request_log (timestamp, orgnr, stage, success, status_code, response_time_ms, error_kind)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);
"#;

pub const LOAD_COMPANY_PAYLOADS: &str = r#"
    SELECT payload FROM stage_payloads
    WHERE stage IN ('registry', 'scraped') AND json_extract(payload, '$.found') = 1
    ORDER BY orgnr ASC, written_at ASC;
"#;

pub const INSERT_PERSON_JOB_IF_ABSENT: &str = r#"
    INSERT INTO person_jobs (person_id, name, status, created_at, updated_at)
    VALUES (?1, ?2, 'pending', ?3, ?3)
    ON CONFLICT(person_id) DO NOTHING;
"#;

pub const FIND_NEXT_CLAIMABLE_PERSON: &str = r#"
    SELECT person_id, name, attempts FROM person_jobs
    WHERE status = 'pending'
    ORDER BY created_at ASC
    LIMIT 1;
"#;

pub const CLAIM_PERSON_JOB: &str = r#"
    UPDATE person_jobs
    SET status = 'in_progress', attempts = attempts + 1, updated_at = ?2
    WHERE person_id = ?1 AND status = 'pending';
"#;

pub const COMPLETE_PERSON_JOB: &str = r#"
    UPDATE person_jobs
    SET status = 'completed', error = NULL, updated_at = ?2
    WHERE person_id = ?1;
"#;

pub const FAIL_PERSON_JOB_RETRYABLE: &str = r#"
    UPDATE person_jobs
    SET status = 'pending', error = ?2, updated_at = ?3
    WHERE person_id = ?1;
"#;

pub const FAIL_PERSON_JOB_TERMINAL: &str = r#"
    UPDATE person_jobs
    SET status = 'failed', error = ?2, updated_at = ?3
    WHERE person_id = ?1;
"#;
