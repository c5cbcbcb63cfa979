// [libs/infra/fetch/src/outcome.rs]
//! =================================================================
//! APARATO: FETCH OUTCOME CONTRACT (V1.0)
//! RESPONSABILIDAD: DEFINICIÓN DEL RESULTADO SOBERANO DE UNA ADQUISICIÓN
//! =================================================================

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Ok { body: Vec<u8>, status: u16, response_time_ms: u64 },
    NotFound,
    Blocked { reason: String },
    TransientError { reason: String },
}

impl FetchOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, FetchOutcome::Ok { .. })
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self, FetchOutcome::Blocked { .. })
    }
}
