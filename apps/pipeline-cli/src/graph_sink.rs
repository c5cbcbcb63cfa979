// [apps/pipeline-cli/src/graph_sink.rs]
/*!
 * APARATO: GRAPH SINK (V1.0)
 * RESPONSABILIDAD: SUMIDERO DE SALIDA PARA CompanyRecord COMPLETOS (§6.2)
 *
 * El Open Question §9 sobre el paso de actualización de grafo del origen
 * se resuelve aquí: un trait en proceso con un no-op/logging por defecto,
 * dejando la integración descendente real al operador.
 */

use sentinel_domain_models::CompanyRecord;
use std::convert::Infallible;
use tracing::info;

/// `EmitCompany(record)` (§6.2). The sink is trusted to be idempotent on
/// `(orgnr)` and to return promptly — it must never be called from inside a
/// Job Store transaction (§5 Backpressure).
pub trait GraphSink: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn emit_company(&self, record: &CompanyRecord) -> Result<(), Self::Error>;
}

/// Default sink: logs the record at `info` and discards it. Satisfies "the
/// core only needs to emit" without inventing an out-of-process protocol.
#[derive(Debug, Default)]
pub struct LoggingGraphSink;

impl GraphSink for LoggingGraphSink {
    type Error = Infallible;

    fn emit_company(&self, record: &CompanyRecord) -> Result<(), Self::Error> {
        info!(
            "🕸️ [GRAPH_SINK]: emit {} ({}) — {} director(s)",
            record.orgnr,
            record.primary_name,
            record.directors.len()
        );
        Ok(())
    }
}
