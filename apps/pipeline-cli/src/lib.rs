// [apps/pipeline-cli/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PIPELINE CLI LIBRARY ROOT (V1.0)
 * CLASIFICACIÓN: APPLICATION LAYER
 * RESPONSABILIDAD: ORQUESTAR LA ADQUISICIÓN Y ENRIQUECIMIENTO DEL REGISTRO
 *                   MERCANTIL SUECO SOBRE EL JOB STORE (§4, §6.4)
 *
 * `main.rs` se mantiene deliberadamente fino: parsea argumentos y delega
 * aquí, igual que `census-taker` delega en su propio `pipeline.rs`.
 * =================================================================
 */

pub mod bootstrap;
pub mod commands;
pub mod graph_sink;
pub mod orchestrator;
pub mod raw_documents;
pub mod stage_handlers;
