// [libs/infra/jobstore/src/lib.rs]
/*!
 * =================================================================
 * APARATO: JOB STORE CRATE ROOT (V1.0)
 * CLASIFICACIÓN: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: PERSISTENCIA ACID DE LA COLA DE TRABAJO (§4.1)
 * =================================================================
 */

mod client;
mod errors;
mod queries;
mod repository;
mod schema;

pub use client::JobStoreClient;
pub use errors::JobStoreError;
pub use repository::{JobRepository, PersonJob};
