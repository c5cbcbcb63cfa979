// [libs/infra/adapters/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ADAPTADORES DE FUENTE EXTERNA (V1.0)
 * CLASIFICACIÓN: INFRAESTRUCTURA (ESTRATO L3)
 * RESPONSABILIDAD: TRADUCCIÓN ENTRE PROTOCOLO/FORMATO EXTERNO Y TIPOS INTERNOS (§4.5)
 *
 * VISION HIPER-HOLÍSTICA:
 * Ningún adaptador habla con el Job Store directamente — reciben un orgnr
 * (o un identificador de persona) y devuelven un AdapterOutcome que el
 * Orquestador traduce a una transición de estado.
 * =================================================================
 */

mod discovery;
mod errors;
mod outcome;
mod registry;
mod registry_projection;
mod scraped_adapter;

pub use discovery::{
    filter_unseen, load_from_file, load_from_json_file, load_from_text_file, DiscoveredOrgnr, DiscoveryFilters,
    LiveDiscoveryAdapter,
};
pub use errors::AdapterError;
pub use outcome::AdapterOutcome;
pub use registry::{
    is_registry_eligible, DocumentInfo, RegistryAdapter, RegistryCredentials, DEFAULT_REGISTRY_MIN_DELAY_SECS,
};
pub use registry_projection::project_registry_company;
pub use scraped_adapter::ScrapedAdapter;
