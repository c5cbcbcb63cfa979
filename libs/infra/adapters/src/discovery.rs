// [libs/infra/adapters/src/discovery.rs]
/*!
 * =================================================================
 * APARATO: DISCOVERY ADAPTER (V1.0)
 * CLASIFICACIÓN: ADAPTADOR DE FUENTE (ESTRATO L3)
 * RESPONSABILIDAD: PRODUCIR UN FLUJO DE OrgNumber NUEVOS (§4.5.1)
 *
 * VISION HIPER-HOLÍSTICA:
 * El caso común es respaldado por archivo: un JSON array o un .txt de una
 * línea por orgnr, opcionalmente con una etiqueta de prioridad gruesa. Un
 * endpoint Discovery en vivo es opcional y orthogonal a este camino.
 * =================================================================
 */

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use sentinel_domain_models::OrgNumber;

use crate::errors::AdapterError;

#[derive(Debug, Clone)]
pub struct DiscoveredOrgnr {
    pub orgnr: OrgNumber,
    pub priority: i64,
}

/// One entry of a JSON-array seed file: either a bare string or an object
/// carrying a coarse priority tag (§6.4 `seed`).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedEntry {
    Bare(String),
    Tagged { orgnr: String, #[serde(default)] priority: i64 },
}

/// Loads orgnrs from a JSON array file: either `["5566778899", ...]` or
/// `[{"orgnr": "...", "priority": 1}, ...]` (§4.5.1).
pub fn load_from_json_file(path: &Path, default_priority: i64) -> Result<Vec<DiscoveredOrgnr>, AdapterError> {
    let raw = fs::read_to_string(path)?;
    let entries: Vec<SeedEntry> = serde_json::from_str(&raw)?;

    let mut discovered = Vec::new();
    for entry in entries {
        let (raw_orgnr, priority) = match entry {
            SeedEntry::Bare(s) => (s, default_priority),
            SeedEntry::Tagged { orgnr, priority } => (orgnr, if priority == 0 { default_priority } else { priority }),
        };
        match OrgNumber::parse(&raw_orgnr) {
            Ok(orgnr) => discovered.push(DiscoveredOrgnr { orgnr, priority }),
            Err(fault) => warn!("⚠️ [DISCOVERY]: skipping malformed orgnr '{}': {}", raw_orgnr, fault),
        }
    }
    info!("📥 [DISCOVERY]: loaded {} orgnr(s) from {}", discovered.len(), path.display());
    Ok(discovered)
}

/// Loads orgnrs from a newline-delimited text file, one per line, blank
/// lines and `#`-prefixed comments skipped.
pub fn load_from_text_file(path: &Path, priority: i64) -> Result<Vec<DiscoveredOrgnr>, AdapterError> {
    let raw = fs::read_to_string(path)?;

    let mut discovered = Vec::new();
    for line in raw.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match OrgNumber::parse(trimmed) {
            Ok(orgnr) => discovered.push(DiscoveredOrgnr { orgnr, priority }),
            Err(fault) => warn!("⚠️ [DISCOVERY]: skipping malformed orgnr '{}': {}", trimmed, fault),
        }
    }
    info!("📥 [DISCOVERY]: loaded {} orgnr(s) from {}", discovered.len(), path.display());
    Ok(discovered)
}

/// Dispatches on file extension between the JSON and line-delimited
/// loaders — mirrors the source's `seed/loader.py` `--file` dispatch.
pub fn load_from_file(path: &Path, default_priority: i64) -> Result<Vec<DiscoveredOrgnr>, AdapterError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => load_from_json_file(path, default_priority),
        _ => load_from_text_file(path, default_priority),
    }
}

/// Filters previously-seen orgnrs out of a freshly-loaded batch.
pub fn filter_unseen(batch: Vec<DiscoveredOrgnr>, already_known: &std::collections::HashSet<String>) -> Vec<DiscoveredOrgnr> {
    batch.into_iter().filter(|d| !already_known.contains(d.orgnr.as_str())).collect()
}

/// Filter set applied uniformly whether the source is a live endpoint or a
/// file: legal-form restriction and active-only toggle (§4.5.1).
#[derive(Debug, Clone, Default)]
pub struct DiscoveryFilters {
    pub legal_form_code: Option<String>,
    pub only_active: bool,
}

/// Placeholder for a live Discovery endpoint: the file-backed path above is
/// the default and is what the `seed` CLI command drives (§4.5.1). A live
/// adapter would implement `count_available`/`fetch_page`/`health_check`
/// against a paginated REST source; none is wired up because this
/// deployment only ever seeds from files.
pub struct LiveDiscoveryAdapter {
    pub max_page: u32,
}

impl LiveDiscoveryAdapter {
    pub fn new(max_page: u32) -> Self {
        Self { max_page }
    }

    pub async fn health_check(&self) -> bool {
        false
    }

    pub async fn count_available(&self, _filters: &DiscoveryFilters) -> Result<u64, AdapterError> {
        Err(AdapterError::Configuration("no live discovery endpoint configured".to_string()))
    }

    pub async fn fetch_page(
        &self,
        _offset: u32,
        limit: u32,
        _filters: &DiscoveryFilters,
    ) -> Result<Vec<DiscoveredOrgnr>, AdapterError> {
        if limit > self.max_page {
            return Err(AdapterError::Configuration(format!(
                "requested page size {limit} exceeds max_page {}",
                self.max_page
            )));
        }
        Err(AdapterError::Configuration("no live discovery endpoint configured".to_string()))
    }
}
