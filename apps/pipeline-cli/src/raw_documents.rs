// [apps/pipeline-cli/src/raw_documents.rs]
/*!
 * APARATO: RAW DOCUMENT SIDE OUTPUT (V1.0)
 * RESPONSABILIDAD: ARCHIVO OPCIONAL DE DOCUMENTOS DESCARGADOS (§6.3)
 */

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;

use sentinel_domain_models::OrgNumber;
use sentinel_shared_config::PipelineConfig;

/// Writes `<raw_doc_dir>/<orgnr_prefix_2>/<orgnr>.<ext>`, gzipped when
/// `compress_raw_docs` is set (§6.3). Filenames are stable and
/// collision-free: one orgnr yields at most one archived document per run.
pub fn persist_raw_document(config: &PipelineConfig, orgnr: &OrgNumber, file_format: &str, bytes: &[u8]) -> Result<PathBuf> {
    let root = config
        .raw_doc_dir
        .clone()
        .context("store_raw_docs is enabled but raw_doc_dir is not configured")?;

    let shard_dir = root.join(orgnr.prefix_2());
    fs::create_dir_all(&shard_dir).with_context(|| format!("failed to create {}", shard_dir.display()))?;

    let extension = file_format.trim_start_matches('.').to_lowercase();
    let extension = if extension.is_empty() { "bin".to_string() } else { extension };

    if config.compress_raw_docs {
        let path = shard_dir.join(format!("{orgnr}.{extension}.gz"));
        let file = fs::File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(bytes)?;
        encoder.finish()?;
        Ok(path)
    } else {
        let path = shard_dir.join(format!("{orgnr}.{extension}"));
        fs::write(&path, bytes).with_context(|| format!("failed to write {}", path.display()))?;
        Ok(path)
    }
}
