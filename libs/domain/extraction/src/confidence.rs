// [libs/domain/extraction/src/confidence.rs]
/*!
 * APARATO: OVERALL CONFIDENCE & DEDUPLICATION (V1.0)
 * RESPONSABILIDAD: PUNTUACIÓN GLOBAL Y COLAPSO DE DUPLICADOS (§4.3)
 *
 * Compartido por los tres métodos de extracción — la fórmula de confianza
 * global es única, independiente de qué método produjo los directores.
 */

use sentinel_domain_models::director::name_key;
use sentinel_domain_models::{DirectorRecord, NormalizedRole};
use std::collections::HashMap;

const CEO_BONUS: f64 = 0.10;
const BOARD_CHAIR_BONUS: f64 = 0.10;
const BOARD_MEMBER_BONUS: f64 = 0.05;
const TOO_FEW_DIRECTORS_THRESHOLD: usize = 2;
const TOO_FEW_DIRECTORS_PENALTY: f64 = 0.8;
const TOO_MANY_DIRECTORS_THRESHOLD: usize = 15;
const TOO_MANY_DIRECTORS_PENALTY: f64 = 0.7;

/// §4.3 "Overall confidence": zero if empty, else mean of per-director
/// confidences with role-presence bonuses and director-count penalties,
/// capped at 1.0.
pub fn overall_confidence(directors: &[DirectorRecord]) -> f64 {
    if directors.is_empty() {
        return 0.0;
    }

    let mean: f64 = directors.iter().map(|d| d.confidence).sum::<f64>() / directors.len() as f64;
    let mut score = mean;

    if directors.iter().any(|d| d.normalized_role == NormalizedRole::Ceo) {
        score += CEO_BONUS;
    }
    if directors.iter().any(|d| d.normalized_role == NormalizedRole::BoardChair) {
        score += BOARD_CHAIR_BONUS;
    }
    if directors.iter().any(|d| d.normalized_role == NormalizedRole::BoardMember) {
        score += BOARD_MEMBER_BONUS;
    }

    if directors.len() < TOO_FEW_DIRECTORS_THRESHOLD {
        score *= TOO_FEW_DIRECTORS_PENALTY;
    }
    if directors.len() > TOO_MANY_DIRECTORS_THRESHOLD {
        score *= TOO_MANY_DIRECTORS_PENALTY;
    }

    score.min(1.0)
}

/// Collapses directors sharing a folded name key, keeping the higher
/// confidence on conflict (§4.3 "Deduplication").
pub fn dedup_by_name_key(directors: Vec<DirectorRecord>) -> Vec<DirectorRecord> {
    let mut seen: HashMap<String, DirectorRecord> = HashMap::new();
    for director in directors {
        let key = name_key(&director.full_name());
        match seen.get(&key) {
            Some(existing) if existing.confidence >= director.confidence => {}
            _ => {
                seen.insert(key, director);
            }
        }
    }
    seen.into_values().collect()
}

/// §4.3 "Minimum-confidence filter": drop any director below the threshold.
pub fn filter_min_confidence(directors: Vec<DirectorRecord>, min_confidence: f64) -> Vec<DirectorRecord> {
    directors.into_iter().filter(|d| d.confidence >= min_confidence).collect()
}
