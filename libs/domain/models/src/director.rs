// [libs/domain/models/src/director.rs]
/*!
 * =================================================================
 * APARATO: DIRECTOR / ROLE DOMAIN MODELS (V1.0)
 * CLASIFICACIÓN: DOMAIN ENTITIES (ESTRATO L2)
 * RESPONSABILIDAD: NORMALIZACIÓN DE ROLES SUECOS Y DEDUPLICACIÓN DE NOMBRES
 *
 * El mapeo sueco→rol y el plegado de claves de nombre son compartidos por
 * el Document Extractor y el Scraped-Page Parser; viven aquí para que
 * ambos consumidores vean exactamente la misma tabla.
 * =================================================================
 */

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NormalizedRole {
    Ceo,
    ViceCeo,
    BoardChair,
    BoardMember,
    BoardAlternate,
    EmployeeRep,
    ExternalMember,
    Auditor,
    AuditorPrincipal,
    AuditorApproved,
    AuditorAuthorized,
    Unknown,
}

impl NormalizedRole {
    pub fn is_auditor_family(self) -> bool {
        matches!(
            self,
            NormalizedRole::Auditor
                | NormalizedRole::AuditorPrincipal
                | NormalizedRole::AuditorApproved
                | NormalizedRole::AuditorAuthorized
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PersonType {
    Person,
    Entity,
}

/// Swedish raw-role string to normalized-role table, exact match preferred.
/// Keys are lowercase; callers must lowercase before lookup.
static ROLE_TABLE: Lazy<HashMap<&'static str, NormalizedRole>> = Lazy::new(|| {
    HashMap::from([
        ("verkställande direktör", NormalizedRole::Ceo),
        ("vd", NormalizedRole::Ceo),
        ("vice verkställande direktör", NormalizedRole::ViceCeo),
        ("vice vd", NormalizedRole::ViceCeo),
        ("styrelseordförande", NormalizedRole::BoardChair),
        ("ordförande", NormalizedRole::BoardChair),
        ("styrelseledamot", NormalizedRole::BoardMember),
        ("ledamot", NormalizedRole::BoardMember),
        ("styrelsesuppleant", NormalizedRole::BoardAlternate),
        ("suppleant", NormalizedRole::BoardAlternate),
        ("arbetstagarrepresentant", NormalizedRole::EmployeeRep),
        ("extern ledamot", NormalizedRole::ExternalMember),
        ("revisor", NormalizedRole::Auditor),
        ("huvudansvarig revisor", NormalizedRole::AuditorPrincipal),
        ("godkänd revisor", NormalizedRole::AuditorApproved),
        ("auktoriserad revisor", NormalizedRole::AuditorAuthorized),
    ])
});

/// Exact match first, then substring (the raw string contains a known key,
/// or a known key contains the raw string) — mirrors the source's two-pass
/// lookup so short forms like "VD" and long forms both resolve.
pub fn normalize_role(raw: &str) -> NormalizedRole {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() {
        return NormalizedRole::Unknown;
    }
    if let Some(role) = ROLE_TABLE.get(lowered.as_str()) {
        return *role;
    }
    for (key, role) in ROLE_TABLE.iter() {
        if lowered.contains(key) {
            return *role;
        }
    }
    NormalizedRole::Unknown
}

/// Folds diacritics and punctuation so two spellings of the same name
/// collapse to the same dedup key: lowercase, å/ä→a, ö→o, é/è→e, ü→u,
/// `-` → space, whitespace collapsed.
pub fn name_key(full_name: &str) -> String {
    let lowered = full_name.to_lowercase().replace('-', " ");
    let folded: String = lowered
        .chars()
        .map(|c| match c {
            'å' | 'ä' => 'a',
            'ö' => 'o',
            'é' | 'è' => 'e',
            'ü' => 'u',
            other => other,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectorRecord {
    pub first_name: String,
    pub last_name: String,
    pub raw_role: String,
    pub normalized_role: NormalizedRole,
    pub person_type: PersonType,
    pub external_id: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub birth_year: Option<i32>,
    pub confidence: f64,
    pub source_field: String,
}

impl DirectorRecord {
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", last) => last.to_string(),
            (first, "") => first.to_string(),
            (first, last) => format!("{first} {last}"),
        }
    }

    pub fn name_normalized(&self) -> String {
        name_key(&self.full_name())
    }

    /// §4.3: start at 0.5, +0.25 both names present, +0.20 known role,
    /// +0.05 capitalized first name of length >= 2. Capped at 1.0.
    pub fn compute_confidence(&self) -> f64 {
        let mut score: f64 = 0.5;
        if !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty() {
            score += 0.25;
        }
        if self.normalized_role != NormalizedRole::Unknown {
            score += 0.20;
        }
        let starts_upper = self
            .first_name
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false);
        if starts_upper && self.first_name.chars().count() >= 2 {
            score += 0.05;
        }
        score.min(1.0)
    }
}
