// [libs/domain/models/src/job.rs]
/*!
 * =================================================================
 * APARATO: JOB DOMAIN MODELS (V1.0)
 * CLASIFICACIÓN: DOMAIN ENTITIES (ESTRATO L2)
 * RESPONSABILIDAD: DEFINICIÓN DEL CONTRATO SOBERANO DE LA COLA DE TRABAJO
 * =================================================================
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::orgnr::OrgNumber;

/// Posición de un Job en la tubería. El orden de las variantes es el orden
/// de ejecución: Registry no puede empezar hasta que Discovery haya comprometido.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Discovery,
    Registry,
    Graph,
    Scraped,
}

impl Stage {
    pub const ORDER: [Stage; 4] = [Stage::Discovery, Stage::Registry, Stage::Graph, Stage::Scraped];

    /// Next stage in pipeline order, or `None` if this is the last configured stage.
    pub fn next(self, enabled: &[Stage]) -> Option<Stage> {
        let position = enabled.iter().position(|s| *s == self)?;
        enabled.get(position + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Discovery => "discovery",
            Stage::Registry => "registry",
            Stage::Graph => "graph",
            Stage::Scraped => "scraped",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "discovery" => Ok(Stage::Discovery),
            "registry" => Ok(Stage::Registry),
            "graph" => Ok(Stage::Graph),
            "scraped" => Ok(Stage::Scraped),
            other => Err(format!("unknown stage '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
    Failed,
    Blocked,
    Skipped,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
            Status::Failed => "failed",
            Status::Blocked => "blocked",
            Status::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Status::Pending),
            "in_progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "failed" => Ok(Status::Failed),
            "blocked" => Ok(Status::Blocked),
            "skipped" => Ok(Status::Skipped),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// Blob JSON opaco escrito por un stage para consumo del siguiente.
pub type StagePayload = serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub orgnr: OrgNumber,
    pub stage: Stage,
    pub status: Status,
    pub priority: i64,
    pub attempts: i64,
    pub last_attempt: Option<DateTime<Utc>>,
    /// Keyed by `Stage::as_str()` — serde_json map keys must be strings.
    #[serde(default)]
    pub stage_payloads: HashMap<String, StagePayload>,
    pub error: Option<String>,
    pub cool_down_until: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Job {
    pub fn new(orgnr: OrgNumber, stage: Stage, priority: i64, now: DateTime<Utc>) -> Self {
        Self {
            orgnr,
            stage,
            status: Status::Pending,
            priority,
            attempts: 0,
            last_attempt: None,
            stage_payloads: HashMap::new(),
            error: None,
            cool_down_until: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn payload_for(&self, stage: Stage) -> Option<&StagePayload> {
        self.stage_payloads.get(stage.as_str())
    }

    pub fn set_payload(&mut self, stage: Stage, payload: StagePayload) {
        self.stage_payloads.insert(stage.as_str().to_string(), payload);
    }
}

/// Aggregate counts for `stats`, keyed `(stage, status)`.
pub type StageStatusCounts = HashMap<(Stage, Status), i64>;
