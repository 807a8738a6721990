//! Design project tracking models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A design project followed by the console
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DesignProject {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub client: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: ProjectStatus,
    /// Completion percentage (0-100)
    #[serde(default)]
    pub progress: u8,
    pub is_active: bool,
}

/// Lifecycle of a design project
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Pending => "Pendiente",
            ProjectStatus::InProgress => "En progreso",
            ProjectStatus::Completed => "Completado",
            ProjectStatus::Cancelled => "Cancelado",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }
}

impl DesignProject {
    /// Whether the project is past its end date without being finished
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.status.is_terminal() && self.end_date.map(|end| end < today).unwrap_or(false)
    }
}
