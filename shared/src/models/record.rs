//! Incoming (stock entry) and Outgoing (stock exit) records

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use super::{Movement, SoftDeletable, Storage};
use crate::types::QueryKey;

/// Which side of a stock movement a record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Incoming,
    Outgoing,
}

impl RecordKind {
    /// Backend resource prefix
    pub fn resource(&self) -> &'static str {
        match self {
            RecordKind::Incoming => "incoming",
            RecordKind::Outgoing => "outgoing",
        }
    }

    /// Path of the create endpoint (record plus its movements)
    pub fn create_path(&self) -> &'static str {
        match self {
            RecordKind::Incoming => "/incoming/create/incomingStorage",
            RecordKind::Outgoing => "/outgoing/create/outgoingStorage",
        }
    }

    /// The other half of a transference
    pub fn opposite(&self) -> RecordKind {
        match self {
            RecordKind::Incoming => RecordKind::Outgoing,
            RecordKind::Outgoing => RecordKind::Incoming,
        }
    }

    /// User-facing name used in toasts
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Incoming => "Entrada",
            RecordKind::Outgoing => "Salida",
        }
    }

    pub fn list_key(&self) -> QueryKey {
        match self {
            RecordKind::Incoming => QueryKey::Incomes,
            RecordKind::Outgoing => QueryKey::Outcomes,
        }
    }

    pub fn detailed_key(&self) -> QueryKey {
        match self {
            RecordKind::Incoming => QueryKey::DetailedIncomes,
            RecordKind::Outgoing => QueryKey::DetailedOutcomes,
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.resource())
    }
}

/// Common behaviour of Incoming and Outgoing records
pub trait MovementRecord:
    SoftDeletable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Record with its movements, as returned by the detailed endpoints
    type Detailed: SoftDeletable + Clone + Serialize + DeserializeOwned + Send + Sync + 'static;

    const KIND: RecordKind;

    fn is_transference(&self) -> bool;

    /// Id of the paired record on the other side of a transference
    fn paired_id(&self) -> Option<&str>;
}

/// A stock entry into a warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Incoming {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub storage_id: String,
    pub date: DateTime<Utc>,
    /// `true` once the entry is consummated, `false` while in process
    pub state: bool,
    /// Paired Outgoing id when this entry is one half of a transference
    pub reference_id: Option<String>,
    #[serde(default)]
    pub is_transference: bool,
    pub is_active: bool,
}

/// A stock exit from a warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Outgoing {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    /// Source warehouse
    pub storage_id: String,
    pub date: DateTime<Utc>,
    pub state: bool,
    pub reference_id: Option<String>,
    /// Paired Incoming id when generated as a transference
    pub incoming_id: Option<String>,
    #[serde(default)]
    pub is_transference: bool,
    pub is_active: bool,
}

/// Incoming with its movements and warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IncomingDetailed {
    #[serde(flatten)]
    pub record: Incoming,
    #[serde(default)]
    pub movements: Vec<Movement>,
    pub storage: Option<Storage>,
}

/// Outgoing with its movements and warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutgoingDetailed {
    #[serde(flatten)]
    pub record: Outgoing,
    #[serde(default)]
    pub movements: Vec<Movement>,
    pub storage: Option<Storage>,
}

impl SoftDeletable for IncomingDetailed {
    fn id(&self) -> &str {
        &self.record.id
    }

    fn is_active(&self) -> bool {
        self.record.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.record.is_active = active;
    }
}

impl SoftDeletable for OutgoingDetailed {
    fn id(&self) -> &str {
        &self.record.id
    }

    fn is_active(&self) -> bool {
        self.record.is_active
    }

    fn set_active(&mut self, active: bool) {
        self.record.is_active = active;
    }
}

impl MovementRecord for Incoming {
    type Detailed = IncomingDetailed;

    const KIND: RecordKind = RecordKind::Incoming;

    fn is_transference(&self) -> bool {
        self.is_transference
    }

    fn paired_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }
}

impl MovementRecord for Outgoing {
    type Detailed = OutgoingDetailed;

    const KIND: RecordKind = RecordKind::Outgoing;

    fn is_transference(&self) -> bool {
        self.is_transference
    }

    fn paired_id(&self) -> Option<&str> {
        self.incoming_id.as_deref()
    }
}
