//! Recording fake of the inventory backend's mutation endpoints

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use inv_console::api::{RecordMutations, TransferWrites};
use inv_console::error::{ApiError, ApiResult};
use shared::forms::RecordPayload;
use shared::models::{Incoming, Outgoing, RecordKind};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Op {
    Remove,
    Reactivate,
    CreateOutgoing,
    CreateIncoming,
    Link,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Remove(RecordKind, Vec<String>),
    Reactivate(RecordKind, Vec<String>),
    CreateOutgoing(RecordPayload),
    CreateIncoming(RecordPayload),
    Link(String, String),
}

/// Records every call and fails the ones it was told to
#[derive(Default)]
pub struct FakeApi {
    calls: Mutex<Vec<Call>>,
    failures: Mutex<HashSet<(Op, Option<RecordKind>)>>,
    failure: Mutex<Option<ApiError>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `op` fail (optionally only for one record kind) with `error`
    pub fn fail(self, op: Op, kind: Option<RecordKind>, error: ApiError) -> Self {
        self.failures.lock().unwrap().insert((op, kind));
        *self.failure.lock().unwrap() = Some(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call, op: Op, kind: Option<RecordKind>) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        let failures = self.failures.lock().unwrap();
        if failures.contains(&(op.clone(), kind)) || failures.contains(&(op, None)) {
            let error = self
                .failure
                .lock()
                .unwrap()
                .clone()
                .unwrap_or(ApiError::Transport("down".into()));
            return Err(error);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordMutations for FakeApi {
    async fn remove_records(&self, kind: RecordKind, ids: &[String]) -> ApiResult<()> {
        self.record(Call::Remove(kind, ids.to_vec()), Op::Remove, Some(kind))
    }

    async fn reactivate_records(&self, kind: RecordKind, ids: &[String]) -> ApiResult<()> {
        self.record(
            Call::Reactivate(kind, ids.to_vec()),
            Op::Reactivate,
            Some(kind),
        )
    }
}

#[async_trait]
impl TransferWrites for FakeApi {
    async fn create_outgoing(&self, payload: &RecordPayload) -> ApiResult<Outgoing> {
        self.record(Call::CreateOutgoing(payload.clone()), Op::CreateOutgoing, None)?;
        Ok(Outgoing {
            id: "out-1".into(),
            name: payload.form.name.clone(),
            description: payload.form.description.clone(),
            storage_id: payload.form.storage_id.clone(),
            date: payload.form.date,
            state: payload.form.state,
            reference_id: None,
            incoming_id: None,
            is_transference: payload.is_transference,
            is_active: true,
        })
    }

    async fn create_incoming(&self, payload: &RecordPayload) -> ApiResult<Incoming> {
        self.record(Call::CreateIncoming(payload.clone()), Op::CreateIncoming, None)?;
        Ok(Incoming {
            id: "in-1".into(),
            name: payload.form.name.clone(),
            description: payload.form.description.clone(),
            storage_id: payload.form.storage_id.clone(),
            date: payload.form.date,
            state: payload.form.state,
            reference_id: payload.reference_id.clone(),
            is_transference: payload.is_transference,
            is_active: true,
        })
    }

    async fn link_transfer(&self, outgoing_id: &str, incoming_id: &str) -> ApiResult<Outgoing> {
        self.record(
            Call::Link(outgoing_id.into(), incoming_id.into()),
            Op::Link,
            None,
        )?;
        Ok(Outgoing {
            id: outgoing_id.into(),
            name: None,
            description: None,
            storage_id: "wh-origin".into(),
            date: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
            state: false,
            reference_id: None,
            incoming_id: Some(incoming_id.into()),
            is_transference: true,
            is_active: true,
        })
    }
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
