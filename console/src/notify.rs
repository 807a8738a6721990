//! Toast notifications
//!
//! Services report the outcome of every stage as a toast. Toasts raised
//! while serving one request are collected in a `ToastLog` and returned to
//! the browser alongside the response data.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use shared::messages::UNAUTHORIZED_RESET_DELAY_MS;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    /// Delay before the originating form may reset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reset_form_after_ms: Option<u64>,
}

/// Toasts raised while serving one request
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, toast: Toast) {
        match toast.level {
            ToastLevel::Success => tracing::info!(message = %toast.message, "toast"),
            ToastLevel::Warning => tracing::warn!(message = %toast.message, "toast"),
            ToastLevel::Error => tracing::warn!(message = %toast.message, "error toast"),
        }
        if let Ok(mut toasts) = self.toasts.lock() {
            toasts.push(toast);
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Toast {
            level: ToastLevel::Success,
            message: message.into(),
            reset_form_after_ms: None,
        });
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(Toast {
            level: ToastLevel::Warning,
            message: message.into(),
            reset_form_after_ms: None,
        });
    }

    /// Error toast for a failed backend call
    pub fn api_error(&self, err: &ApiError) {
        self.push(Toast {
            level: ToastLevel::Error,
            message: err.user_message(),
            reset_form_after_ms: err
                .is_authorization()
                .then_some(UNAUTHORIZED_RESET_DELAY_MS),
        });
    }

    pub fn snapshot(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|toasts| toasts.clone())
            .unwrap_or_default()
    }

    /// Take every toast raised so far
    pub fn drain(&self) -> Vec<Toast> {
        self.toasts
            .lock()
            .map(|mut toasts| std::mem::take(&mut *toasts))
            .unwrap_or_default()
    }
}
