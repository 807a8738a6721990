//! Transfer creation tests
//!
//! - Exit is created first, entry points back at it, then the exit is linked
//! - A failed entry deactivates the orphaned exit
//! - A failed link still yields both halves, with a warning

mod common;

use chrono::{TimeZone, Utc};
use common::{ids, Call, FakeApi, Op};
use inv_console::cache::QueryCache;
use inv_console::error::ApiError;
use inv_console::notify::{ToastLevel, ToastLog};
use inv_console::services::TransferService;
use rust_decimal::Decimal;
use shared::forms::{MovementForm, TransferForm};
use shared::models::{Incoming, Outgoing, RecordKind};
use shared::types::QueryKey;
use validator::Validate;

fn transfer_form() -> TransferForm {
    TransferForm {
        name: Some("Reposición".into()),
        description: None,
        origin_storage_id: "wh-origin".into(),
        destination_storage_id: "wh-dest".into(),
        date: Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap(),
        movements: vec![MovementForm {
            product_id: "prod-1".into(),
            quantity: 5,
            buying_price: Some(Decimal::new(1250, 2)),
            date: None,
        }],
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_same_warehouse_is_rejected() {
        let mut form = transfer_form();
        assert!(form.validate().is_ok());

        form.destination_storage_id = form.origin_storage_id.clone();
        assert!(form.validate().is_err());
    }

    #[tokio::test]
    async fn test_transfer_creates_both_halves_in_order() {
        let api = FakeApi::new();
        let cache = QueryCache::new(true);
        cache.set(QueryKey::Outcomes.into(), &Vec::<Outgoing>::new());
        cache.set(QueryKey::Incomes.into(), &Vec::<Incoming>::new());
        cache.set(QueryKey::Stock.into(), &vec![1]);
        let toasts = ToastLog::new();

        let outcome = TransferService::new(&api, &cache, &toasts)
            .create_transfer(&transfer_form())
            .await
            .unwrap();

        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        match (&calls[0], &calls[1]) {
            (Call::CreateOutgoing(exit), Call::CreateIncoming(entry)) => {
                assert!(exit.is_transference);
                assert_eq!(exit.form.storage_id, "wh-origin");
                assert_eq!(exit.reference_id, None);

                assert!(entry.is_transference);
                assert_eq!(entry.form.storage_id, "wh-dest");
                assert_eq!(entry.reference_id.as_deref(), Some("out-1"));
            }
            other => panic!("unexpected calls: {:?}", other),
        }
        assert_eq!(calls[2], Call::Link("out-1".into(), "in-1".into()));

        assert!(outcome.linked);
        assert_eq!(outcome.outgoing.incoming_id.as_deref(), Some("in-1"));
        assert_eq!(outcome.incoming.reference_id.as_deref(), Some("out-1"));

        // New halves are in the cached lists, stock views are dropped
        let outcomes: Vec<Outgoing> = cache.get(&QueryKey::Outcomes.into()).unwrap();
        let incomes: Vec<Incoming> = cache.get(&QueryKey::Incomes.into()).unwrap();
        assert_eq!(outcomes.len(), 1);
        assert_eq!(incomes.len(), 1);
        assert!(!cache.contains(&QueryKey::Stock.into()));

        let toasts = toasts.drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Transferencia creada exitosamente");
    }

    #[tokio::test]
    async fn test_failed_entry_deactivates_exit() {
        let api = FakeApi::new().fail(
            Op::CreateIncoming,
            None,
            ApiError::Server {
                status: 400,
                message: "Stock insuficiente".into(),
            },
        );
        let cache = QueryCache::new(true);
        let toasts = ToastLog::new();

        let result = TransferService::new(&api, &cache, &toasts)
            .create_transfer(&transfer_form())
            .await;

        assert!(result.is_err());
        let calls = api.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2], Call::Remove(RecordKind::Outgoing, ids(&["out-1"])));

        let toasts = toasts.drain();
        assert_eq!(toasts[0].level, ToastLevel::Error);
        assert_eq!(toasts[0].message, "Stock insuficiente");
        assert_eq!(toasts[1].level, ToastLevel::Warning);
    }

    #[tokio::test]
    async fn test_failed_exit_sends_nothing_else() {
        let api = FakeApi::new().fail(Op::CreateOutgoing, None, ApiError::Unauthorized);
        let cache = QueryCache::new(true);
        let toasts = ToastLog::new();

        let result = TransferService::new(&api, &cache, &toasts)
            .create_transfer(&transfer_form())
            .await;

        assert_eq!(result.unwrap_err(), ApiError::Unauthorized);
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_link_still_succeeds() {
        let api = FakeApi::new().fail(Op::Link, None, ApiError::Transport("timeout".into()));
        let cache = QueryCache::new(true);
        let toasts = ToastLog::new();

        let outcome = TransferService::new(&api, &cache, &toasts)
            .create_transfer(&transfer_form())
            .await
            .unwrap();

        assert!(!outcome.linked);
        assert_eq!(outcome.outgoing.incoming_id.as_deref(), Some("in-1"));

        let levels: Vec<ToastLevel> = toasts.drain().into_iter().map(|t| t.level).collect();
        assert_eq!(levels, vec![ToastLevel::Warning, ToastLevel::Success]);
    }
}
