// ═══════════════════════════════════════════════════════════════════
// Storage Tests — file format, StorageManager, in-memory store
// ═══════════════════════════════════════════════════════════════════

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use janus_core::errors::CoreError;
use janus_core::models::ledger::Ledger;
use janus_core::models::page::PageRequest;
use janus_core::models::transaction::{NormalizedTransaction, TransactionType};
use janus_core::storage::format::{self, CURRENT_VERSION, MAGIC, MIN_HEADER_SIZE};
use janus_core::storage::manager::StorageManager;
use janus_core::storage::memory::InMemoryTransactionStore;
use janus_core::storage::traits::TransactionStore;

fn tx(batch: Uuid, row: usize, day: u32, kind: TransactionType, amount: Decimal) -> NormalizedTransaction {
    let trade = kind.is_trade();
    NormalizedTransaction {
        transaction_date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
        transaction_type: kind,
        ticker: kind.carries_ticker().then(|| "AAPL.US".to_string()),
        quantity: trade.then_some(dec!(10)),
        price: trade.then_some(dec!(150)),
        total_amount: kind.signed_amount(amount),
        commission: Decimal::ZERO,
        notes: None,
        import_batch_id: batch,
        source_label: kind.to_string(),
        source_id: Some(format!("{row}")),
        row_number: row,
    }
}

fn batch_of(batch: Uuid, days: &[u32]) -> Vec<NormalizedTransaction> {
    days.iter()
        .enumerate()
        .map(|(i, d)| tx(batch, i + 1, *d, TransactionType::Deposit, dec!(100)))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════
// File format
// ═══════════════════════════════════════════════════════════════════

mod file_format {
    use super::*;

    #[test]
    fn header_layout() {
        let bytes = format::write_file(CURRENT_VERSION, b"abc");
        assert_eq!(&bytes[0..4], MAGIC);
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), CURRENT_VERSION);
        assert_eq!(u64::from_le_bytes(bytes[6..14].try_into().unwrap()), 3);
        assert_eq!(bytes.len(), MIN_HEADER_SIZE + 3);
    }

    #[test]
    fn read_returns_payload() {
        let bytes = format::write_file(CURRENT_VERSION, b"payload");
        let (header, payload) = format::read_file(&bytes).unwrap();
        assert_eq!(header.version, CURRENT_VERSION);
        assert_eq!(header.payload_len, 7);
        assert_eq!(payload, b"payload");
    }

    #[test]
    fn too_small() {
        let err = format::read_file(b"JNUS").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn bad_magic() {
        let mut bytes = format::write_file(CURRENT_VERSION, b"x");
        bytes[0] = b'X';
        let err = format::read_file(&bytes).unwrap_err();
        assert!(err.to_string().contains("magic"));
    }

    #[test]
    fn future_version() {
        let bytes = format::write_file(CURRENT_VERSION + 1, b"x");
        assert!(matches!(
            format::read_file(&bytes).unwrap_err(),
            CoreError::UnsupportedVersion(v) if v == CURRENT_VERSION + 1
        ));
    }

    #[test]
    fn version_zero() {
        let bytes = format::write_file(0, b"x");
        assert!(matches!(format::read_file(&bytes).unwrap_err(), CoreError::UnsupportedVersion(0)));
    }

    #[test]
    fn truncated_payload() {
        let mut bytes = format::write_file(CURRENT_VERSION, b"hello");
        bytes.pop();
        assert!(matches!(format::read_file(&bytes).unwrap_err(), CoreError::InvalidFileFormat(_)));
    }

    #[test]
    fn trailing_bytes() {
        let mut bytes = format::write_file(CURRENT_VERSION, b"hello");
        bytes.push(0);
        assert!(matches!(format::read_file(&bytes).unwrap_err(), CoreError::InvalidFileFormat(_)));
    }
}

// ═══════════════════════════════════════════════════════════════════
// StorageManager
// ═══════════════════════════════════════════════════════════════════

mod manager {
    use super::*;

    async fn populated_ledger() -> Ledger {
        let store = InMemoryTransactionStore::new();
        let user = Uuid::new_v4();
        let batch = Uuid::new_v4();
        let mut rows = batch_of(batch, &[3, 4]);
        rows.push(tx(batch, 3, 5, TransactionType::Buy, dec!(1500)));
        store.insert_batch(user, batch, &rows).await.unwrap();
        store.snapshot().unwrap()
    }

    #[tokio::test]
    async fn bytes_preserve_the_ledger() {
        let ledger = populated_ledger().await;
        let bytes = StorageManager::save_to_bytes(&ledger).unwrap();
        assert_eq!(&bytes[0..4], MAGIC);
        let loaded = StorageManager::load_from_bytes(&bytes).unwrap();
        assert_eq!(loaded, ledger);
        assert_eq!(loaded.transaction_count(), 3);
    }

    #[tokio::test]
    async fn file_preserves_the_ledger() {
        let ledger = populated_ledger().await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("janus.ledger");
        StorageManager::save_to_file(&ledger, &path).unwrap();
        let loaded = StorageManager::load_from_file(&path).unwrap();
        assert_eq!(loaded, ledger);
    }

    #[test]
    fn missing_file_is_an_empty_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = StorageManager::load_from_file(dir.path().join("absent.ledger")).unwrap();
        assert_eq!(loaded, Ledger::new());
    }

    #[test]
    fn corrupt_payload_fails_to_deserialize() {
        let bytes = format::write_file(CURRENT_VERSION, &[0xff; 3]);
        let err = StorageManager::load_from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn empty_ledger_roundtrip() {
        let bytes = StorageManager::save_to_bytes(&Ledger::new()).unwrap();
        assert_eq!(StorageManager::load_from_bytes(&bytes).unwrap().batches.len(), 0);
    }
}

// ═══════════════════════════════════════════════════════════════════
// InMemoryTransactionStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn insert_assigns_one_id_per_row() {
        let store = InMemoryTransactionStore::new();
        let (user, batch) = (Uuid::new_v4(), Uuid::new_v4());
        let ids = store.insert_batch(user, batch, &batch_of(batch, &[1, 2, 3])).await.unwrap();
        assert_eq!(ids.len(), 3);
        assert_ne!(ids[0], ids[1]);

        let stored = store.batch_transactions(user, batch).await.unwrap();
        let stored_ids: Vec<_> = stored.iter().map(|t| t.id).collect();
        assert_eq!(stored_ids, ids);
        assert!(stored.iter().all(|t| t.user_id == user));
    }

    #[tokio::test]
    async fn same_batch_twice_is_rejected() {
        let store = InMemoryTransactionStore::new();
        let (user, batch) = (Uuid::new_v4(), Uuid::new_v4());
        store.insert_batch(user, batch, &batch_of(batch, &[1])).await.unwrap();
        let err = store.insert_batch(user, batch, &batch_of(batch, &[2])).await.unwrap_err();
        assert!(matches!(err, CoreError::DuplicateBatch(_)));
        assert_eq!(store.batch_transactions(user, batch).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn foreign_batch_id_rejects_everything() {
        let store = InMemoryTransactionStore::new();
        let (user, batch) = (Uuid::new_v4(), Uuid::new_v4());
        let mut rows = batch_of(batch, &[1, 2]);
        rows.push(tx(Uuid::new_v4(), 3, 3, TransactionType::Deposit, dec!(5)));
        let err = store.insert_batch(user, batch, &rows).await.unwrap_err();
        assert!(matches!(err, CoreError::ValidationError(_)));
        assert_eq!(store.snapshot().unwrap().transaction_count(), 0);
        assert!(store.list_batches(user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_recorded() {
        let store = InMemoryTransactionStore::new();
        let (user, batch) = (Uuid::new_v4(), Uuid::new_v4());
        assert!(store.insert_batch(user, batch, &[]).await.unwrap().is_empty());
        let batches = store.list_batches(user).await.unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].transaction_count, 0);
        assert_eq!(batches[0].first_date, None);
    }

    #[tokio::test]
    async fn users_are_isolated() {
        let store = InMemoryTransactionStore::new();
        let (alice, bob, batch) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        store.insert_batch(alice, batch, &batch_of(batch, &[1])).await.unwrap();

        let page = store.list_transactions(bob, PageRequest::default()).await.unwrap();
        assert_eq!(page.total_items, 0);
        assert!(matches!(
            store.batch_transactions(bob, batch).await.unwrap_err(),
            CoreError::BatchNotFound(_)
        ));
        assert!(matches!(
            store.delete_batch(bob, batch).await.unwrap_err(),
            CoreError::BatchNotFound(_)
        ));
        // The same batch id under another user is a different key.
        store.insert_batch(bob, batch, &batch_of(batch, &[2])).await.unwrap();
        assert_eq!(store.snapshot().unwrap().transaction_count(), 2);
    }

    #[tokio::test]
    async fn transactions_list_newest_first_and_paginate() {
        let store = InMemoryTransactionStore::new();
        let user = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        store.insert_batch(user, first, &batch_of(first, &[5, 1, 9])).await.unwrap();
        store.insert_batch(user, second, &batch_of(second, &[7, 3])).await.unwrap();

        let page = store
            .list_transactions(user, PageRequest::new(1, 2).unwrap())
            .await
            .unwrap();
        let days: Vec<_> = page.items.iter().map(|t| t.transaction.transaction_date.format("%d").to_string()).collect();
        assert_eq!(days, vec!["09", "07"]);
        assert_eq!(page.total_items, 5);
        assert_eq!(page.total_pages, 3);

        let last = store
            .list_transactions(user, PageRequest::new(3, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(last.items.len(), 1);
        assert_eq!(last.items[0].transaction.transaction_date.format("%d").to_string(), "01");

        let beyond = store
            .list_transactions(user, PageRequest::new(9, 2).unwrap())
            .await
            .unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_items, 5);
    }

    #[tokio::test]
    async fn batches_summarize_newest_first() {
        let store = InMemoryTransactionStore::new();
        let user = Uuid::new_v4();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();
        let mut rows = batch_of(first, &[4, 2]);
        rows.push(tx(first, 3, 8, TransactionType::Withdrawal, dec!(30)));
        store.insert_batch(user, first, &rows).await.unwrap();
        store.insert_batch(user, second, &batch_of(second, &[10])).await.unwrap();

        let batches = store.list_batches(user).await.unwrap();
        assert_eq!(batches[0].batch_id, second);
        assert_eq!(batches[1].batch_id, first);
        assert_eq!(batches[1].transaction_count, 3);
        assert_eq!(batches[1].first_date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(batches[1].last_date, NaiveDate::from_ymd_opt(2024, 1, 8));
        assert_eq!(batches[1].net_amount, dec!(170));
    }

    #[tokio::test]
    async fn delete_removes_only_that_batch() {
        let store = InMemoryTransactionStore::new();
        let user = Uuid::new_v4();
        let keep = Uuid::new_v4();
        let doomed = Uuid::new_v4();
        store.insert_batch(user, keep, &batch_of(keep, &[1])).await.unwrap();
        store.insert_batch(user, doomed, &batch_of(doomed, &[2, 3])).await.unwrap();

        assert_eq!(store.delete_batch(user, doomed).await.unwrap(), 2);
        assert!(store.batch_transactions(user, doomed).await.is_err());
        assert_eq!(store.batch_transactions(user, keep).await.unwrap().len(), 1);
        assert!(matches!(
            store.delete_batch(user, doomed).await.unwrap_err(),
            CoreError::BatchNotFound(_)
        ));
    }

    #[tokio::test]
    async fn store_reopens_from_snapshot() {
        let store = InMemoryTransactionStore::new();
        let (user, batch) = (Uuid::new_v4(), Uuid::new_v4());
        store.insert_batch(user, batch, &batch_of(batch, &[1, 2])).await.unwrap();

        let bytes = StorageManager::save_to_bytes(&store.snapshot().unwrap()).unwrap();
        let reopened = InMemoryTransactionStore::from_ledger(StorageManager::load_from_bytes(&bytes).unwrap());
        assert_eq!(
            reopened.batch_transactions(user, batch).await.unwrap(),
            store.batch_transactions(user, batch).await.unwrap()
        );
    }
}
