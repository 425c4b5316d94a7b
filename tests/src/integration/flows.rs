//! # Integration Test Flows
//!
//! Tests that gk-01 ordering, gk-02 import, gk-03 queue management and
//! gk-04 bulk transfer work together against one ledger node.
//!
//! ## Flows Tested:
//!
//! 1. **Anchoring cycle**: enqueue → create_batch → import → clear_batch
//! 2. **Causal precedence**: updates enqueued before their create still import cleanly
//! 3. **Chunked import**: counters summed across chunks, resumable after transport failure
//! 4. **Bulk transfer**: export → hash → import into a fresh node, and replay of recorded batches

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use serde_json::json;

    use gk_01_batch_ordering::{chunk, fingerprint_ordered, order_events, ChunkSize};
    use gk_02_batch_import::{BatchImportApi, BatchImporter, ImportConfig, ImportError, ImportOrchestrator};
    use gk_03_registry_queue::{BatchOutcome, QueueState, RegistryQueueApi, RegistryQueueManager};
    use gk_04_bulk_transfer::{BatchFile, BulkTransferApi, BulkTransferService};
    use shared_types::{ImportResult, LOCAL_REGISTRY};

    use crate::fixtures::{
        create_op, creates, event, update_op, FixedClock, InMemoryAssetStore, InMemoryLedgerNode,
    };

    const REGISTRY: &str = "hyperswarm";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Cluster {
        node: Arc<InMemoryLedgerNode>,
        assets: Arc<InMemoryAssetStore>,
        queue: RegistryQueueManager,
        importer: Arc<ImportOrchestrator>,
    }

    fn cluster(node: InMemoryLedgerNode, chunk_size: usize) -> Cluster {
        let node = Arc::new(node);
        let assets = Arc::new(InMemoryAssetStore::default());
        let config = ImportConfig {
            chunk_size,
            ..Default::default()
        };
        Cluster {
            queue: RegistryQueueManager::new(node.clone(), assets.clone()),
            importer: Arc::new(ImportOrchestrator::with_config(node.clone(), config)),
            node,
            assets,
        }
    }

    fn transfer(node: &Arc<InMemoryLedgerNode>, importer: &Arc<ImportOrchestrator>) -> BulkTransferService {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 7, 2, 9, 30, 0).unwrap());
        BulkTransferService::new(node.clone(), importer.clone()).with_clock(Arc::new(clock))
    }

    // =============================================================================
    // ANCHORING CYCLE
    // =============================================================================

    #[tokio::test]
    async fn test_full_anchoring_cycle() {
        let c = cluster(InMemoryLedgerNode::new(), 10);
        // Enqueued out of causal order.
        let queued = vec![
            event(REGISTRY, update_op("did:test:a", "2024-07-01T10:00:05Z"), 0),
            event(REGISTRY, create_op("did:test:b", "2024-07-01T10:00:03Z"), 1),
            event(REGISTRY, create_op("did:test:a", "2024-07-01T10:00:01Z"), 2),
        ];
        for e in &queued {
            c.queue.enqueue(REGISTRY, e).await.unwrap();
        }

        let BatchOutcome::Created { batch_id, events } = c.queue.create_batch(REGISTRY).await.unwrap() else {
            panic!("expected a batch");
        };
        assert_eq!(events, vec![queued[2].clone(), queued[1].clone(), queued[0].clone()]);
        assert_eq!(c.node.pending(REGISTRY).len(), 3);

        let anchored = c.queue.resolve_batch(&batch_id).await.unwrap();
        let result = c.importer.import_chunked(&anchored, 10).await.unwrap();
        assert_eq!(result, ImportResult::new(2, 1, 0));

        assert!(c.queue.clear_batch(REGISTRY, &batch_id).await.unwrap());
        assert!(c.node.pending(REGISTRY).is_empty());
        assert_eq!(
            c.queue.queue_state(REGISTRY, None).await.unwrap(),
            QueueState::Empty
        );
    }

    #[tokio::test]
    async fn test_empty_queue_creates_no_asset() {
        let c = cluster(InMemoryLedgerNode::new(), 10);

        let outcome = c.queue.create_batch(REGISTRY).await.unwrap();

        assert!(outcome.is_empty());
        assert_eq!(c.assets.writes(), 0);
    }

    #[tokio::test]
    async fn test_crash_between_snapshot_and_clear_keeps_events() {
        let c = cluster(InMemoryLedgerNode::new(), 10);
        for e in creates(REGISTRY, 3) {
            c.queue.enqueue(REGISTRY, &e).await.unwrap();
        }
        c.queue.create_batch(REGISTRY).await.unwrap();

        // A fresh manager (process restart) snapshots again without clearing.
        let restarted = RegistryQueueManager::new(c.node.clone(), c.assets.clone());
        let again = restarted.create_batch(REGISTRY).await.unwrap();

        let BatchOutcome::Created { events, .. } = again else {
            panic!("expected a batch");
        };
        assert_eq!(events.len(), 3);
    }

    #[tokio::test]
    async fn test_events_enqueued_after_snapshot_survive_clear() {
        let c = cluster(InMemoryLedgerNode::new(), 10);
        let mut all = creates(REGISTRY, 3);
        let late = all.pop().unwrap();
        for e in &all {
            c.queue.enqueue(REGISTRY, e).await.unwrap();
        }
        let first = c.queue.create_batch(REGISTRY).await.unwrap();
        c.queue.enqueue(REGISTRY, &late).await.unwrap();

        assert!(c
            .queue
            .clear_batch(REGISTRY, first.batch_id().unwrap())
            .await
            .unwrap());

        assert_eq!(c.node.pending(REGISTRY), vec![late.clone()]);
        let BatchOutcome::Created { events, .. } = c.queue.create_batch(REGISTRY).await.unwrap() else {
            panic!("expected a batch");
        };
        assert_eq!(events, vec![late]);
    }

    #[tokio::test]
    async fn test_clear_is_idempotent_on_strict_node() {
        let c = cluster(InMemoryLedgerNode::strict(), 10);
        let events = creates(REGISTRY, 4);
        for e in &events {
            c.queue.enqueue(REGISTRY, e).await.unwrap();
        }

        assert!(c.queue.clear_queue(REGISTRY, &events).await.unwrap());
        assert!(c.queue.clear_queue(REGISTRY, &events).await.unwrap());
        assert!(c.node.pending(REGISTRY).is_empty());
    }

    // =============================================================================
    // CAUSAL PRECEDENCE
    // =============================================================================

    #[tokio::test]
    async fn test_unordered_import_fails_where_ordered_import_succeeds() {
        let queued = vec![
            event(REGISTRY, update_op("did:test:z", "2024-07-01T10:00:09Z"), 0),
            event(REGISTRY, create_op("did:test:z", "2024-07-01T10:00:01Z"), 1),
        ];

        let raw = InMemoryLedgerNode::new();
        let raw_result = raw.import_batch(&queued).await.unwrap();
        assert_eq!(raw_result.failed, 1);

        let c = cluster(InMemoryLedgerNode::new(), 10);
        let ordered = order_events(queued).unwrap();
        let result = c.importer.import_batch(&ordered).await.unwrap();
        assert_eq!(result, ImportResult::new(1, 1, 0));
        assert_eq!(c.node.history("did:test:z").len(), 2);
    }

    // =============================================================================
    // CHUNKED IMPORT
    // =============================================================================

    #[tokio::test]
    async fn test_twenty_three_events_in_chunks_of_ten() {
        let c = cluster(InMemoryLedgerNode::new(), 10);
        let events = creates(REGISTRY, 23);

        let report = c.importer.import_configured(&events).await.unwrap();

        assert_eq!(c.node.import_sizes(), vec![10, 10, 3]);
        assert_eq!(report.total, ImportResult::new(23, 0, 0));
        assert_eq!(report.chunks.len(), 3);
        assert_eq!(c.node.did_count(), 23);
    }

    #[tokio::test]
    async fn test_resume_exactly_the_failed_chunks() {
        let c = cluster(InMemoryLedgerNode::failing_imports([1]), 10);
        let events = creates(REGISTRY, 23);

        let err = c.importer.import_chunked(&events, 10).await.unwrap_err();
        let ImportError::ChunksFailed {
            imported,
            failed_chunks,
            ..
        } = err
        else {
            panic!("expected chunk failure");
        };
        assert_eq!(imported, ImportResult::new(10, 0, 0));
        assert_eq!(failed_chunks, vec![1, 2]);

        let size = ChunkSize::new(10).unwrap();
        let chunks = chunk(&events, size);
        let mut resumed = ImportResult::default();
        for index in failed_chunks {
            resumed += c.importer.import_batch(chunks[index]).await.unwrap();
        }

        assert_eq!(imported + resumed, ImportResult::new(23, 0, 0));
        assert_eq!(c.node.did_count(), 23);
    }

    // =============================================================================
    // BULK TRANSFER
    // =============================================================================

    #[tokio::test]
    async fn test_export_hash_and_import_into_fresh_node() {
        let source = cluster(InMemoryLedgerNode::new(), 10);
        let mut events = creates(REGISTRY, 5);
        events.push(event(REGISTRY, update_op("did:test:2", "2024-07-01T01:00:00Z"), 99));
        source.importer.import_batch(&order_events(events).unwrap()).await.unwrap();

        let exported = transfer(&source.node, &source.importer).export_all().await.unwrap();
        assert_eq!(exported.len(), 5);
        assert_eq!(exported[0].did, "did:test:0");
        let bundle: Vec<_> = exported.iter().map(|h| h.events.clone()).collect();

        let target = cluster(InMemoryLedgerNode::new(), 4);
        let service = transfer(&target.node, &target.importer);
        let hash = service.hash_file(BatchFile::Bundle(bundle.clone())).unwrap();
        let flat: Vec<_> = bundle.iter().rev().flatten().cloned().collect();
        assert_eq!(hash, fingerprint_ordered(&flat).unwrap());

        let result = service.import_file(BatchFile::Bundle(bundle)).await.unwrap();

        assert_eq!(result, ImportResult::new(5, 1, 0));
        assert_eq!(target.node.import_sizes(), vec![4, 2]);
        assert_eq!(target.node.history("did:test:2").len(), 2);
    }

    #[tokio::test]
    async fn test_replay_recorded_operations_into_local_registry() {
        let c = cluster(InMemoryLedgerNode::new(), 10);
        let recorded = json!([
            create_op("did:test:r", "2024-07-01T08:00:00Z"),
            update_op("did:test:r", "2024-07-01T08:00:01Z"),
        ]);
        let batch_id = c.assets.put(recorded);
        let service = transfer(&c.node, &c.importer);

        let payload = gk_03_registry_queue::AssetStore::resolve_asset(c.assets.as_ref(), &batch_id)
            .await
            .unwrap();
        let result = service.import_replay(&payload, None).await.unwrap();

        assert_eq!(result, ImportResult::new(1, 1, 0));
        let history = c.node.history("did:test:r");
        assert!(history.iter().all(|e| e.registry == LOCAL_REGISTRY));
        assert_eq!(history[0].time, "2024-07-02T09:30:00.000Z");
    }
}
