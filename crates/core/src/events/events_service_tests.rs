#[cfg(test)]
mod tests {
    use crate::errors::{Error, Result, StoreError, StoreResult, ValidationError};
    use crate::events::{Event, EventDependents, EventService, EventServiceTrait, EventType};
    use crate::session::{
        InMemoryAuthProvider, SessionScoped, SessionService, SessionServiceTrait, SignUpDetails,
    };
    use crate::store::{
        paths, CollectionPath, Document, DocumentPath, DocumentStore, Fields,
        InMemoryDocumentStore, Query, WriteBatch, WriteOp,
    };
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // --- Mocks ---

    /// In-memory store that records the order of writes and can be told to
    /// reject batch commits or single deletes.
    #[derive(Default)]
    struct RecordingStore {
        inner: InMemoryDocumentStore,
        log: Mutex<Vec<String>>,
        fail_commit: AtomicBool,
        fail_delete: AtomicBool,
    }

    impl RecordingStore {
        fn log(&self) -> Vec<String> {
            self.log.lock().unwrap().clone()
        }

        fn record(&self, entry: String) {
            self.log.lock().unwrap().push(entry);
        }
    }

    #[async_trait]
    impl DocumentStore for RecordingStore {
        async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
            self.inner.get(path).await
        }
        async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
            self.record(format!("set {}", path));
            self.inner.set(path, fields).await
        }
        async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
            self.inner.update(path, fields).await
        }
        async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(StoreError::DeleteFailed(path.to_string()));
            }
            self.record(format!("delete {}", path));
            self.inner.delete(path).await
        }
        async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
            self.inner.list(collection).await
        }
        async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
            self.inner.query(query).await
        }
        async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
            if self.fail_commit.load(Ordering::SeqCst) {
                return Err(StoreError::BatchFailed("rejected".to_string()));
            }
            self.record(format!("commit {}", batch.len()));
            self.inner.commit(batch).await
        }
    }

    /// Reports every document of one collection as a child of any event.
    struct CollectionDependent {
        store: Arc<dyn DocumentStore>,
        collection: CollectionPath,
        forgotten: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EventDependents for CollectionDependent {
        async fn dependent_deletes(
            &self,
            _identity_id: &str,
            _event_id: &str,
        ) -> Result<Vec<WriteOp>> {
            let documents = self.store.list(&self.collection).await?;
            Ok(documents
                .into_iter()
                .map(|document| WriteOp::Delete {
                    path: document.path,
                })
                .collect())
        }

        fn forget_event(&self, event_id: &str) {
            self.forgotten.lock().unwrap().push(event_id.to_string());
        }
    }

    struct Fixture {
        store: Arc<RecordingStore>,
        session: Arc<SessionService>,
        dependent: Arc<CollectionDependent>,
        service: EventService,
        uid: String,
    }

    async fn fixture() -> Fixture {
        let store = Arc::new(RecordingStore::default());
        let session = Arc::new(SessionService::new(
            Arc::new(InMemoryAuthProvider::new()),
            store.clone(),
            Duration::from_secs(15),
        ));
        session
            .sign_up(SignUpDetails::from_form(
                "ada@example.com",
                "secret1",
                "Ada",
                Utc::now(),
            ))
            .await
            .unwrap();
        let uid = session.current_identity().unwrap().uid;

        let dependent = Arc::new(CollectionDependent {
            store: store.clone(),
            collection: CollectionPath::root("children"),
            forgotten: Mutex::new(Vec::new()),
        });
        let dependents: Vec<Arc<dyn EventDependents>> = vec![dependent.clone()];
        let service = EventService::new(store.clone(), session.clone(), dependents);
        Fixture {
            store,
            session,
            dependent,
            service,
            uid,
        }
    }

    fn party(day: u32) -> Event {
        Event::new(
            "Party",
            EventType::Party,
            Utc.with_ymd_and_hms(2025, 7, day, 20, 0, 0).unwrap(),
        )
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_add_then_list() {
        let f = fixture().await;
        let event = party(4);
        f.service.add(&f.uid, event.clone()).await.unwrap();

        assert_eq!(f.service.current_events(), vec![event.clone()]);
        assert_eq!(f.service.list(&f.uid).await.unwrap(), vec![event]);
    }

    #[tokio::test]
    async fn test_add_rejects_blank_name() {
        let f = fixture().await;
        let mut event = party(4);
        event.name = "  ".to_string();

        let err = f.service.add(&f.uid, event).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyField(_))
        ));
        assert!(f.service.list(&f.uid).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_cache_untouched() {
        let f = fixture().await;
        f.service.add(&f.uid, party(4)).await.unwrap();

        f.store.fail_commit.store(true, Ordering::SeqCst);
        f.store.fail_delete.store(true, Ordering::SeqCst);
        let existing = f.service.current_events()[0].clone();
        assert!(f.service.delete(&f.uid, &existing).await.is_err());
        assert_eq!(f.service.current_events().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_commits_children_before_parent() {
        let f = fixture().await;
        let event = party(4);
        f.service.add(&f.uid, event.clone()).await.unwrap();
        for id in ["c1", "c2"] {
            f.store
                .set(&CollectionPath::root("children").doc(id), Fields::new())
                .await
                .unwrap();
        }

        f.service.delete(&f.uid, &event).await.unwrap();

        let event_path = paths::events_collection(&f.uid).doc(&event.id);
        let log = f.store.log();
        let commit_at = log.iter().position(|entry| entry == "commit 2").unwrap();
        let delete_at = log
            .iter()
            .position(|entry| *entry == format!("delete {}", event_path))
            .unwrap();
        assert!(commit_at < delete_at);

        assert!(f.store.list(&CollectionPath::root("children")).await.unwrap().is_empty());
        assert!(f.store.get(&event_path).await.unwrap().is_none());
        assert!(f.service.current_events().is_empty());
        assert_eq!(*f.dependent.forgotten.lock().unwrap(), vec![event.id.clone()]);
    }

    #[tokio::test]
    async fn test_failed_child_batch_keeps_parent() {
        let f = fixture().await;
        let event = party(4);
        f.service.add(&f.uid, event.clone()).await.unwrap();
        f.store
            .set(&CollectionPath::root("children").doc("c1"), Fields::new())
            .await
            .unwrap();
        f.store.fail_commit.store(true, Ordering::SeqCst);

        let err = f.service.delete(&f.uid, &event).await.unwrap_err();
        assert!(matches!(err, Error::Store(StoreError::BatchFailed(_))));

        let event_path = paths::events_collection(&f.uid).doc(&event.id);
        assert!(f.store.get(&event_path).await.unwrap().is_some());
        assert_eq!(f.store.list(&CollectionPath::root("children")).await.unwrap().len(), 1);
        assert_eq!(f.service.current_events(), vec![event]);
        assert!(f.dependent.forgotten.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_without_children_skips_batch() {
        let f = fixture().await;
        let event = party(4);
        f.service.add(&f.uid, event.clone()).await.unwrap();

        f.service.delete(&f.uid, &event).await.unwrap();
        assert!(!f.store.log().iter().any(|entry| entry.starts_with("commit")));
    }

    #[tokio::test]
    async fn test_other_identity_is_rejected() {
        let f = fixture().await;
        let err = f.service.list("someone-else").await.unwrap_err();
        assert!(matches!(err, Error::IdentityMismatch { .. }));

        f.session.sign_out().await.unwrap();
        let err = f.service.add(&f.uid, party(4)).await.unwrap_err();
        assert!(matches!(err, Error::NotSignedIn));
    }

    #[tokio::test]
    async fn test_events_on_uses_calendar_day() {
        let f = fixture().await;
        f.service.add(&f.uid, party(4)).await.unwrap();
        f.service.add(&f.uid, party(4)).await.unwrap();
        f.service.add(&f.uid, party(5)).await.unwrap();

        let day = NaiveDate::from_ymd_opt(2025, 7, 4).unwrap();
        assert_eq!(f.service.events_on(day).len(), 2);
        let empty = NaiveDate::from_ymd_opt(2025, 7, 6).unwrap();
        assert!(f.service.events_on(empty).is_empty());
    }

    #[tokio::test]
    async fn test_clear_session_data_empties_cache() {
        let f = fixture().await;
        f.service.add(&f.uid, party(4)).await.unwrap();

        f.service.clear_session_data();
        assert!(f.service.current_events().is_empty());
    }
}
