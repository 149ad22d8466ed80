#[cfg(test)]
mod tests {
    use crate::errors::{Error, StoreError, StoreResult, ValidationError};
    use crate::events::EventDependents;
    use crate::guests::{GuestService, GuestServiceTrait, RsvpStatus};
    use crate::session::{
        InMemoryAuthProvider, SessionService, SessionServiceTrait, SignUpDetails,
    };
    use crate::store::{
        paths, CollectionPath, Document, DocumentPath, DocumentStore, Fields,
        InMemoryDocumentStore, Query, WriteBatch, WriteOp,
    };
    use async_trait::async_trait;
    use chrono::Utc;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    // --- Mocks ---

    #[derive(Default)]
    struct BatchCountingStore {
        inner: InMemoryDocumentStore,
        commits: AtomicUsize,
        reject_commits: AtomicBool,
    }

    #[async_trait]
    impl DocumentStore for BatchCountingStore {
        async fn get(&self, path: &DocumentPath) -> StoreResult<Option<Document>> {
            self.inner.get(path).await
        }
        async fn set(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
            self.inner.set(path, fields).await
        }
        async fn update(&self, path: &DocumentPath, fields: Fields) -> StoreResult<()> {
            self.inner.update(path, fields).await
        }
        async fn delete(&self, path: &DocumentPath) -> StoreResult<()> {
            self.inner.delete(path).await
        }
        async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
            self.inner.list(collection).await
        }
        async fn query(&self, query: &Query) -> StoreResult<Vec<Document>> {
            self.inner.query(query).await
        }
        async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
            if self.reject_commits.load(Ordering::SeqCst) {
                return Err(StoreError::BatchFailed("rejected".to_string()));
            }
            self.commits.fetch_add(1, Ordering::SeqCst);
            self.inner.commit(batch).await
        }
    }

    async fn setup() -> (Arc<BatchCountingStore>, Arc<SessionService>, GuestService, String) {
        let store = Arc::new(BatchCountingStore::default());
        let session = Arc::new(SessionService::new(
            Arc::new(InMemoryAuthProvider::new()),
            store.clone(),
            Duration::from_secs(15),
        ));
        session
            .sign_up(SignUpDetails::from_form(
                "host@example.com",
                "secret1",
                "Host",
                Utc::now(),
            ))
            .await
            .unwrap();
        let uid = session.current_identity().unwrap().uid;
        for event_id in ["e1", "e2"] {
            store
                .inner
                .set(&paths::events_collection(&uid).doc(event_id), Fields::new())
                .await
                .unwrap();
        }
        let service = GuestService::new(store.clone(), session.clone());
        (store, session, service, uid)
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_add_defaults_to_no_answer() {
        let (store, _session, service, uid) = setup().await;

        let guest = service.add(&uid, "e1", "  Lin  ").await.unwrap();
        assert_eq!(guest.name, "Lin");
        assert_eq!(guest.status, RsvpStatus::NoAnswer);

        let stored = store
            .get(&paths::invitations_collection(&uid, "e1").doc(&guest.id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.fields["status"], json!("no-answer"));
        assert_eq!(service.cached_guests("e1"), vec![guest]);
    }

    #[tokio::test]
    async fn test_every_mutation_is_one_batch() {
        let (store, _session, service, uid) = setup().await;

        let a = service.add(&uid, "e1", "Ana").await.unwrap();
        let b = service.add(&uid, "e1", "Ben").await.unwrap();
        service
            .update_status(&uid, "e1", &a.id, RsvpStatus::Attending)
            .await
            .unwrap();
        service.delete(&uid, "e1", &b.id).await.unwrap();

        assert_eq!(store.commits.load(Ordering::SeqCst), 4);
        let guests = service.fetch(&uid, "e1").await.unwrap();
        assert_eq!(guests.len(), 1);
        assert_eq!(guests[0].id, a.id);
        assert_eq!(guests[0].status, RsvpStatus::Attending);
    }

    #[tokio::test]
    async fn test_update_status_keeps_other_guests() {
        let (_store, _session, service, uid) = setup().await;
        let a = service.add(&uid, "e1", "Ana").await.unwrap();
        let b = service.add(&uid, "e1", "Ben").await.unwrap();
        let c = service.add(&uid, "e1", "Cy").await.unwrap();

        let updated = service
            .update_status(&uid, "e1", &b.id, RsvpStatus::NotAttending)
            .await
            .unwrap();
        assert_eq!(updated.status, RsvpStatus::NotAttending);

        let guests = service.fetch(&uid, "e1").await.unwrap();
        let ids: Vec<&str> = guests.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec![a.id.as_str(), b.id.as_str(), c.id.as_str()]);
        assert_eq!(guests[0].status, RsvpStatus::NoAnswer);
        assert_eq!(guests[2].status, RsvpStatus::NoAnswer);
    }

    #[tokio::test]
    async fn test_unknown_guest_is_not_found() {
        let (store, _session, service, uid) = setup().await;
        service.add(&uid, "e1", "Ana").await.unwrap();
        let commits = store.commits.load(Ordering::SeqCst);

        let err = service
            .update_status(&uid, "e1", "ghost", RsvpStatus::Attending)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        let err = service.delete(&uid, "e1", "ghost").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(store.commits.load(Ordering::SeqCst), commits);
    }

    #[tokio::test]
    async fn test_blank_name_rejected() {
        let (_store, _session, service, uid) = setup().await;
        let err = service.add(&uid, "e1", "   ").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::EmptyField(_))
        ));
    }

    #[tokio::test]
    async fn test_add_requires_existing_event() {
        let (store, _session, service, uid) = setup().await;

        let err = service.add(&uid, "missing", "Ana").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(store.commits.load(Ordering::SeqCst), 0);
        assert!(service.cached_guests("missing").is_empty());
        assert!(store
            .list(&paths::invitations_collection(&uid, "missing"))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_rejected_batch_leaves_cache_and_store() {
        let (store, _session, service, uid) = setup().await;
        let a = service.add(&uid, "e1", "Ana").await.unwrap();
        store.reject_commits.store(true, Ordering::SeqCst);

        assert!(service.add(&uid, "e1", "Ben").await.is_err());
        assert_eq!(service.cached_guests("e1"), vec![a.clone()]);

        store.reject_commits.store(false, Ordering::SeqCst);
        assert_eq!(service.fetch(&uid, "e1").await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn test_lists_are_per_event() {
        let (_store, _session, service, uid) = setup().await;
        service.add(&uid, "e1", "Ana").await.unwrap();
        service.add(&uid, "e2", "Ben").await.unwrap();

        assert_eq!(service.fetch(&uid, "e1").await.unwrap().len(), 1);
        assert_eq!(service.fetch(&uid, "e2").await.unwrap()[0].name, "Ben");
    }

    #[tokio::test]
    async fn test_dependent_deletes_cover_all_invitations() {
        let (_store, _session, service, uid) = setup().await;
        let a = service.add(&uid, "e1", "Ana").await.unwrap();
        service.add(&uid, "e2", "Ben").await.unwrap();

        let ops = service.dependent_deletes(&uid, "e1").await.unwrap();
        assert_eq!(
            ops,
            vec![WriteOp::Delete {
                path: paths::invitations_collection(&uid, "e1").doc(&a.id)
            }]
        );

        service.forget_event("e1");
        assert!(service.cached_guests("e1").is_empty());
        assert_eq!(service.cached_guests("e2").len(), 1);
    }

    #[tokio::test]
    async fn test_sign_out_clears_guest_cache() {
        let (_store, session, service, uid) = setup().await;
        let service = Arc::new(service);
        session.register_scoped(service.clone());
        service.add(&uid, "e1", "Ana").await.unwrap();

        session.sign_out().await.unwrap();
        assert!(service.cached_guests("e1").is_empty());

        let err = service.fetch(&uid, "e1").await.unwrap_err();
        assert!(matches!(err, Error::NotSignedIn));
    }
}
