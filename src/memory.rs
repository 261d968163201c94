//! In-process [`ReservationStore`] used in place of MongoDB by the test suite.

use std::sync::atomic::{AtomicBool, Ordering};

use mongodb::bson::oid::ObjectId;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
    db::ReservationStore,
    errors::StoreError,
    models::{InsertAck, Reservation},
};

/// Keeps documents in insertion order, so "first match" is the oldest one.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<Vec<Reservation>>,
    failing: AtomicBool,
    closed: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation errors.
    pub fn failing() -> Self {
        let store = Self::default();
        store.set_failing(true);
        store
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".to_string()));
        }
        if self.is_closed() {
            return Err(StoreError::Unavailable("memory store closed".to_string()));
        }
        Ok(())
    }
}

fn has_email(document: &Reservation, email: &str) -> bool {
    document.get("email").and_then(Value::as_str) == Some(email)
}

#[rocket::async_trait]
impl ReservationStore for MemoryStore {
    async fn insert(&self, reservation: &Reservation) -> Result<InsertAck, StoreError> {
        self.check()?;

        let mut document = reservation.clone();
        let id = match document.get("_id") {
            Some(id) => id.clone(),
            None => {
                let id = Value::String(ObjectId::new().to_hex());
                document.insert("_id".to_string(), id.clone());
                id
            }
        };

        self.documents.write().await.push(document);
        Ok(InsertAck::new(id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Reservation>, StoreError> {
        self.check()?;

        Ok(self
            .documents
            .read()
            .await
            .iter()
            .filter(|document| has_email(document, email))
            .cloned()
            .collect())
    }

    async fn update_first(&self, email: &str, updates: &Reservation) -> Result<u64, StoreError> {
        self.check()?;

        let mut documents = self.documents.write().await;
        match documents.iter_mut().find(|document| has_email(document, email)) {
            Some(document) => {
                for (key, value) in updates {
                    document.insert(key.clone(), value.clone());
                }
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_first(&self, email: &str) -> Result<u64, StoreError> {
        self.check()?;

        let mut documents = self.documents.write().await;
        match documents.iter().position(|document| has_email(document, email)) {
            Some(index) => {
                documents.remove(index);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reservation(value: Value) -> Reservation {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    #[rocket::async_test]
    async fn insert_assigns_an_object_id() {
        let store = MemoryStore::new();
        let ack = store
            .insert(&reservation(json!({ "email": "a@x.com" })))
            .await
            .unwrap();

        let id = ack.inserted_id.as_str().unwrap();
        assert!(ObjectId::parse_str(id).is_ok());

        let found = store.find_by_email("a@x.com").await.unwrap();
        assert_eq!(found[0]["_id"], json!(id));
    }

    #[rocket::async_test]
    async fn update_touches_only_the_first_match() {
        let store = MemoryStore::new();
        store
            .insert(&reservation(json!({ "email": "a@x.com", "slot": 1 })))
            .await
            .unwrap();
        store
            .insert(&reservation(json!({ "email": "a@x.com", "slot": 2 })))
            .await
            .unwrap();

        let matched = store
            .update_first("a@x.com", &reservation(json!({ "status": "confirmed" })))
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let found = store.find_by_email("a@x.com").await.unwrap();
        let confirmed = found
            .iter()
            .filter(|doc| doc.get("status") == Some(&json!("confirmed")))
            .count();
        assert_eq!(confirmed, 1);
    }

    #[rocket::async_test]
    async fn delete_removes_one_document() {
        let store = MemoryStore::new();
        for slot in 0..2 {
            store
                .insert(&reservation(json!({ "email": "a@x.com", "slot": slot })))
                .await
                .unwrap();
        }

        assert_eq!(store.delete_first("a@x.com").await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.delete_first("a@x.com").await.unwrap(), 1);
        assert_eq!(store.delete_first("a@x.com").await.unwrap(), 0);
        assert!(store.is_empty().await);
    }

    #[rocket::async_test]
    async fn failing_store_errors_everywhere() {
        let store = MemoryStore::failing();

        assert!(store.insert(&Reservation::new()).await.is_err());
        assert!(store.find_by_email("a@x.com").await.is_err());
        assert!(store.update_first("a@x.com", &Reservation::new()).await.is_err());
        assert!(store.delete_first("a@x.com").await.is_err());
    }
}
