//! # Database connection module
//!
//! Reservations live in a single MongoDB collection. Handlers never touch the
//! driver directly: they go through a [`ReservationStore`] reached via the
//! [`StoreHandle`] that Rocket manages as state.
//!
//! ## Configuration
//!
//! - `MONGODB_URI`: MongoDB connection string. When it is missing or the
//!   server cannot be reached, the handle stays empty and every data route
//!   answers `Database not connected.`

use std::sync::Arc;

use anyhow::Context;
use mongodb::{
    Client, Collection,
    bson::{self, Document, doc},
};
use rocket::futures::TryStreamExt;
use tracing::{error, info, warn};

use crate::{
    errors::{ApiError, StoreError},
    models::{InsertAck, Reservation, bson_to_json, document_to_json},
};

pub const DATABASE_NAME: &str = "photography";
pub const COLLECTION_NAME: &str = "res";

/// The collection operations the router needs.
///
/// Update and delete touch at most one document, whichever the store
/// matches first.
#[rocket::async_trait]
pub trait ReservationStore: Send + Sync {
    async fn insert(&self, reservation: &Reservation) -> Result<InsertAck, StoreError>;

    async fn find_by_email(&self, email: &str) -> Result<Vec<Reservation>, StoreError>;

    /// Merges `updates` into the first document whose `email` matches.
    /// Returns the number of matched documents.
    async fn update_first(&self, email: &str, updates: &Reservation) -> Result<u64, StoreError>;

    /// Returns the number of deleted documents.
    async fn delete_first(&self, email: &str) -> Result<u64, StoreError>;

    async fn close(&self);
}

/// Shared handle to the store, absent when the startup connection failed.
#[derive(Clone, Default)]
pub struct StoreHandle(Option<Arc<dyn ReservationStore>>);

impl StoreHandle {
    pub fn new(store: Arc<dyn ReservationStore>) -> Self {
        Self(Some(store))
    }

    pub fn disconnected() -> Self {
        Self(None)
    }

    pub fn is_connected(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Result<&dyn ReservationStore, ApiError> {
        self.0.as_deref().ok_or(ApiError::NotConnected)
    }

    pub async fn close(&self) {
        if let Some(store) = &self.0 {
            store.close().await;
            info!("database connection closed");
        }
    }
}

pub struct MongoStore {
    client: Client,
    collection: Collection<Document>,
}

impl MongoStore {
    /// Parses `uri`, pings the server and binds the reservation collection.
    pub async fn connect(uri: &str) -> anyhow::Result<Self> {
        let client = Client::with_uri_str(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to ping MongoDB")?;

        let collection = client
            .database(DATABASE_NAME)
            .collection::<Document>(COLLECTION_NAME);

        info!(
            database = DATABASE_NAME,
            collection = COLLECTION_NAME,
            "connected to MongoDB"
        );

        Ok(Self { client, collection })
    }
}

#[rocket::async_trait]
impl ReservationStore for MongoStore {
    async fn insert(&self, reservation: &Reservation) -> Result<InsertAck, StoreError> {
        let document = bson::to_document(reservation)?;
        let result = self.collection.insert_one(document).await?;

        Ok(InsertAck::new(bson_to_json(result.inserted_id)))
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Reservation>, StoreError> {
        let cursor = self.collection.find(doc! { "email": email }).await?;
        let documents: Vec<Document> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(document_to_json).collect())
    }

    async fn update_first(&self, email: &str, updates: &Reservation) -> Result<u64, StoreError> {
        let updates = bson::to_document(updates)?;
        let result = self
            .collection
            .update_one(doc! { "email": email }, doc! { "$set": updates })
            .await?;

        Ok(result.matched_count)
    }

    async fn delete_first(&self, email: &str) -> Result<u64, StoreError> {
        let result = self.collection.delete_one(doc! { "email": email }).await?;

        Ok(result.deleted_count)
    }

    async fn close(&self) {
        self.client.clone().shutdown().await;
    }
}

/// Best-effort startup connection. Failure leaves the handle empty.
pub async fn connect(uri: Option<&str>) -> StoreHandle {
    let Some(uri) = uri else {
        warn!("MONGODB_URI is not set, serving without a database");
        return StoreHandle::disconnected();
    };

    match MongoStore::connect(uri).await {
        Ok(store) => StoreHandle::new(Arc::new(store)),
        Err(e) => {
            error!(error = ?e, "failed to connect to MongoDB, serving without a database");
            StoreHandle::disconnected()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    #[rocket::async_test]
    async fn empty_handle_reports_not_connected() {
        let handle = StoreHandle::disconnected();

        assert!(!handle.is_connected());
        assert!(matches!(handle.get(), Err(ApiError::NotConnected)));
    }

    #[rocket::async_test]
    async fn missing_uri_leaves_handle_empty() {
        assert!(!connect(None).await.is_connected());
    }

    #[rocket::async_test]
    async fn unparseable_uri_leaves_handle_empty() {
        assert!(!connect(Some("not-a-mongodb-uri")).await.is_connected());
    }

    #[rocket::async_test]
    async fn close_reaches_the_store() {
        let store = Arc::new(MemoryStore::new());
        let handle = StoreHandle::new(store.clone());

        assert!(handle.is_connected());
        handle.close().await;
        assert!(store.is_closed());
    }
}
