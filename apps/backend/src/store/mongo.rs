use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::error::{Error as MongoError, ErrorKind};
use mongodb::options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Database, IndexModel};
use tracing::{debug, info};

use super::{Collection, DocumentStore, StoreError, UpdateSummary};

/// MongoDB-backed store. Cloning shares the driver's connection pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect with the stable server API pinned to v1 and make sure the
    /// indexes the service relies on exist.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(uri).await.map_err(StoreError::from)?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.server_api = Some(
            ServerApi::builder()
                .version(ServerApiVersion::V1)
                .strict(true)
                .deprecation_errors(true)
                .build(),
        );

        let client = Client::with_options(options).map_err(StoreError::from)?;
        info!(database, "document store client created");

        let store = Self {
            db: client.database(database),
        };
        store.ensure_indexes().await?;
        Ok(store)
    }

    /// One account per email.
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection(Collection::Users).create_index(index).await?;
        debug!("users.email unique index ensured");
        Ok(())
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection::<Document>(collection.name())
    }
}

impl From<MongoError> for StoreError {
    fn from(e: MongoError) -> Self {
        match *e.kind {
            ErrorKind::ServerSelection { .. } => StoreError::Unavailable(e.to_string()),
            ErrorKind::InvalidArgument { .. } => StoreError::UnsupportedFilter(e.to_string()),
            ErrorKind::BsonDeserialization(_) | ErrorKind::BsonSerialization(_) => {
                StoreError::Malformed(e.to_string())
            }
            _ => StoreError::Query(e.to_string()),
        }
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn ping(&self) -> Result<(), StoreError> {
        self.db.run_command(doc! { "ping": 1 }).await?;
        debug!("document store ping ok");
        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn find_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn insert_one(
        &self,
        collection: Collection,
        document: Document,
    ) -> Result<ObjectId, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        result.inserted_id.as_object_id().ok_or_else(|| {
            StoreError::Malformed(format!(
                "inserted _id is not an ObjectId: {}",
                result.inserted_id
            ))
        })
    }

    async fn insert_if_absent(
        &self,
        collection: Collection,
        filter: Document,
        document: Document,
    ) -> Result<Option<ObjectId>, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$setOnInsert": document })
            .upsert(true)
            .await?;

        match result.upserted_id {
            None => Ok(None),
            Some(id) => id.as_object_id().map(Some).ok_or_else(|| {
                StoreError::Malformed(format!("upserted _id is not an ObjectId: {id}"))
            }),
        }
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: Document,
        set: Document,
    ) -> Result<UpdateSummary, StoreError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": set })
            .await?;
        Ok(UpdateSummary {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<u64, StoreError> {
        Ok(self
            .collection(collection)
            .delete_one(filter)
            .await?
            .deleted_count)
    }

    async fn delete_many(
        &self,
        collection: Collection,
        filter: Document,
    ) -> Result<u64, StoreError> {
        Ok(self
            .collection(collection)
            .delete_many(filter)
            .await?
            .deleted_count)
    }

    async fn count(&self, collection: Collection) -> Result<u64, StoreError> {
        Ok(self
            .collection(collection)
            .count_documents(doc! {})
            .await?)
    }
}
