use futures::TryStreamExt;
use mongodb::options::FindOptions;
use mongodb::{
    bson::doc,
    bson::oid::ObjectId,
    bson::Document,
    error::Error,
    results::{DeleteResult, UpdateResult},
    Collection,
};

use crate::models::task_model::Task;

/// Storage access for the `tasks` collection. Constructed once at startup
/// and shared across requests through actix app data.
#[derive(Clone)]
pub struct TaskRepository {
    collection: Collection<Task>,
}

impl TaskRepository {
    pub fn new(collection: Collection<Task>) -> Self {
        Self { collection }
    }

    // Run a filtered, sorted, paginated find and drain the cursor.
    pub async fn find(&self, filter: Document, options: FindOptions) -> Result<Vec<Task>, Error> {
        let mut cursor = self.collection.find(filter, options).await?;
        let mut tasks: Vec<Task> = Vec::new();
        while let Some(task) = cursor.try_next().await? {
            tasks.push(task);
        }
        Ok(tasks)
    }

    // Insert a new task and re-fetch it under the storage-assigned id.
    pub async fn insert_one(&self, new_task: Task) -> Result<Option<Task>, Error> {
        let result = self.collection.insert_one(new_task, None).await?;
        self.collection
            .find_one(doc! { "_id": result.inserted_id }, None)
            .await
    }

    pub async fn find_one(&self, id: &ObjectId) -> Result<Option<Task>, Error> {
        self.collection.find_one(doc! { "_id": *id }, None).await
    }

    // Partial field replacement; last write wins on each supplied field.
    pub async fn update_one(
        &self,
        id: &ObjectId,
        fields: Document,
    ) -> Result<UpdateResult, Error> {
        self.collection
            .update_one(doc! { "_id": *id }, doc! { "$set": fields }, None)
            .await
    }

    pub async fn delete_one(&self, id: &ObjectId) -> Result<DeleteResult, Error> {
        self.collection.delete_one(doc! { "_id": *id }, None).await
    }
}
