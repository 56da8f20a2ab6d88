use actix_web::web::{Data, Json, Path};
use actix_web::HttpResponse;
use log::{error, warn};
use mongodb::bson::oid::ObjectId;
use mongodb::error::Error;
use validator::Validate;

use crate::models::error_model::ApiErrorType;
use crate::models::task_model::Task;
use crate::models::task_query::TaskQuery;
use crate::models::task_request::{CreateTaskRequest, UpdateTaskRequest};
use crate::models::task_response::DeleteTaskResponse;
use crate::repository::task_repo::TaskRepository;
use crate::validation;

// Fetch tasks matching the optional filters, sorted and paginated.
// "No results" is an empty 200, never an error.
pub async fn get_all_tasks(
    repo: &Data<TaskRepository>,
    query: &TaskQuery,
) -> Result<HttpResponse, ApiErrorType> {
    let tasks = repo
        .find(query.filter(), query.find_options())
        .await
        .map_err(storage_error)?;
    Ok(HttpResponse::Ok().json(tasks))
}

// Validate, insert, and return the task as persisted under its new id.
pub async fn create_task(
    repo: &Data<TaskRepository>,
    new_task: Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiErrorType> {
    let task = Task::try_from(new_task.into_inner()).map_err(|err| {
        warn!("Payload validation error on create task: {}", err);
        ApiErrorType::ValidationError {
            validation_error: err,
            object: "Task".to_string(),
        }
    })?;

    match repo.insert_one(task).await {
        Ok(Some(created)) => Ok(HttpResponse::Created().json(created)),
        Ok(None) => Err(ApiErrorType::InternalServerError),
        Err(err) => Err(storage_error(err)),
    }
}

// Get a task by its unique task id.
pub async fn get_task_by_id(
    repo: &Data<TaskRepository>,
    path: Path<String>,
) -> Result<HttpResponse, ApiErrorType> {
    let id = validation::parse_task_id(&path.into_inner())?;
    let task = repo.find_one(&id).await.map_err(storage_error)?;
    handle_optional_task_response(task, &id)
}

// Apply a partial update to a task. Only the supplied fields change; the
// body runs through the same rule table as create with every rule optional.
pub async fn update_task(
    repo: &Data<TaskRepository>,
    path: Path<String>,
    update_task: Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiErrorType> {
    let id = validation::parse_task_id(&path.into_inner())?;
    let payload = update_task.into_inner();
    if let Err(err) = payload.validate() {
        warn!("Payload validation error on update task: {}", err);
        return Err(ApiErrorType::ValidationError {
            validation_error: err,
            object: "Task".to_string(),
        });
    }

    let fields = payload.into_set_document();
    if fields.is_empty() {
        // Nothing to set; an empty $set is a driver error, so degenerate to
        // an existence check.
        let task = repo.find_one(&id).await.map_err(storage_error)?;
        return handle_optional_task_response(task, &id);
    }

    let update_result = repo.update_one(&id, fields).await.map_err(storage_error)?;
    if update_result.matched_count == 0 {
        warn!("Task with id - {} not found to update task by ID", id);
        return Err(ApiErrorType::TaskNotFound);
    }

    let updated_task = repo.find_one(&id).await.map_err(storage_error)?;
    handle_optional_task_response(updated_task, &id)
}

// Delete a task by id, returning a snapshot of the deleted document as
// confirmation. The lookup and the delete are two round trips; a concurrent
// delete between them is an accepted race.
pub async fn delete_task(
    repo: &Data<TaskRepository>,
    path: Path<String>,
) -> Result<HttpResponse, ApiErrorType> {
    let id = validation::parse_task_id(&path.into_inner())?;

    let existing_task = repo.find_one(&id).await.map_err(storage_error)?;
    let Some(existing_task) = existing_task else {
        warn!("Task with id - {} not found for delete task by ID", id);
        return Err(ApiErrorType::TaskNotFound);
    };

    repo.delete_one(&id).await.map_err(storage_error)?;

    Ok(HttpResponse::Ok().json(DeleteTaskResponse {
        message: "Task successfully deleted".to_string(),
        deleted_task: existing_task,
    }))
}

fn handle_optional_task_response(
    task: Option<Task>,
    id: &ObjectId,
) -> Result<HttpResponse, ApiErrorType> {
    match task {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => {
            warn!("Task with id - {} not found", id);
            Err(ApiErrorType::TaskNotFound)
        }
    }
}

fn storage_error(err: Error) -> ApiErrorType {
    error!("Error: {}", err);
    ApiErrorType::StorageError {
        message: err.to_string(),
    }
}
