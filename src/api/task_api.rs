use actix_web::{
    delete, get, patch, post, web,
    web::{Data, Json, Path},
    HttpResponse,
};

use crate::models::error_model::ApiErrorType;
use crate::models::task_query::TaskQuery;
use crate::models::task_request::{CreateTaskRequest, UpdateTaskRequest};
use crate::repository::task_repo::TaskRepository;
use crate::services::task_service;

pub fn init_task_api(cfg: &mut web::ServiceConfig) {
    cfg.service(create_task);
    cfg.service(get_task);
    cfg.service(update_task);
    cfg.service(delete_task);
    cfg.service(get_all_tasks);
}

#[post("/tasks")]
pub async fn create_task(
    repo: Data<TaskRepository>,
    new_task: Json<CreateTaskRequest>,
) -> Result<HttpResponse, ApiErrorType> {
    task_service::create_task(&repo, new_task).await
}

#[get("/tasks/{id}")]
pub async fn get_task(
    repo: Data<TaskRepository>,
    path: Path<String>,
) -> Result<HttpResponse, ApiErrorType> {
    task_service::get_task_by_id(&repo, path).await
}

#[patch("/tasks/{id}")]
pub async fn update_task(
    repo: Data<TaskRepository>,
    path: Path<String>,
    update_task: Json<UpdateTaskRequest>,
) -> Result<HttpResponse, ApiErrorType> {
    task_service::update_task(&repo, path, update_task).await
}

#[delete("/tasks/{id}")]
pub async fn delete_task(
    repo: Data<TaskRepository>,
    path: Path<String>,
) -> Result<HttpResponse, ApiErrorType> {
    task_service::delete_task(&repo, path).await
}

#[get("/tasks")]
pub async fn get_all_tasks(
    repo: Data<TaskRepository>,
    query: web::Query<TaskQuery>,
) -> Result<HttpResponse, ApiErrorType> {
    task_service::get_all_tasks(&repo, &query.0).await
}
