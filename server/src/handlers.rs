//! Route handlers. Each one opens a store session, runs a single store
//! operation and maps the result to a response; the session is dropped on
//! return, including on the `?` paths.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::{debug, info};

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::models::{NewTodo, Pagination, TodoPatch, TodoResponse, Welcome};
use crate::store::Store;

pub const WELCOME_MESSAGE: &str = "Welcome to Simpei Todo API";

pub async fn read_root() -> Json<Welcome> {
    Json(Welcome {
        message: WELCOME_MESSAGE.to_string(),
    })
}

pub async fn unknown_route() -> ApiError {
    ApiError::UnknownRoute
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

pub async fn create_todo(
    State(store): State<Store>,
    JsonBody(input): JsonBody<NewTodo>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiError> {
    input.validate()?;
    let mut session = store.session().await?;
    let item = session.insert(&input).await?;
    info!(id = item.id, "created todo item");
    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn list_todos(
    State(store): State<Store>,
    QueryParams(pagination): QueryParams<Pagination>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let page = pagination.page();
    let mut session = store.session().await?;
    let items = session.list_all(page).await?;
    debug!(offset = page.offset, limit = page.limit, count = items.len(), "listed todo items");
    Ok(Json(items.into_iter().map(TodoResponse::from).collect()))
}

pub async fn get_todo(
    State(store): State<Store>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<TodoResponse>, ApiError> {
    let mut session = store.session().await?;
    let item = session.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(item.into()))
}

pub async fn update_todo(
    State(store): State<Store>,
    PathParam(id): PathParam<i64>,
    JsonBody(patch): JsonBody<TodoPatch>,
) -> Result<Json<TodoResponse>, ApiError> {
    let mut session = store.session().await?;
    let item = session.update(id, &patch).await?.ok_or(ApiError::NotFound)?;
    info!(id, fields = patch.changes().len(), "updated todo item");
    Ok(Json(item.into()))
}

pub async fn delete_todo(
    State(store): State<Store>,
    PathParam(id): PathParam<i64>,
) -> Result<StatusCode, ApiError> {
    let mut session = store.session().await?;
    if !session.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!(id, "deleted todo item");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_todos_by_status(
    State(store): State<Store>,
    PathParam(completed): PathParam<bool>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let mut session = store.session().await?;
    let items = session.list_by_status(completed).await?;
    debug!(completed, count = items.len(), "listed todo items by status");
    Ok(Json(items.into_iter().map(TodoResponse::from).collect()))
}
