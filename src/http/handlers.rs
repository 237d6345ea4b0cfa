use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::notification::RemoteNotification;
use crate::http::AppError;
use crate::AppState;

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: &'static str,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub unread_only: Option<bool>,
}

#[derive(Serialize)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListResponse<RemoteNotification>>, AppError> {
    let limit = query.limit.unwrap_or(50);
    if !(1..=200).contains(&limit) {
        return Err(AppError::bad_request("limit must be between 1 and 200"));
    }

    let items = state
        .api
        .fetch_all()
        .await
        .into_iter()
        .filter(|n| !query.unread_only.unwrap_or(false) || !n.read)
        .take(limit)
        .collect();

    Ok(Json(ListResponse { items }))
}

pub async fn mark_notification_read(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if state.api.set_read(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        tracing::debug!(notification_id = %id, "mark read for unknown notification");
        Err(AppError::not_found("notification not found"))
    }
}

pub async fn mark_all_notifications_read(State(state): State<AppState>) -> StatusCode {
    let updated = state.api.set_all_read().await;
    tracing::debug!(updated, "marked all notifications read");
    StatusCode::NO_CONTENT
}

pub async fn delete_notification(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if state.api.remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("notification not found"))
    }
}
