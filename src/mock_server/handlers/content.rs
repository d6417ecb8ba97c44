//! Content endpoint handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::mock_server::state::{FieldFilter, ListCriteria, MockState, SortOrder};
use crate::{ContentStatus, EntityCollection};

type SharedState = Arc<RwLock<MockState>>;

/// Query parameters for listing content.
#[derive(Debug, Default, Deserialize)]
pub struct ListContentQuery {
    #[serde(rename = "$skip")]
    pub skip: Option<usize>,
    #[serde(rename = "$top")]
    pub top: Option<usize>,
    #[serde(rename = "$orderby")]
    pub order_by: Option<String>,
    #[serde(rename = "$search")]
    pub search: Option<String>,
    #[serde(rename = "$filter")]
    pub filter: Option<String>,
}

/// Reject the request unless it carries the required bearer token.
///
/// Failures answer 401 with an empty body.
fn authorize(state: &MockState, headers: &HeaderMap) -> Option<Response> {
    let required = state.required_token.as_deref()?;
    let expected = format!("Bearer {required}");

    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => None,
        _ => Some(StatusCode::UNAUTHORIZED.into_response()),
    }
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "message": format!("Content item '{id}' not found")
        })),
    )
        .into_response()
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({ "message": message })),
    )
        .into_response()
}

/// GET /api/content/{app}/{schema}/
pub async fn list_content(
    State(state): State<SharedState>,
    Path((app, schema)): Path<(String, String)>,
    headers: HeaderMap,
    Query(query): Query<ListContentQuery>,
) -> Response {
    let state = state.read().await;
    if let Some(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let search = query.search.filter(|s| !s.trim().is_empty());

    let filter = match query.filter.as_deref().filter(|f| !f.trim().is_empty()) {
        Some(expression) if search.is_none() => match FieldFilter::parse(expression) {
            Some(filter) => Some(filter),
            None => return bad_request(format!("Unsupported filter expression: {expression}")),
        },
        _ => None,
    };

    let order = match query.order_by.as_deref().filter(|o| !o.trim().is_empty()) {
        Some(expression) => match SortOrder::parse(expression) {
            Some(order) => Some(order),
            None => return bad_request(format!("Unsupported orderby expression: {expression}")),
        },
        None => None,
    };

    let criteria = ListCriteria {
        search,
        filter,
        order,
    };
    let matched = state.list_items(&app, &schema, &criteria);
    let total = matched.len() as u64;

    let items = matched
        .into_iter()
        .skip(query.skip.unwrap_or(0))
        .take(query.top.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    (StatusCode::OK, Json(EntityCollection::new(items, total))).into_response()
}

/// GET /api/content/{app}/{schema}/{id}/
pub async fn get_content(
    State(state): State<SharedState>,
    Path((app, schema, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let state = state.read().await;
    if let Some(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.get_item(&app, &schema, &id) {
        Some(item) => (StatusCode::OK, Json(item.clone())).into_response(),
        None => not_found(&id),
    }
}

/// POST /api/content/{app}/{schema}/{id}/
pub async fn create_content(
    State(state): State<SharedState>,
    Path((app, schema, id)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(data): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.create_item(&app, &schema, &id, data) {
        Some(item) => (StatusCode::CREATED, Json(item.clone())).into_response(),
        None => (
            StatusCode::CONFLICT,
            Json(serde_json::json!({
                "message": format!("Content item '{id}' already exists")
            })),
        )
            .into_response(),
    }
}

/// PUT /api/content/{app}/{schema}/{id}/
pub async fn update_content(
    State(state): State<SharedState>,
    Path((app, schema, id)): Path<(String, String, String)>,
    headers: HeaderMap,
    Json(data): Json<Value>,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.update_item(&app, &schema, &id, data) {
        Some(item) => (StatusCode::OK, Json(item.clone())).into_response(),
        None => not_found(&id),
    }
}

/// PUT /api/content/{app}/{schema}/{id}/{verb}/
pub async fn change_status(
    State(state): State<SharedState>,
    Path((app, schema, id, verb)): Path<(String, String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    let status = match verb.as_str() {
        "publish" => ContentStatus::Published,
        "unpublish" | "restore" => ContentStatus::Draft,
        "archive" => ContentStatus::Archived,
        _ => return StatusCode::NOT_FOUND.into_response(),
    };

    match state.set_status(&app, &schema, &id, status) {
        Some(item) => (StatusCode::OK, Json(item.clone())).into_response(),
        None => not_found(&id),
    }
}

/// DELETE /api/content/{app}/{schema}/{id}/
pub async fn delete_content(
    State(state): State<SharedState>,
    Path((app, schema, id)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Response {
    let mut state = state.write().await;
    if let Some(rejection) = authorize(&state, &headers) {
        return rejection;
    }

    match state.delete_item(&app, &schema, &id) {
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => not_found(&id),
    }
}
