use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::models::RawId;

use super::{params::RequestParams, AppState};

// Response types

#[derive(Debug, Serialize)]
pub struct IdRecommendationsResponse {
    pub ids: Vec<RawId>,
    /// Parallel to `ids`; `null` where the catalog has no entry for an id.
    pub titles: Vec<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct TitleRecommendationsResponse {
    pub query: String,
    pub number_of_recommendations: usize,
    pub title: Option<String>,
    pub recommendations: Vec<String>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Neighbor lookup by raw id.
///
/// Accepts `object_id` from any parameter source. A missing parameter yields
/// an empty object with HTTP 200: by contract, a malformed request is
/// indistinguishable from a query with no recommendations.
pub async fn recommendations_by_id(
    State(state): State<AppState>,
    params: RequestParams,
) -> Response {
    let Some(object_id) = params.get("object_id") else {
        return Json(json!({})).into_response();
    };

    let ids = state
        .recommender
        .recommend_by_external_id(&RawId::Text(object_id.to_string()), state.recommendations);

    let titles = ids
        .iter()
        .map(|id| {
            id.as_int()
                .and_then(|id| state.catalog.resolve_title_by_id(id))
                .map(str::to_owned)
        })
        .collect();

    Json(IdRecommendationsResponse { ids, titles }).into_response()
}

/// Neighbor lookup by title.
pub async fn recommendations_by_title(
    State(state): State<AppState>,
    params: RequestParams,
) -> Response {
    let Some(title) = params.get("title") else {
        return Json(json!({})).into_response();
    };

    let result = state
        .recommender
        .recommend_by_title(title, state.recommendations);

    Json(TitleRecommendationsResponse {
        query: title.to_string(),
        number_of_recommendations: state.recommendations,
        title: result.resolved_title,
        recommendations: result.recommendations,
    })
    .into_response()
}
