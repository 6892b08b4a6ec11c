use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use bl_core::{ArticleDetail, ArticleSummary, NarrativeCluster};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::{docs, ApiError, AppState};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ArticleSummary>>, ApiError> {
    Ok(Json(state.store.list_articles().await?))
}

pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ArticleDetail>, ApiError> {
    match state.store.get_article(&id).await {
        Ok(article) => Ok(Json(article)),
        Err(e) if e.is_not_found() => Err(ApiError::not_found("Article not found")),
        Err(e) => Err(e.into()),
    }
}

pub async fn list_narratives(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<NarrativeCluster>>, ApiError> {
    Ok(Json(state.store.list_narratives().await?))
}

pub async fn openapi(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(state.openapi.clone())
}

pub async fn swagger_ui() -> Html<String> {
    Html(docs::swagger_ui_html())
}

pub async fn redoc() -> Html<String> {
    Html(docs::redoc_html())
}

pub async fn fallback() -> ApiError {
    ApiError::not_found("Not Found")
}
