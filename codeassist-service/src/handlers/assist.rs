use axum::{
    extract::{Query, State},
    Extension, Json,
};
use service_core::error::AppError;
use service_core::middleware::RequestId;

use crate::models::{
    debug_prompt, todo_prompt, DebugResponse, PromptResponse, QueryParams, TodoResponse,
};
use crate::startup::AppState;

/// First value of `name`; absent or empty counts as missing.
fn require_param(params: &QueryParams, name: &'static str) -> Result<String, AppError> {
    params
        .first(name)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or(AppError::MissingParameter(name))
}

#[tracing::instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn todo_route(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<QueryParams>,
) -> Result<Json<TodoResponse>, AppError> {
    let code = require_param(&params, "code")?;
    let generation = state.generator.generate(&todo_prompt(&code)).await;

    Ok(Json(TodoResponse {
        todo_suggestion: generation.text,
        model_used: generation.model_used,
    }))
}

#[tracing::instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn debug_route(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<QueryParams>,
) -> Result<Json<DebugResponse>, AppError> {
    let code = require_param(&params, "code")?;
    let generation = state.generator.generate(&debug_prompt(&code)).await;

    Ok(Json(DebugResponse {
        debug_suggestion: generation.text,
        model_used: generation.model_used,
    }))
}

#[tracing::instrument(skip_all, fields(request_id = %request_id.0))]
pub async fn prompt_route(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<QueryParams>,
) -> Result<Json<PromptResponse>, AppError> {
    let q = require_param(&params, "q")?;
    let generation = state.generator.generate(&q).await;

    Ok(Json(PromptResponse {
        response: generation.text,
        model_used: generation.model_used,
    }))
}
