use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::state::AppState;
use crate::translator::registry;
use crate::translator::{
    BatchTranslationRequest, BatchTranslationResponse, TranslateError, TranslationRequest,
    TranslationResponse, DEFAULT_PROVIDER,
};

type HandlerError = (StatusCode, Json<Value>);

#[derive(Debug, Deserialize)]
pub struct TranslateParams {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchTranslateParams {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub texts: Vec<String>,
}

pub async fn playground() -> Html<&'static str> {
    Html(include_str!("../static/playground.html"))
}

pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_providers(State(state): State<AppState>) -> Json<Value> {
    let mut names: Vec<&String> = state.providers.keys().collect();
    names.sort();
    Json(json!({ "providers": names }))
}

pub async fn translate_query(
    State(state): State<AppState>,
    Query(params): Query<TranslateParams>,
) -> Result<Json<TranslationResponse>, HandlerError> {
    run_translate(&state, params).await
}

pub async fn translate_json(
    State(state): State<AppState>,
    Json(params): Json<TranslateParams>,
) -> Result<Json<TranslationResponse>, HandlerError> {
    run_translate(&state, params).await
}

async fn run_translate(
    state: &AppState,
    params: TranslateParams,
) -> Result<Json<TranslationResponse>, HandlerError> {
    if params.to.is_empty() {
        return Err(bad_request("to must not be empty"));
    }

    let name = provider_name(params.provider.as_deref());
    let provider = registry::lookup(&state.providers, name).map_err(error_response)?;

    let response = provider
        .translate(TranslationRequest {
            from: params.from,
            to: params.to,
            text: params.text,
        })
        .await
        .map_err(error_response)?;

    Ok(Json(response))
}

pub async fn batch_translate(
    State(state): State<AppState>,
    Json(params): Json<BatchTranslateParams>,
) -> Result<Json<BatchTranslationResponse>, HandlerError> {
    if params.to.is_empty() {
        return Err(bad_request("to must not be empty"));
    }

    let name = provider_name(params.provider.as_deref());
    let provider = registry::lookup(&state.providers, name).map_err(error_response)?;

    let response = provider
        .batch_translate(BatchTranslationRequest {
            from: params.from,
            to: params.to,
            texts: params.texts,
        })
        .await
        .map_err(error_response)?;

    Ok(Json(response))
}

fn provider_name(requested: Option<&str>) -> &str {
    match requested {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_PROVIDER,
    }
}

fn bad_request(message: &str) -> HandlerError {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
}

fn error_response(err: TranslateError) -> HandlerError {
    let status = match err {
        TranslateError::UnknownProvider(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() })))
}
