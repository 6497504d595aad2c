use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use crate::models::{Summary, SummaryResponse};

use super::error::ApiError;
use super::validation;
use super::AppState;

type JsonBody = Result<Json<Value>, JsonRejection>;

/// POST /summaries/: validate, insert, schedule the generator, respond 201.
pub async fn create_summary(
    State(state): State<AppState>,
    body: JsonBody,
) -> Result<(StatusCode, Json<SummaryResponse>), ApiError> {
    let Json(body) = body?;
    let payload = validation::validate_create(&body).map_err(ApiError::Validation)?;

    let id = state.repository.create(&payload.url).await?;

    // Fire-and-forget: the response never waits on the generator
    if let Some(generator) = &state.generator {
        generator.spawn(state.repository.clone(), id, payload.url.clone());
    }

    Ok((
        StatusCode::CREATED,
        Json(SummaryResponse {
            id,
            url: payload.url,
        }),
    ))
}

/// GET /summaries/{id}/
pub async fn read_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Summary>, ApiError> {
    let id = validation::validate_summary_id(&id).map_err(ApiError::Validation)?;

    let summary = state.repository.get(id).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(summary))
}

/// GET /summaries/
pub async fn read_all_summaries(
    State(state): State<AppState>,
) -> Result<Json<Vec<Summary>>, ApiError> {
    let summaries = state.repository.get_all().await?;
    Ok(Json(summaries))
}

/// PUT /summaries/{id}/: full update, replaces `url` and `summary`.
pub async fn update_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: JsonBody,
) -> Result<Json<Summary>, ApiError> {
    let id = validation::validate_summary_id(&id).map_err(ApiError::Validation)?;
    let Json(body) = body?;
    let payload = validation::validate_update(&body).map_err(ApiError::Validation)?;

    // Existence check first; a concurrent delete between it and the update
    // makes the update itself come back empty, which is still a 404.
    state.repository.get(id).await?.ok_or(ApiError::NotFound)?;

    let updated = state
        .repository
        .update(id, &payload.url, &payload.summary)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(updated))
}

/// DELETE /summaries/{id}/: responds with the removed record id and url.
pub async fn delete_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let id = validation::validate_summary_id(&id).map_err(ApiError::Validation)?;

    // The fetch only captures `url` for the response body; the delete below
    // is a single conditional statement and decides success on its own.
    let existing = state.repository.get(id).await?.ok_or(ApiError::NotFound)?;

    state.repository.delete(id).await?.ok_or(ApiError::NotFound)?;

    Ok(Json(SummaryResponse {
        id,
        url: existing.url,
    }))
}
