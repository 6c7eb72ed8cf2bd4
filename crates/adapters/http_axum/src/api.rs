//! REST API handlers.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::Rng;
use serde::Serialize;

use scenecast_app::ports::{LightChannel, LogSink};
use scenecast_domain::error::{NotFoundError, SceneCastError};
use scenecast_domain::id::GenerationId;
use scenecast_domain::scene::Scene;
use scenecast_domain::time::Timestamp;

use crate::error::ApiError;
use crate::state::AppState;

/// Assemble the `/api` sub-router.
pub fn routes<C, S>() -> Router<AppState<C, S>>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    Router::new()
        .route("/scenes", get(list_scenes))
        .route("/scenes/random/apply", post(apply_random_scene))
        .route("/scenes/{name}/apply", post(apply_scene))
        .route("/status", get(status))
}

/// Response for a successful apply: the commands are queued, not yet live.
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub scene: String,
    pub generation: GenerationId,
    pub jobs: usize,
}

/// Live generation snapshot for the status endpoint.
#[derive(Debug, Serialize)]
pub struct GenerationStatus {
    pub id: GenerationId,
    pub started_at: Timestamp,
    pub jobs: usize,
}

/// Response for the status endpoint.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub generation: Option<GenerationStatus>,
}

fn scene_not_found(name: impl Into<String>) -> ApiError {
    SceneCastError::from(NotFoundError {
        entity: "Scene",
        name: name.into(),
    })
    .into()
}

async fn list_scenes<C, S>(State(state): State<AppState<C, S>>) -> Json<Vec<String>>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    Json(
        state
            .catalog
            .scene_names()
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    )
}

async fn apply_scene<C, S>(
    State(state): State<AppState<C, S>>,
    Path(name): Path<String>,
) -> Result<(StatusCode, Json<ApplyResponse>), ApiError>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    let scene = state
        .catalog
        .get(&name)
        .ok_or_else(|| scene_not_found(name.as_str()))?;

    apply(&state, scene).await
}

async fn apply_random_scene<C, S>(
    State(state): State<AppState<C, S>>,
) -> Result<(StatusCode, Json<ApplyResponse>), ApiError>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    if state.catalog.is_empty() {
        return Err(scene_not_found("<random>"));
    }
    let index = rand::rng().random_range(0..state.catalog.len());
    let scene = &state.catalog.scenes()[index];

    apply(&state, scene).await
}

async fn apply<C, S>(
    state: &AppState<C, S>,
    scene: &Scene,
) -> Result<(StatusCode, Json<ApplyResponse>), ApiError>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    tracing::info!(scene = %scene.name, "applying scene");
    let generation = state.applier.apply(scene, state.catalog.zones()).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ApplyResponse {
            scene: scene.name.clone(),
            generation: generation.id(),
            jobs: generation.job_count(),
        }),
    ))
}

async fn status<C, S>(State(state): State<AppState<C, S>>) -> Json<StatusResponse>
where
    C: LightChannel + 'static,
    S: LogSink + 'static,
{
    let generation = state
        .applier
        .scheduler()
        .current_generation()
        .await
        .map(|generation| GenerationStatus {
            id: generation.id(),
            started_at: generation.started_at(),
            jobs: generation.job_count(),
        });
    Json(StatusResponse { generation })
}
