//! REST API and SSE routes

use crate::error::{call_store, ApiError};
use crate::game_loop;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    routing::{get, post},
    Json, Router,
};
use futures::stream::{Stream, StreamExt as FuturesStreamExt};
use racer_core::model::{
    CarDraft, CarId, CarProfile, InputIntentSet, Intent, NewRaceResult, Phase, RaceRecord,
    ResultId, Settings,
};
use racer_core::input::InputSource;
use racer_core::{RaceState, SelectOutcome, StartOutcome, StoreError};
use racer_stores::DEFAULT_LEADERBOARD_LIMIT;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;
use tokio_stream::wrappers::BroadcastStream;
use tower_http::cors::CorsLayer;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Car catalog
        .route("/api/cars", get(list_cars).post(create_car))
        .route(
            "/api/cars/:id",
            get(get_car).put(update_car).delete(delete_car),
        )
        // Race control
        .route("/api/race", get(race_snapshot))
        .route("/api/race/select", post(select_car))
        .route("/api/race/start", post(start_race))
        .route("/api/race/change-car", post(change_car))
        .route("/api/race/input", post(race_input))
        .route("/api/race/stream", get(race_stream))
        .route("/api/race/events", get(race_events))
        // Results
        .route("/api/leaderboard", get(leaderboard))
        .route("/api/results", get(list_results).post(create_result))
        .route("/api/results/best", get(best_result))
        .route(
            "/api/results/:id",
            get(get_result).put(update_result).delete(delete_result),
        )
        // Settings
        .route("/api/settings", get(get_settings).put(put_settings))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// === Car Catalog Endpoints ===

async fn list_cars(State(state): State<AppState>) -> Result<Json<Vec<CarProfile>>, ApiError> {
    let cars = state.stores.cars.clone();
    Ok(Json(call_store(move || cars.list_cars()).await?))
}

async fn get_car(
    State(state): State<AppState>,
    Path(id): Path<CarId>,
) -> Result<Json<CarProfile>, ApiError> {
    let cars = state.stores.cars.clone();
    let car = call_store(move || cars.get_car(id))
        .await?
        .ok_or(StoreError::CarNotFound(id))?;
    Ok(Json(car))
}

async fn create_car(
    State(state): State<AppState>,
    Json(draft): Json<CarDraft>,
) -> Result<impl IntoResponse, ApiError> {
    let cars = state.stores.cars.clone();
    let car = call_store(move || cars.create_car(draft)).await?;
    tracing::info!("Added car {} ({})", car.id, car.name);
    Ok((StatusCode::CREATED, Json(car)))
}

async fn update_car(
    State(state): State<AppState>,
    Path(id): Path<CarId>,
    Json(draft): Json<CarDraft>,
) -> Result<Json<CarProfile>, ApiError> {
    let cars = state.stores.cars.clone();
    Ok(Json(call_store(move || cars.update_car(id, draft)).await?))
}

async fn delete_car(
    State(state): State<AppState>,
    Path(id): Path<CarId>,
) -> Result<Json<CarProfile>, ApiError> {
    let cars = state.stores.cars.clone();
    let car = call_store(move || cars.delete_car(id)).await?;
    tracing::info!("Removed car {} ({})", car.id, car.name);
    Ok(Json(car))
}

// === Race Control Endpoints ===

async fn race_snapshot(State(state): State<AppState>) -> Json<RaceState> {
    let session = state.session.lock().await;
    Json(session.snapshot())
}

#[derive(Deserialize)]
struct SelectCarRequest {
    car_id: CarId,
}

async fn select_car(
    State(state): State<AppState>,
    Json(request): Json<SelectCarRequest>,
) -> Result<Json<RaceState>, ApiError> {
    let cars = state.stores.cars.clone();
    let car_id = request.car_id;
    let car = call_store(move || cars.get_car(car_id))
        .await?
        .ok_or(StoreError::CarNotFound(car_id))?;

    let mut session = state.session.lock().await;
    match session.select_car(Arc::new(car)) {
        SelectOutcome::Selected => {
            tracing::info!("Car {} selected", car_id);
            let snapshot = session.snapshot();
            state.publish_state(snapshot.clone());
            Ok(Json(snapshot))
        }
        SelectOutcome::RaceInProgress => Err(ApiError::Conflict(
            "Cannot select a car while a race is in progress".to_string(),
        )),
    }
}

#[derive(Serialize)]
struct StartResponse {
    status: StartOutcome,
}

async fn start_race(State(state): State<AppState>) -> Json<StartResponse> {
    let mut session = state.session.lock().await;
    let status = session.start();

    match status {
        StartOutcome::Started => {
            tracing::info!("Race started");
            // still under the session lock, so the previous loop cannot tick this race
            game_loop::restart_race_loop(&state).await;
            state.publish_state(session.snapshot());
        }
        StartOutcome::NeedsCarSelection => {
            tracing::info!("Start requested without a car, asking for selection");
        }
    }

    Json(StartResponse { status })
}

#[derive(Serialize)]
struct ChangeCarResponse {
    previous_phase: Phase,
    state: RaceState,
}

async fn change_car(State(state): State<AppState>) -> Json<ChangeCarResponse> {
    let mut session = state.session.lock().await;
    game_loop::stop_race_loop(&state).await;
    let previous_phase = session.change_car();
    tracing::info!("Left {:?} race to change car", previous_phase);

    let snapshot = session.snapshot();
    state.publish_state(snapshot.clone());
    Json(ChangeCarResponse {
        previous_phase,
        state: snapshot,
    })
}

/// One control edge; exactly one of `intent`, `key` or `button` names the control
#[derive(Deserialize)]
struct InputRequest {
    intent: Option<String>,
    key: Option<String>,
    button: Option<String>,
    active: bool,
}

#[derive(Serialize)]
struct InputResponse {
    /// Intent the control mapped to; null for unmapped keys and buttons
    intent: Option<Intent>,
    /// Device behind a mapped key or button; null for named intents
    source: Option<InputSource>,
    intents: InputIntentSet,
}

async fn race_input(
    State(state): State<AppState>,
    Json(request): Json<InputRequest>,
) -> Result<Json<InputResponse>, ApiError> {
    let mut session = state.session.lock().await;
    let named = request.intent.is_some();

    let intent = match (request.intent, request.key, request.button) {
        (Some(name), None, None) => {
            let intent = name
                .parse::<Intent>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            session.set_intent(intent, request.active);
            Some(intent)
        }
        (None, Some(code), None) => session.input_mut().key(&code, request.active),
        (None, None, Some(button)) => session.input_mut().button(&button, request.active),
        _ => {
            return Err(ApiError::BadRequest(
                "Expected exactly one of 'intent', 'key' or 'button'".to_string(),
            ))
        }
    };
    let source = if named {
        None
    } else {
        intent.and(session.input().last_source())
    };

    if let Some(intent) = intent {
        tracing::debug!(
            "Input {} active={} from {:?}",
            intent,
            request.active,
            source
        );
    }

    Ok(Json(InputResponse {
        intent,
        source,
        intents: session.input().snapshot(),
    }))
}

// === Live Streams ===

async fn race_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe_race();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(snapshot) => match serde_json::to_string(&snapshot) {
                Ok(json) => Some(Ok(Event::default().data(json))),
                Err(e) => {
                    tracing::error!("Failed to serialize race state: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Race stream lagging: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

async fn race_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe_notices();

    let stream = BroadcastStream::new(rx).filter_map(|result| async move {
        match result {
            Ok(notice) => match serde_json::to_string(&notice) {
                Ok(json) => Some(Ok(Event::default().data(json))),
                Err(e) => {
                    tracing::error!("Failed to serialize notice: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::warn!("Notice stream lagging: {}", e);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

// === Result Endpoints ===

#[derive(Deserialize)]
struct LeaderboardQuery {
    limit: Option<usize>,
}

async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<RaceRecord>>, ApiError> {
    let results = state.stores.results.clone();
    let limit = query.limit.unwrap_or(DEFAULT_LEADERBOARD_LIMIT);
    Ok(Json(call_store(move || results.leaderboard(limit)).await?))
}

async fn list_results(
    State(state): State<AppState>,
) -> Result<Json<Vec<RaceRecord>>, ApiError> {
    let results = state.stores.results.clone();
    Ok(Json(call_store(move || results.list_results()).await?))
}

/// `null` when no race has been recorded yet
async fn best_result(
    State(state): State<AppState>,
) -> Result<Json<Option<RaceRecord>>, ApiError> {
    let results = state.stores.results.clone();
    Ok(Json(call_store(move || results.best_result()).await?))
}

async fn get_result(
    State(state): State<AppState>,
    Path(id): Path<ResultId>,
) -> Result<Json<RaceRecord>, ApiError> {
    let results = state.stores.results.clone();
    let record = call_store(move || results.get_result(id))
        .await?
        .ok_or(StoreError::ResultNotFound(id))?;
    Ok(Json(record))
}

async fn create_result(
    State(state): State<AppState>,
    Json(result): Json<NewRaceResult>,
) -> Result<impl IntoResponse, ApiError> {
    let results = state.stores.results.clone();
    let record = call_store(move || results.record_result(result)).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update_result(
    State(state): State<AppState>,
    Path(id): Path<ResultId>,
    Json(result): Json<NewRaceResult>,
) -> Result<Json<RaceRecord>, ApiError> {
    let results = state.stores.results.clone();
    Ok(Json(call_store(move || results.update_result(id, result)).await?))
}

async fn delete_result(
    State(state): State<AppState>,
    Path(id): Path<ResultId>,
) -> Result<Json<RaceRecord>, ApiError> {
    let results = state.stores.results.clone();
    Ok(Json(call_store(move || results.delete_result(id)).await?))
}

// === Settings Endpoints ===

async fn get_settings(State(state): State<AppState>) -> Result<Json<Settings>, ApiError> {
    let settings = state.stores.settings.clone();
    Ok(Json(call_store(move || settings.load_settings()).await?))
}

async fn put_settings(
    State(state): State<AppState>,
    Json(new_settings): Json<Settings>,
) -> Result<Json<Settings>, ApiError> {
    let settings = state.stores.settings.clone();
    Ok(Json(
        call_store(move || settings.save_settings(new_settings)).await?,
    ))
}
