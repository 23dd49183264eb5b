use crate::errors::AppError;
use crate::history::{History, Quality};
use crate::ledger::MAX_NOTE_CHARS;
use crate::models::{
    DeleteNoteRequest, InteractionRequest, InteractionResponse, NoteResponse, SettingsRequest,
    SettingsResponse, StatsResponse, TodayResponse, GOAL_PRESETS,
};
use crate::notes::flatten_notes;
use crate::state::AppState;
use crate::stats::{build_stats, build_today_at};
use crate::storage::persist_data;
use axum::{extract::State, Json};
use chrono::{DateTime, Local, NaiveDate, Utc};
use tracing::warn;

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let today = local_today();
    let mut data = state.data.lock().await;
    if data.roll_over(today) {
        persist_data(&state.data_path, &data).await?;
    }

    Ok(Json(build_today_at(today, &data)))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data)))
}

pub async fn log_interaction(
    State(state): State<AppState>,
    Json(payload): Json<InteractionRequest>,
) -> Result<Json<InteractionResponse>, AppError> {
    let Some(quality) = Quality::new(payload.quality) else {
        warn!(quality = payload.quality, "rejected interaction");
        return Err(AppError::bad_request("quality must be between 1 and 5"));
    };
    let note = payload.note.unwrap_or_default();
    if note.trim().chars().count() > MAX_NOTE_CHARS {
        return Err(AppError::bad_request(format!(
            "note must be at most {MAX_NOTE_CHARS} characters"
        )));
    }

    let today = local_today();
    let mut data = state.data.lock().await;
    let outcome = data.record_interaction(today, quality, &note, Utc::now());
    persist_data(&state.data_path, &data).await?;

    Ok(Json(InteractionResponse {
        today: build_today_at(today, &data),
        celebrations: outcome.celebrations,
    }))
}

pub async fn list_notes(State(state): State<AppState>) -> Json<Vec<NoteResponse>> {
    let data = state.data.lock().await;
    Json(note_views(&data.history))
}

pub async fn delete_note(
    State(state): State<AppState>,
    Json(payload): Json<DeleteNoteRequest>,
) -> Result<Json<Vec<NoteResponse>>, AppError> {
    let timestamp = DateTime::parse_from_rfc3339(payload.timestamp.trim())
        .map_err(|err| AppError::bad_request(format!("invalid timestamp: {err}")))?
        .with_timezone(&Utc);

    let mut data = state.data.lock().await;
    if data.remove_note(timestamp).is_some() {
        persist_data(&state.data_path, &data).await?;
    }

    Ok(Json(note_views(&data.history)))
}

pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let data = state.data.lock().await;
    Json(settings_response(data.daily_goal))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Json(payload): Json<SettingsRequest>,
) -> Result<Json<SettingsResponse>, AppError> {
    let mut data = state.data.lock().await;
    let goal = data.set_daily_goal(payload.daily_goal);
    persist_data(&state.data_path, &data).await?;

    Ok(Json(settings_response(goal)))
}

fn note_views(history: &History) -> Vec<NoteResponse> {
    flatten_notes(history).into_iter().map(NoteResponse::from).collect()
}

fn settings_response(daily_goal: u32) -> SettingsResponse {
    SettingsResponse {
        daily_goal,
        presets: GOAL_PRESETS.to_vec(),
    }
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
