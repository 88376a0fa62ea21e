//! Race loop driver
//!
//! This module handles:
//! - Ticking the race session at ~60Hz while a race is in progress
//! - Broadcasting a snapshot after every tick
//! - Turning lap and finish events into notices
//! - Recording the result once a race finishes
//! - Resuming a saved race

use crate::error::call_store;
use crate::notice::RaceNotice;
use crate::state::AppState;
use racer_core::model::NewRaceResult;
use racer_core::session::{FrameOutcome, RaceSession};
use racer_core::{RaceEvent, RaceState};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const FRAME_INTERVAL: Duration = Duration::from_millis(16); // ~60Hz

/// Cancel any running race loop and spawn a fresh one
///
/// Callers hold the session lock while calling this, so the old loop can
/// never tick the new race.
pub async fn restart_race_loop(state: &AppState) {
    let token = {
        let mut cancel = state.race_cancel.write().await;
        if let Some(token) = cancel.take() {
            token.cancel();
        }
        let token = CancellationToken::new();
        *cancel = Some(token.clone());
        token
    };

    tokio::spawn(run(state.clone(), token));
}

/// Cancel the running race loop, if any
pub async fn stop_race_loop(state: &AppState) {
    let mut cancel = state.race_cancel.write().await;
    if let Some(token) = cancel.take() {
        token.cancel();
    }
}

/// Replace the session with a saved race and carry on from there
///
/// A race that was in progress resumes ticking straight away.
pub async fn resume_race(state: &AppState, race: RaceState) {
    let mut session = state.session.lock().await;
    stop_race_loop(state).await;
    *session = RaceSession::resume(race);
    info!(
        "Resumed race in phase {:?} on lap {}/{}",
        session.phase(),
        session.snapshot().current_lap,
        session.snapshot().total_laps
    );
    if session.is_running() {
        restart_race_loop(state).await;
    }
    state.publish_state(session.snapshot());
}

async fn run(state: AppState, cancel_token: CancellationToken) {
    info!("Race loop started");

    let mut ticker = tokio::time::interval(FRAME_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = ticker.tick() => {},
        }

        // Publish under the lock so start/change-car snapshots always land last
        let mut session = state.session.lock().await;
        // start/change-car may have won the lock race
        if cancel_token.is_cancelled() {
            break;
        }

        match session.on_frame() {
            FrameOutcome::Idle => break,
            FrameOutcome::Ticked {
                event,
                still_running,
            } => {
                state.publish_state(session.snapshot());
                if let Some(event) = event {
                    handle_event(&state, &event);
                }
                if !still_running {
                    break;
                }
            }
        }
    }

    info!("Race loop ended");
}

fn handle_event(state: &AppState, event: &RaceEvent) {
    state.publish_notice(RaceNotice::from(event));

    match event {
        RaceEvent::LapComplete { lap, total_laps } => {
            info!("Lap {}/{}", lap, total_laps);
        }
        RaceEvent::RaceComplete { car_id, final_time } => {
            info!("Race complete: car {} in {:.2}s", car_id, final_time.0);
            record_result(
                state.clone(),
                NewRaceResult {
                    car_id: *car_id,
                    player_name: state.host.player_name.clone(),
                    final_time_seconds: final_time.0,
                    track: state.host.track.clone(),
                },
            );
        }
    }
}

/// Save a finished race in the background
///
/// The race stays finished whether or not the save works; failures only
/// produce a notice.
fn record_result(state: AppState, result: NewRaceResult) {
    tokio::spawn(async move {
        let results = state.stores.results.clone();
        match call_store(move || results.record_result(result)).await {
            Ok(record) => {
                info!("Saved result {} ({:.2}s)", record.id, record.final_time_seconds);
                state.publish_notice(RaceNotice::ResultSaved { record });
            }
            Err(e) => {
                error!("Failed to save race result: {}", e);
                state.publish_notice(RaceNotice::ResultSaveFailed {
                    message: e.to_string(),
                });
            }
        }
    });
}
