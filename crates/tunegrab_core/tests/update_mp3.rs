use std::path::PathBuf;

use tunegrab_core::{update, AppState, Effect, Msg, EMPTY_URL_ERROR};

fn submit_url(state: AppState, input: &str) -> (AppState, Vec<Effect>) {
    let (state, _) = update(state, Msg::UrlChanged(input.to_string()));
    update(state, Msg::Mp3Submitted)
}

#[test]
fn empty_url_is_rejected_locally() {
    let state = AppState::new();

    let (mut next, effects) = submit_url(state, "   ");

    assert!(effects.is_empty());
    let view = next.view();
    assert_eq!(view.mp3.error, EMPTY_URL_ERROR);
    assert!(!view.mp3.loading);
    assert!(next.consume_dirty());
}

#[test]
fn submission_trims_url_and_enters_loading() {
    let state = AppState::new();

    let (mut next, effects) = submit_url(state, "  https://youtu.be/abc123  ");

    assert_eq!(
        effects,
        vec![Effect::StartMp3Job {
            url: "https://youtu.be/abc123".to_string()
        }]
    );
    let view = next.view();
    assert!(view.mp3.loading);
    assert!(view.mp3.error.is_empty());
    assert_eq!(view.mp3.percent, 0);
    assert!(next.consume_dirty());
}

#[test]
fn second_submission_is_ignored_while_in_flight() {
    let state = AppState::new();
    let (state, _) = submit_url(state, "https://youtu.be/abc123");

    let (_state, effects) = update(state, Msg::Mp3Submitted);

    assert!(effects.is_empty());
}

#[test]
fn progress_events_drive_the_view() {
    let state = AppState::new();
    let (state, _) = submit_url(state, "https://youtu.be/abc123");

    let (state, effects) = update(
        state,
        Msg::Mp3Progress {
            progress: 40.4,
            status: "downloading".to_string(),
            title: "Song X".to_string(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.mp3.percent, 40);
    assert_eq!(view.mp3.status_text, "Downloading: Song X");
}

#[test]
fn success_resets_progress_and_records_saved_path() {
    let state = AppState::new();
    let (state, _) = submit_url(state, "https://youtu.be/abc123");
    let (state, _) = update(
        state,
        Msg::Mp3Progress {
            progress: 100.0,
            status: "finished".to_string(),
            title: "Song X".to_string(),
        },
    );

    let saved = PathBuf::from("output/Song X.mp3");
    let (state, _) = update(
        state,
        Msg::Mp3Finished {
            result: Ok(saved.clone()),
        },
    );

    let view = state.view();
    assert!(!view.mp3.loading);
    assert_eq!(view.mp3.percent, 0);
    assert_eq!(view.mp3.status_text, "");
    assert_eq!(view.mp3.saved, Some(saved));
}

#[test]
fn failure_surfaces_the_detail_message_and_clears_loading() {
    let state = AppState::new();
    let (state, _) = submit_url(state, "https://youtu.be/abc123");

    let (state, _) = update(
        state,
        Msg::Mp3Finished {
            result: Err("Video unavailable".to_string()),
        },
    );

    let view = state.view();
    assert!(!view.mp3.loading);
    assert_eq!(view.mp3.error, "Video unavailable");
    assert_eq!(view.mp3.percent, 0);
    assert_eq!(view.mp3.status_text, "");
}

#[test]
fn resubmission_clears_previous_error() {
    let state = AppState::new();
    let (state, _) = submit_url(state, "");
    assert_eq!(state.view().mp3.error, EMPTY_URL_ERROR);

    let (state, effects) = submit_url(state, "https://youtu.be/abc123");

    assert_eq!(effects.len(), 1);
    assert!(state.view().mp3.error.is_empty());
}
