use crate::{AppState, Effect, Msg};

pub const EMPTY_URL_ERROR: &str = "Please enter a YouTube URL.";
pub const NO_IMAGE_ERROR: &str = "Please upload an image.";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlChanged(url) => {
            state.set_url_input(url);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Mp3Submitted => {
            // The submission that is already in flight owns the progress
            // channel; a second one may not start until it settles.
            if state.mp3_in_flight() {
                return (state, Vec::new());
            }
            let url = state.url_input().trim().to_string();
            if url.is_empty() {
                state.set_mp3_error(EMPTY_URL_ERROR);
                state.mark_dirty();
                return (state, Vec::new());
            }
            state.begin_mp3();
            state.mark_dirty();
            vec![Effect::StartMp3Job { url }]
        }
        Msg::Mp3Progress {
            progress,
            status,
            title,
        } => {
            state.apply_progress(progress, status, title);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Mp3Finished { result } => {
            state.finish_mp3(result);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ImageChanged(file) => {
            state.set_selected_image(file);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ImageSubmitted => {
            if state.bg_in_flight() {
                return (state, Vec::new());
            }
            let Some(file) = state.selected_image().cloned() else {
                state.set_bg_error(NO_IMAGE_ERROR);
                state.mark_dirty();
                return (state, Vec::new());
            };
            state.begin_removebg();
            state.mark_dirty();
            vec![Effect::StartRemoveBgJob { file }]
        }
        Msg::ImageFinished { result } => {
            state.finish_removebg(result);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
