//! Tunegrab core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod status;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, ProgressState};
pub use status::status_line;
pub use update::{update, EMPTY_URL_ERROR, NO_IMAGE_ERROR};
pub use view_model::{AppViewModel, Mp3View, RemoveBgView};
