//! Terminal shell for tunegrab: one submission per invocation.

mod logging;
mod runner;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::mpsc;

use tunegrab_core::{update, AppState, AppViewModel, Msg};
use tunegrab_engine::EngineConfig;
use url::Url;

use runner::EffectRunner;

const DEFAULT_SERVER: &str = "http://127.0.0.1:8000/";
const DEFAULT_OUTPUT_DIR: &str = "output";
const USAGE: &str = "usage: tunegrab mp3 <youtube-url>
       tunegrab removebg <image-path>

environment:
  TUNEGRAB_SERVER  backend base url (default http://127.0.0.1:8000/)
  TUNEGRAB_OUT     output directory (default ./output)
  TUNEGRAB_LOG     log destination: terminal (default), file, both";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Request {
    Mp3 { url: String },
    RemoveBg { file: PathBuf },
}

fn main() -> ExitCode {
    logging::initialize(logging::destination_from_env());

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(request) = parse_args(&args) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    match run(request) {
        Ok(saved) => {
            println!("Saved {}", saved.display());
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: &[String]) -> Option<Request> {
    match args {
        [command, value] if command == "mp3" => Some(Request::Mp3 { url: value.clone() }),
        [command, value] if command == "removebg" => Some(Request::RemoveBg {
            file: PathBuf::from(value),
        }),
        _ => None,
    }
}

fn run(request: Request) -> Result<PathBuf, String> {
    let base = std::env::var("TUNEGRAB_SERVER").unwrap_or_else(|_| DEFAULT_SERVER.to_string());
    let base = Url::parse(&base).map_err(|err| format!("invalid server url {base}: {err}"))?;
    let output_dir = std::env::var("TUNEGRAB_OUT")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));

    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let runner = EffectRunner::new(msg_tx, EngineConfig::new(base, output_dir))
        .map_err(|err| err.to_string())?;

    let mut state = AppState::new();
    let seeds = match &request {
        Request::Mp3 { url } => vec![Msg::UrlChanged(url.clone()), Msg::Mp3Submitted],
        Request::RemoveBg { file } => {
            vec![Msg::ImageChanged(Some(file.clone())), Msg::ImageSubmitted]
        }
    };
    for msg in seeds {
        state = dispatch(state, msg, &runner);
    }

    // Local validation failures never reach the network; bail out before
    // waiting on engine events that will not come.
    if !loading(&state.view(), &request) {
        return settle(&state.view(), &request);
    }

    loop {
        let msg = msg_rx
            .recv()
            .map_err(|_| "engine stopped unexpectedly".to_string())?;
        let settled = matches!(msg, Msg::Mp3Finished { .. } | Msg::ImageFinished { .. });
        state = dispatch(state, msg, &runner);
        if settled {
            return settle(&state.view(), &request);
        }
    }
}

/// Apply one message, run its effects, render when the view changed.
fn dispatch(state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let (mut state, effects) = update(state, msg);
    runner.enqueue(effects);
    if state.consume_dirty() {
        render(&state.view());
    }
    state
}

fn render(view: &AppViewModel) {
    if view.mp3.loading && !view.mp3.status_text.is_empty() {
        println!("{:>3}% {}", view.mp3.percent, view.mp3.status_text);
    }
    if view.removebg.loading {
        println!("Processing...");
    }
}

fn loading(view: &AppViewModel, request: &Request) -> bool {
    match request {
        Request::Mp3 { .. } => view.mp3.loading,
        Request::RemoveBg { .. } => view.removebg.loading,
    }
}

/// Final outcome of the submission as the view reports it.
fn settle(view: &AppViewModel, request: &Request) -> Result<PathBuf, String> {
    match request {
        Request::Mp3 { .. } => {
            if !view.mp3.error.is_empty() {
                return Err(view.mp3.error.clone());
            }
            view.mp3
                .saved
                .clone()
                .ok_or_else(|| "no artifact was produced".to_string())
        }
        Request::RemoveBg { .. } => {
            if !view.removebg.error.is_empty() {
                return Err(view.removebg.error.clone());
            }
            view.removebg
                .result
                .clone()
                .ok_or_else(|| "no artifact was produced".to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_args, Request};
    use std::path::PathBuf;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_mp3_and_removebg_commands() {
        assert_eq!(
            parse_args(&args(&["mp3", "https://youtu.be/abc123"])),
            Some(Request::Mp3 {
                url: "https://youtu.be/abc123".to_string()
            })
        );
        assert_eq!(
            parse_args(&args(&["removebg", "photo.jpg"])),
            Some(Request::RemoveBg {
                file: PathBuf::from("photo.jpg")
            })
        );
    }

    #[test]
    fn rejects_unknown_or_incomplete_commands() {
        assert_eq!(parse_args(&args(&[])), None);
        assert_eq!(parse_args(&args(&["mp3"])), None);
        assert_eq!(parse_args(&args(&["convert", "x"])), None);
        assert_eq!(parse_args(&args(&["mp3", "a", "b"])), None);
    }
}
