use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use tunegrab_core::{Effect, Msg};
use tunegrab_engine::{EngineCommands, EngineConfig, EngineEvent, EngineHandle, WorkError};

/// Executes core effects against the engine and pumps engine events back
/// into the shell as messages.
pub struct EffectRunner {
    engine: EngineCommands,
}

impl EffectRunner {
    pub fn new(msg_tx: mpsc::Sender<Msg>, config: EngineConfig) -> Result<Self, WorkError> {
        let engine = EngineHandle::new(config)?;
        let commands = engine.commands();
        spawn_event_loop(engine, msg_tx);
        Ok(Self { engine: commands })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartMp3Job { url } => {
                    log::info!("StartMp3Job url={url}");
                    self.engine.start_mp3(url);
                }
                Effect::StartRemoveBgJob { file } => {
                    log::info!("StartRemoveBgJob file={}", file.display());
                    self.engine.start_remove_bg(file);
                }
            }
        }
    }
}

fn spawn_event_loop(engine: EngineHandle, msg_tx: mpsc::Sender<Msg>) {
    thread::spawn(move || loop {
        if let Some(event) = engine.try_recv() {
            let msg = match event {
                EngineEvent::Progress(progress) => Msg::Mp3Progress {
                    progress: progress.progress,
                    status: progress.status,
                    title: progress.title,
                },
                EngineEvent::Mp3Completed { result } => Msg::Mp3Finished { result },
                EngineEvent::RemoveBgCompleted { result } => Msg::ImageFinished { result },
            };
            if msg_tx.send(msg).is_err() {
                break;
            }
        } else {
            thread::sleep(Duration::from_millis(20));
        }
    });
}
