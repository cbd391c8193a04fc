use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use studio_logging::{studio_error, studio_info, studio_warn};
use tokio_util::sync::CancellationToken;

use crate::compose::{Compositor, PlaceholderCompositor};
use crate::filename::mockup_filename;
use crate::persist::AtomicFileWriter;
use crate::registry::ImageRegistry;
use crate::{EngineEvent, FailureKind, ImageHandle, MockupId, RunId};

/// Default wall-clock time between completed items.
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1500);

pub struct EngineConfig {
    /// Wall-clock time one simulated composition takes.
    pub tick_interval: Duration,
    /// Where saved mockups land.
    pub output_dir: PathBuf,
    /// The compositing backend; the placeholder by default.
    pub compositor: Arc<dyn Compositor>,
}

impl EngineConfig {
    pub fn default_with_output(output_dir: PathBuf) -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            output_dir,
            compositor: Arc::new(PlaceholderCompositor),
        }
    }
}

enum EngineCommand {
    StartRun {
        run_id: RunId,
        design: ImageHandle,
        mockups: Vec<ImageHandle>,
    },
    CancelRun {
        run_id: RunId,
    },
    Save {
        id: MockupId,
        image: ImageHandle,
        mime: String,
    },
}

/// Channel-based handle to the engine thread. Commands go in, events come
/// out; the thread owns a tokio runtime for the timed run loop.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Mutex<mpsc::Receiver<EngineEvent>>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, registry: Arc<ImageRegistry>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || command_loop(config, registry, cmd_rx, event_tx));

        Self {
            cmd_tx,
            event_rx: Mutex::new(event_rx),
        }
    }

    pub fn start_run(&self, run_id: RunId, design: ImageHandle, mockups: Vec<ImageHandle>) {
        let _ = self.cmd_tx.send(EngineCommand::StartRun {
            run_id,
            design,
            mockups,
        });
    }

    pub fn cancel_run(&self, run_id: RunId) {
        let _ = self.cmd_tx.send(EngineCommand::CancelRun { run_id });
    }

    pub fn save(&self, id: MockupId, image: ImageHandle, mime: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Save {
            id,
            image,
            mime: mime.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|rx| rx.try_recv().ok())
    }
}

fn command_loop(
    config: EngineConfig,
    registry: Arc<ImageRegistry>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut active: Option<(RunId, CancellationToken)> = None;

    while let Ok(command) = cmd_rx.recv() {
        match command {
            EngineCommand::StartRun {
                run_id,
                design,
                mockups,
            } => {
                // Idempotent teardown: a new run supersedes the previous one.
                if let Some((previous, token)) = active.take() {
                    studio_info!("run {previous} superseded by run {run_id}");
                    token.cancel();
                }
                let token = CancellationToken::new();
                active = Some((run_id, token.clone()));
                studio_info!("starting run {run_id} over {} mockups", mockups.len());
                runtime.spawn(
                    RunTask {
                        run_id,
                        design,
                        mockups,
                        tick_interval: config.tick_interval,
                        compositor: config.compositor.clone(),
                        registry: registry.clone(),
                        token,
                        event_tx: event_tx.clone(),
                    }
                    .run(),
                );
            }
            EngineCommand::CancelRun { run_id } => {
                if active.as_ref().is_some_and(|(id, _)| *id == run_id) {
                    if let Some((_, token)) = active.take() {
                        token.cancel();
                    }
                    studio_info!("cancelled run {run_id}");
                }
            }
            EngineCommand::Save { id, image, mime } => {
                let event = execute_save(&config.output_dir, &registry, id, image, &mime);
                let _ = event_tx.send(event);
            }
        }
    }

    // The handle is gone; stop any in-flight run with it.
    if let Some((_, token)) = active {
        token.cancel();
    }
}

struct RunTask {
    run_id: RunId,
    design: ImageHandle,
    mockups: Vec<ImageHandle>,
    tick_interval: Duration,
    compositor: Arc<dyn Compositor>,
    registry: Arc<ImageRegistry>,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
}

impl RunTask {
    async fn run(self) {
        let run_id = self.run_id;
        let Some(design) = self.registry.image(self.design) else {
            studio_warn!("run {run_id}: design image {} missing", self.design.0);
            for index in 0..self.mockups.len() {
                let _ = self.event_tx.send(EngineEvent::MockupFailed {
                    run_id,
                    index,
                    kind: FailureKind::MissingImage {
                        handle: self.design,
                    },
                });
            }
            let _ = self.event_tx.send(EngineEvent::RunFinished { run_id });
            return;
        };

        // One tick per item, split into quarters so the card's own progress
        // readout moves between completions.
        let step = self.tick_interval / 4;
        for (index, handle) in self.mockups.iter().copied().enumerate() {
            for percent in [25u8, 50, 75] {
                if !self.sleep_unless_cancelled(step).await {
                    return;
                }
                let _ = self.event_tx.send(EngineEvent::Progress {
                    run_id,
                    index,
                    percent,
                });
            }
            if !self.sleep_unless_cancelled(step).await {
                return;
            }

            let event = match self.registry.image(handle) {
                Some(mockup) => match self.compositor.compose(&design, &mockup).await {
                    Ok(composed) => {
                        let mime = composed.mime.clone();
                        let output = self.registry.register(composed.bytes, composed.mime);
                        EngineEvent::MockupCompleted {
                            run_id,
                            index,
                            output,
                            mime,
                        }
                    }
                    Err(kind) => EngineEvent::MockupFailed {
                        run_id,
                        index,
                        kind,
                    },
                },
                None => EngineEvent::MockupFailed {
                    run_id,
                    index,
                    kind: FailureKind::MissingImage { handle },
                },
            };

            if self.token.is_cancelled() {
                // The output registered above has no owner once the run is
                // cancelled; release it instead of leaking.
                if let EngineEvent::MockupCompleted { output, .. } = event {
                    self.registry.release(output);
                }
                return;
            }
            let _ = self.event_tx.send(event);
        }

        let _ = self.event_tx.send(EngineEvent::RunFinished { run_id });
    }

    /// Returns false once the run is cancelled; no event may be emitted
    /// after that.
    async fn sleep_unless_cancelled(&self, step: Duration) -> bool {
        tokio::select! {
            _ = self.token.cancelled() => false,
            _ = tokio::time::sleep(step) => true,
        }
    }
}

fn execute_save(
    output_dir: &std::path::Path,
    registry: &ImageRegistry,
    id: MockupId,
    image: ImageHandle,
    mime: &str,
) -> EngineEvent {
    let Some(stored) = registry.image(image) else {
        studio_warn!("save of mockup {id}: image {} missing", image.0);
        return EngineEvent::SaveFailed {
            id,
            kind: FailureKind::MissingImage { handle: image },
        };
    };

    let filename = mockup_filename(id, mime);
    let writer = AtomicFileWriter::new(output_dir.to_path_buf());
    match writer.write(&filename, &stored.bytes) {
        Ok(path) => {
            studio_info!("saved mockup {id} to {}", path.display());
            EngineEvent::SaveCompleted { id, path }
        }
        Err(err) => {
            studio_error!("failed to save mockup {id}: {err}");
            EngineEvent::SaveFailed {
                id,
                kind: FailureKind::Io(err.to_string()),
            }
        }
    }
}
