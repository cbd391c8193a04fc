use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use studio_logging::{studio_info, studio_warn};

use mockup_core::{Effect, Msg};
use mockup_engine::{EngineConfig, EngineEvent, EngineHandle, ImageRegistry};

use crate::config::StudioConfig;

/// Executes core effects against the engine and pumps engine events back
/// into the message channel as core messages.
pub struct EffectRunner {
    engine: Arc<EngineHandle>,
    registry: Arc<ImageRegistry>,
}

impl EffectRunner {
    pub fn new(
        config: &StudioConfig,
        registry: Arc<ImageRegistry>,
        msg_tx: mpsc::Sender<Msg>,
    ) -> Self {
        let mut engine_config = EngineConfig::default_with_output(config.output_dir.clone());
        engine_config.tick_interval = Duration::from_millis(config.tick_interval_ms);

        let engine = Arc::new(EngineHandle::new(engine_config, registry.clone()));
        let runner = Self { engine, registry };
        runner.spawn_event_loop(msg_tx);
        runner
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::StartGeneration {
                    run_id,
                    design,
                    mockups,
                } => {
                    studio_info!(
                        "StartGeneration run_id={} mockup_count={}",
                        run_id,
                        mockups.len()
                    );
                    self.engine.start_run(
                        run_id,
                        engine_handle(design),
                        mockups.into_iter().map(engine_handle).collect(),
                    );
                }
                Effect::CancelGeneration { run_id } => {
                    self.engine.cancel_run(run_id);
                }
                Effect::SaveMockup { id, image, mime } => {
                    self.engine.save(id, engine_handle(image), mime);
                }
                Effect::ReleaseImage { image } => {
                    self.registry.release(engine_handle(image));
                }
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                let msg = match event {
                    EngineEvent::Progress {
                        run_id,
                        index,
                        percent,
                    } => Some(Msg::ComposeProgress {
                        run_id,
                        index,
                        percent,
                    }),
                    EngineEvent::MockupCompleted {
                        run_id,
                        index,
                        output,
                        mime,
                    } => Some(Msg::MockupComposed {
                        run_id,
                        index,
                        output: core_handle(output),
                        mime,
                    }),
                    EngineEvent::MockupFailed {
                        run_id,
                        index,
                        kind,
                    } => {
                        studio_warn!("run {} item {} failed: {}", run_id, index, kind);
                        Some(Msg::ComposeFailed {
                            run_id,
                            index,
                            reason: kind.to_string(),
                        })
                    }
                    EngineEvent::RunFinished { run_id } => {
                        studio_info!("run {} finished", run_id);
                        None
                    }
                    EngineEvent::SaveCompleted { id, path } => {
                        studio_info!("mockup {} saved to {}", id, path.display());
                        None
                    }
                    EngineEvent::SaveFailed { id, kind } => {
                        studio_warn!("mockup {} save failed: {}", id, kind);
                        None
                    }
                };
                if let Some(msg) = msg {
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn engine_handle(image: mockup_core::ImageHandle) -> mockup_engine::ImageHandle {
    mockup_engine::ImageHandle(image.0)
}

fn core_handle(image: mockup_engine::ImageHandle) -> mockup_core::ImageHandle {
    mockup_core::ImageHandle(image.0)
}
