use std::fs;
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};

use pretty_assertions::assert_eq;

use mockup_engine::{EngineConfig, EngineEvent, EngineHandle, ImageRegistry};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(studio_logging::initialize_for_tests);
}

fn engine_with_interval(
    interval: Duration,
    output_dir: &std::path::Path,
) -> (EngineHandle, Arc<ImageRegistry>) {
    let registry = Arc::new(ImageRegistry::new());
    let mut config = EngineConfig::default_with_output(output_dir.to_path_buf());
    config.tick_interval = interval;
    let engine = EngineHandle::new(config, registry.clone());
    (engine, registry)
}

/// Polls the engine until `deadline` for the next event.
fn recv_event(engine: &EngineHandle, deadline: Instant) -> Option<EngineEvent> {
    while Instant::now() < deadline {
        if let Some(event) = engine.try_recv() {
            return Some(event);
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    None
}

fn drain_until_finished(engine: &EngineHandle, deadline: Instant) -> Vec<EngineEvent> {
    let mut events = Vec::new();
    while let Some(event) = recv_event(engine, deadline) {
        let finished = matches!(event, EngineEvent::RunFinished { .. });
        events.push(event);
        if finished {
            break;
        }
    }
    events
}

#[test]
fn run_emits_ordered_completions_then_finishes() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let (engine, registry) = engine_with_interval(Duration::from_millis(20), dir.path());

    let design = registry.register(vec![0xAA], "image/png");
    let shirts = vec![
        registry.register(vec![0xB0], "image/jpeg"),
        registry.register(vec![0xB1], "image/jpeg"),
    ];
    engine.start_run(1, design, shirts);

    let events = drain_until_finished(&engine, Instant::now() + Duration::from_secs(5));
    assert!(matches!(
        events.last(),
        Some(EngineEvent::RunFinished { run_id: 1 })
    ));

    let completions: Vec<(usize, String)> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::MockupCompleted {
                run_id: 1,
                index,
                mime,
                ..
            } => Some((*index, mime.clone())),
            _ => None,
        })
        .collect();
    assert_eq!(
        completions,
        vec![(0, "image/png".to_string()), (1, "image/png".to_string())]
    );

    // Each completed output is registered and fetchable.
    for event in &events {
        if let EngineEvent::MockupCompleted { output, .. } = event {
            assert!(registry.image(*output).is_some());
        }
    }

    // Per-item progress is reported in increasing order before completion.
    let first_item_progress: Vec<u8> = events
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Progress {
                run_id: 1,
                index: 0,
                percent,
            } => Some(*percent),
            _ => None,
        })
        .collect();
    assert_eq!(first_item_progress, vec![25, 50, 75]);
}

#[test]
fn cancel_stops_the_event_stream() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let (engine, registry) = engine_with_interval(Duration::from_millis(200), dir.path());

    let design = registry.register(vec![0xAA], "image/png");
    let shirts = vec![
        registry.register(vec![0xB0], "image/png"),
        registry.register(vec![0xB1], "image/png"),
    ];
    engine.start_run(1, design, shirts);

    // Wait for the first completion, then cancel before the second tick.
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        match recv_event(&engine, deadline) {
            Some(EngineEvent::MockupCompleted { index: 0, .. }) => break,
            Some(_) => continue,
            None => panic!("first completion never arrived"),
        }
    }
    engine.cancel_run(1);

    // Give the run plenty of time to misbehave, then inspect the stream.
    std::thread::sleep(Duration::from_millis(600));
    let mut late = Vec::new();
    while let Some(event) = engine.try_recv() {
        late.push(event);
    }
    assert!(!late
        .iter()
        .any(|event| matches!(event, EngineEvent::MockupCompleted { .. })));
    assert!(!late
        .iter()
        .any(|event| matches!(event, EngineEvent::RunFinished { .. })));
}

#[test]
fn new_run_supersedes_the_previous_one() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let (engine, registry) = engine_with_interval(Duration::from_millis(40), dir.path());

    let design = registry.register(vec![0xAA], "image/png");
    let first = vec![registry.register(vec![0xB0], "image/png")];
    let second = vec![registry.register(vec![0xB1], "image/png")];

    // The second start lands before the first run's initial quarter-step
    // elapses, so run 1 must produce no events at all.
    engine.start_run(1, design, first);
    engine.start_run(2, design, second);

    let events = drain_until_finished(&engine, Instant::now() + Duration::from_secs(5));
    assert!(matches!(
        events.last(),
        Some(EngineEvent::RunFinished { run_id: 2 })
    ));
    let run_ids: Vec<u64> = events
        .iter()
        .map(|event| match event {
            EngineEvent::Progress { run_id, .. }
            | EngineEvent::MockupCompleted { run_id, .. }
            | EngineEvent::MockupFailed { run_id, .. }
            | EngineEvent::RunFinished { run_id } => *run_id,
            EngineEvent::SaveCompleted { .. } | EngineEvent::SaveFailed { .. } => {
                unreachable!("no saves requested")
            }
        })
        .collect();
    assert!(run_ids.iter().all(|id| *id == 2), "saw events: {events:?}");
}

#[test]
fn save_writes_the_named_file() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let (engine, registry) = engine_with_interval(Duration::from_millis(20), dir.path());

    let image = registry.register(vec![9, 9, 9], "image/png");
    engine.save(7, image, "image/png");

    let event = recv_event(&engine, Instant::now() + Duration::from_secs(5))
        .expect("save event never arrived");
    match event {
        EngineEvent::SaveCompleted { id, path } => {
            assert_eq!(id, 7);
            assert_eq!(path.file_name().unwrap(), "mockup-7.png");
            assert_eq!(fs::read(path).unwrap(), vec![9, 9, 9]);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn save_of_unknown_image_reports_failure() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let (engine, _registry) = engine_with_interval(Duration::from_millis(20), dir.path());

    engine.save(3, mockup_engine::ImageHandle(999), "image/png");

    let event = recv_event(&engine, Instant::now() + Duration::from_secs(5))
        .expect("save event never arrived");
    assert!(matches!(event, EngineEvent::SaveFailed { id: 3, .. }));
}
