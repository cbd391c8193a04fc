use std::sync::Once;

use mockup_core::{
    update, AppState, CandidateFile, Effect, ImageHandle, IntakeId, Msg, MockupStatus,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(studio_logging::initialize_for_tests);
}

const MIB: u64 = 1024 * 1024;

fn candidate(name: &str, handle: u64) -> CandidateFile {
    CandidateFile {
        display_name: name.to_string(),
        byte_size: MIB,
        mime_type: "image/png".to_string(),
        image: ImageHandle(handle),
    }
}

fn composed(run_id: u64, index: usize, output: u64) -> Msg {
    Msg::MockupComposed {
        run_id,
        index,
        output: ImageHandle(output),
        mime: "image/png".to_string(),
    }
}

/// Runs a 3-item generation where the middle item fails, leaving
/// results [completed, failed, completed].
fn mixed_outcome_state() -> AppState {
    let state = AppState::new();
    let (state, _) = update(
        state,
        Msg::FilesPicked {
            intake: IntakeId::Design,
            files: vec![candidate("design.png", 10)],
        },
    );
    let (state, _) = update(
        state,
        Msg::FilesPicked {
            intake: IntakeId::Mockups,
            files: vec![
                candidate("a.png", 21),
                candidate("b.png", 22),
                candidate("c.png", 23),
            ],
        },
    );
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(state, composed(1, 0, 31));
    let (state, _) = update(
        state,
        Msg::ComposeFailed {
            run_id: 1,
            index: 1,
            reason: "compositor rejected input".to_string(),
        },
    );
    let (state, _) = update(state, composed(1, 2, 33));
    state
}

#[test]
fn download_all_saves_exactly_the_completed_subset() {
    init_logging();
    let state = mixed_outcome_state();
    let statuses: Vec<_> = state.results().iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            MockupStatus::Completed,
            MockupStatus::Failed,
            MockupStatus::Completed,
        ]
    );

    let (state, effects) = update(state, Msg::DownloadAllClicked);
    assert_eq!(
        effects,
        vec![
            Effect::SaveMockup {
                id: 1,
                image: ImageHandle(31),
                mime: "image/png".to_string(),
            },
            Effect::SaveMockup {
                id: 3,
                image: ImageHandle(33),
                mime: "image/png".to_string(),
            },
        ]
    );
    assert!(state.view().can_download_all);
}

#[test]
fn download_all_is_unavailable_while_running_or_empty() {
    init_logging();
    let state = AppState::new();
    let (state, effects) = update(state, Msg::DownloadAllClicked);
    assert!(effects.is_empty());
    assert!(!state.view().can_download_all);

    // Mid-run: one item completed but the run is still active.
    let (state, _) = update(
        state,
        Msg::FilesPicked {
            intake: IntakeId::Design,
            files: vec![candidate("design.png", 10)],
        },
    );
    let (state, _) = update(
        state,
        Msg::FilesPicked {
            intake: IntakeId::Mockups,
            files: vec![candidate("a.png", 21), candidate("b.png", 22)],
        },
    );
    let (state, _) = update(state, Msg::GenerateClicked);
    let (state, _) = update(state, composed(1, 0, 31));
    assert!(!state.view().can_download_all);
    let (_state, effects) = update(state, Msg::DownloadAllClicked);
    assert!(effects.is_empty());
}

#[test]
fn download_single_requires_a_completed_item() {
    init_logging();
    let state = mixed_outcome_state();

    let (state, effects) = update(state, Msg::DownloadSingleClicked { id: 1 });
    assert_eq!(
        effects,
        vec![Effect::SaveMockup {
            id: 1,
            image: ImageHandle(31),
            mime: "image/png".to_string(),
        }]
    );
    assert!(state.view().gallery_error.is_none());

    // The failed item cannot be downloaded; the error surface reports it.
    let (state, effects) = update(state, Msg::DownloadSingleClicked { id: 2 });
    assert!(effects.is_empty());
    assert_eq!(
        state.view().gallery_error.as_deref(),
        Some("mockup 2 is not ready to download")
    );
}

#[test]
fn selection_is_local_and_idempotent() {
    init_logging();
    let state = mixed_outcome_state();

    let (mut state, effects) = update(state, Msg::MockupSelected { id: 2 });
    assert!(effects.is_empty());
    assert_eq!(state.view().selected, Some(2));
    assert!(state.consume_dirty());

    // Re-selecting the same card changes nothing.
    let (mut state, effects) = update(state, Msg::MockupSelected { id: 2 });
    assert!(effects.is_empty());
    assert_eq!(state.view().selected, Some(2));
    assert!(!state.consume_dirty());

    // Selecting an unknown id is ignored.
    let (state, _) = update(state, Msg::MockupSelected { id: 99 });
    assert_eq!(state.view().selected, Some(2));
}
