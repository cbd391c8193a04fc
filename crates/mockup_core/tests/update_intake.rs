use std::sync::Once;

use mockup_core::{update, AppState, CandidateFile, Effect, ImageHandle, IntakeId, Msg};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(studio_logging::initialize_for_tests);
}

fn candidate(name: &str, mime: &str, byte_size: u64, handle: u64) -> CandidateFile {
    CandidateFile {
        display_name: name.to_string(),
        byte_size,
        mime_type: mime.to_string(),
        image: ImageHandle(handle),
    }
}

fn pick(state: AppState, intake: IntakeId, files: Vec<CandidateFile>) -> (AppState, Vec<Effect>) {
    update(state, Msg::FilesPicked { intake, files })
}

const MIB: u64 = 1024 * 1024;

#[test]
fn single_mode_replacement_releases_previous_preview() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = pick(
        state,
        IntakeId::Design,
        vec![candidate("a.png", "image/png", MIB, 1)],
    );
    assert!(effects.is_empty());
    assert_eq!(state.design().staged().len(), 1);
    assert_eq!(state.design().staged()[0].display_name, "a.png");

    let (mut state, effects) = pick(
        state,
        IntakeId::Design,
        vec![candidate("b.png", "image/png", MIB, 2)],
    );
    assert_eq!(
        effects,
        vec![Effect::ReleaseImage {
            image: ImageHandle(1)
        }]
    );
    assert_eq!(state.design().staged().len(), 1);
    assert_eq!(state.design().staged()[0].display_name, "b.png");
    assert_eq!(state.design().staged()[0].preview, ImageHandle(2));
    assert!(state.consume_dirty());
}

#[test]
fn single_mode_surplus_candidates_are_released() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = pick(
        state,
        IntakeId::Design,
        vec![
            candidate("a.png", "image/png", MIB, 1),
            candidate("b.png", "image/png", MIB, 2),
        ],
    );
    assert_eq!(
        effects,
        vec![Effect::ReleaseImage {
            image: ImageHandle(2)
        }]
    );
    assert_eq!(state.design().staged().len(), 1);
    assert_eq!(state.design().staged()[0].display_name, "a.png");
}

#[test]
fn multi_mode_appends_preserving_order() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = pick(
        state,
        IntakeId::Mockups,
        vec![candidate("a.jpg", "image/jpeg", MIB, 1)],
    );
    assert!(effects.is_empty());

    let (state, effects) = pick(
        state,
        IntakeId::Mockups,
        vec![
            candidate("b.jpg", "image/jpeg", MIB, 2),
            candidate("c.png", "image/png", MIB, 3),
        ],
    );
    assert!(effects.is_empty());

    let names: Vec<_> = state
        .mockups()
        .staged()
        .iter()
        .map(|file| file.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["a.jpg", "b.jpg", "c.png"]);
}

#[test]
fn oversized_file_stages_nothing_and_surfaces_error() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = pick(
        state,
        IntakeId::Mockups,
        vec![candidate("big.png", "image/png", 15 * MIB, 7)],
    );
    assert_eq!(
        effects,
        vec![Effect::ReleaseImage {
            image: ImageHandle(7)
        }]
    );
    assert!(state.mockups().staged().is_empty());
    assert_eq!(
        state.view().mockups.error.as_deref(),
        Some("file too large: big.png (max 10 MiB)")
    );
}

#[test]
fn unsupported_type_is_rejected_and_latest_error_wins() {
    init_logging();
    let state = AppState::new();

    let (state, effects) = pick(
        state,
        IntakeId::Design,
        vec![
            candidate("anim.gif", "image/gif", MIB, 1),
            candidate("huge.png", "image/png", 20 * MIB, 2),
        ],
    );
    assert_eq!(
        effects,
        vec![
            Effect::ReleaseImage {
                image: ImageHandle(1)
            },
            Effect::ReleaseImage {
                image: ImageHandle(2)
            },
        ]
    );
    assert!(state.design().staged().is_empty());
    // Both were rejected; only the most recent reason remains visible.
    assert_eq!(
        state.view().design.error.as_deref(),
        Some("file too large: huge.png (max 10 MiB)")
    );
}

#[test]
fn rejected_only_submission_keeps_staged_file_in_single_mode() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = pick(
        state,
        IntakeId::Design,
        vec![candidate("a.png", "image/png", MIB, 1)],
    );

    let (state, effects) = pick(
        state,
        IntakeId::Design,
        vec![candidate("bad.gif", "image/gif", MIB, 2)],
    );
    assert_eq!(
        effects,
        vec![Effect::ReleaseImage {
            image: ImageHandle(2)
        }]
    );
    assert_eq!(state.design().staged().len(), 1);
    assert_eq!(state.design().staged()[0].preview, ImageHandle(1));
    assert!(state.view().design.error.is_some());
}

#[test]
fn valid_submission_clears_previous_error() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = pick(
        state,
        IntakeId::Mockups,
        vec![candidate("bad.gif", "image/gif", MIB, 1)],
    );
    assert!(state.view().mockups.error.is_some());

    let (state, _effects) = pick(
        state,
        IntakeId::Mockups,
        vec![candidate("ok.png", "image/png", MIB, 2)],
    );
    assert!(state.view().mockups.error.is_none());
}

#[test]
fn remove_releases_preview_and_ignores_out_of_bounds() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = pick(
        state,
        IntakeId::Mockups,
        vec![
            candidate("a.png", "image/png", MIB, 1),
            candidate("b.png", "image/png", MIB, 2),
        ],
    );

    let (mut state, effects) = update(
        state,
        Msg::FileRemoved {
            intake: IntakeId::Mockups,
            index: 0,
        },
    );
    assert_eq!(
        effects,
        vec![Effect::ReleaseImage {
            image: ImageHandle(1)
        }]
    );
    assert_eq!(state.mockups().staged().len(), 1);
    assert_eq!(state.mockups().staged()[0].display_name, "b.png");
    assert!(state.consume_dirty());

    let (mut state, effects) = update(
        state,
        Msg::FileRemoved {
            intake: IntakeId::Mockups,
            index: 5,
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.mockups().staged().len(), 1);
    assert!(!state.consume_dirty());
}

#[test]
fn clearing_an_intake_releases_every_preview() {
    init_logging();
    let state = AppState::new();
    let (state, _effects) = pick(
        state,
        IntakeId::Mockups,
        vec![
            candidate("a.png", "image/png", MIB, 1),
            candidate("b.png", "image/png", MIB, 2),
        ],
    );

    let (state, effects) = update(
        state,
        Msg::IntakeCleared {
            intake: IntakeId::Mockups,
        },
    );
    assert_eq!(
        effects,
        vec![
            Effect::ReleaseImage {
                image: ImageHandle(1)
            },
            Effect::ReleaseImage {
                image: ImageHandle(2)
            },
        ]
    );
    assert!(state.mockups().staged().is_empty());

    // Clearing an already-empty intake emits nothing.
    let (_state, effects) = update(
        state,
        Msg::IntakeCleared {
            intake: IntakeId::Mockups,
        },
    );
    assert!(effects.is_empty());
}
