use crate::{AppState, Effect, GalleryError, Msg, MockupStatus};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FilesPicked { intake, files } => {
            if files.is_empty() {
                return (state, Vec::new());
            }
            let released = state.intake_mut(intake).submit(files);
            state.mark_dirty();
            released
                .into_iter()
                .map(|image| Effect::ReleaseImage { image })
                .collect()
        }
        Msg::FileRemoved { intake, index } => match state.intake_mut(intake).remove(index) {
            Some(image) => {
                state.mark_dirty();
                vec![Effect::ReleaseImage { image }]
            }
            None => Vec::new(),
        },
        Msg::IntakeCleared { intake } => {
            let released = state.intake_mut(intake).clear();
            if released.is_empty() {
                Vec::new()
            } else {
                state.mark_dirty();
                released
                    .into_iter()
                    .map(|image| Effect::ReleaseImage { image })
                    .collect()
            }
        }
        Msg::GenerateClicked => {
            // The controller never starts a zero-length run.
            let Some(design) = state.design().staged().first().map(|file| file.preview)
            else {
                return (state, Vec::new());
            };
            if state.mockups().staged().is_empty() {
                return (state, Vec::new());
            }

            let mut effects = Vec::new();
            // Starting a new run implicitly cancels the previous one first.
            if let Some(run_id) = state.cancel_run() {
                effects.push(Effect::CancelGeneration { run_id });
            }

            let (run_id, released) = state.begin_run();
            effects.extend(
                released
                    .into_iter()
                    .map(|image| Effect::ReleaseImage { image }),
            );
            let mockups = state.results().iter().map(|result| result.source).collect();
            effects.push(Effect::StartGeneration {
                run_id,
                design,
                mockups,
            });
            effects
        }
        Msg::CancelClicked => match state.cancel_run() {
            Some(run_id) => vec![Effect::CancelGeneration { run_id }],
            None => Vec::new(),
        },
        Msg::ComposeProgress {
            run_id,
            index,
            percent,
        } => {
            state.apply_item_progress(run_id, index, percent);
            Vec::new()
        }
        Msg::MockupComposed {
            run_id,
            index,
            output,
            mime,
        } => {
            if !state.apply_item_completed(run_id, index, output, mime) {
                // Stale event from a cancelled or superseded run; the handle
                // was produced for nothing and must still be released.
                return (state, vec![Effect::ReleaseImage { image: output }]);
            }
            Vec::new()
        }
        Msg::ComposeFailed { run_id, index, .. } => {
            state.apply_item_failed(run_id, index);
            Vec::new()
        }
        Msg::MockupSelected { id } => {
            state.select_mockup(id);
            Vec::new()
        }
        Msg::DownloadSingleClicked { id } => {
            let completed = state.result_by_id(id).and_then(|result| {
                if result.status == MockupStatus::Completed {
                    result
                        .output
                        .map(|image| (image, result.output_mime.clone()))
                } else {
                    None
                }
            });
            match completed {
                Some((image, mime)) => vec![Effect::SaveMockup {
                    id,
                    image,
                    mime: mime.unwrap_or_else(|| "image/png".to_string()),
                }],
                None => {
                    state.set_gallery_error(GalleryError::DownloadUnavailable { id });
                    Vec::new()
                }
            }
        }
        Msg::DownloadAllClicked => {
            if !state.can_download_all() {
                return (state, Vec::new());
            }
            state
                .results()
                .iter()
                .filter(|result| result.status == MockupStatus::Completed)
                .filter_map(|result| {
                    result.output.map(|image| Effect::SaveMockup {
                        id: result.id,
                        image,
                        mime: result
                            .output_mime
                            .clone()
                            .unwrap_or_else(|| "image/png".to_string()),
                    })
                })
                .collect()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
