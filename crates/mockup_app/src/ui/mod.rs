//! The immediate-mode view layer. Rendering is read-only over the view
//! model; everything the user does comes back as a [`UiEvent`] for the shell
//! to translate into messages.

mod gallery;
mod intake;
mod progress;
mod style;

use std::path::PathBuf;

use mockup_core::{AppViewModel, IntakeId, Msg};

use crate::textures::TextureCache;

/// One user interaction observed during a frame.
#[derive(Debug)]
pub enum UiEvent {
    /// Directly translatable to a core message.
    Core(Msg),
    /// The drop target was clicked; the shell opens the file dialog.
    BrowseRequested { intake: IntakeId },
    /// Files were dropped onto an intake's drop target.
    FilesDropped { intake: IntakeId, paths: Vec<PathBuf> },
}

pub fn render(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    textures: &mut TextureCache,
    dropped: &[PathBuf],
    pointer: Option<egui::Pos2>,
    events: &mut Vec<UiEvent>,
) {
    ui.heading("T-Shirt Mockup Studio");
    ui.add_space(8.0);

    ui.columns(2, |columns| {
        intake::panel(
            &mut columns[0],
            "Design",
            IntakeId::Design,
            &view.design,
            textures,
            dropped,
            pointer,
            events,
        );
        intake::panel(
            &mut columns[1],
            "Blank T-shirts",
            IntakeId::Mockups,
            &view.mockups,
            textures,
            dropped,
            pointer,
            events,
        );
    });

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let generate = ui.add_enabled(view.can_generate, egui::Button::new("Generate Mockups"));
        if generate.clicked() {
            events.push(UiEvent::Core(Msg::GenerateClicked));
        }
    });

    if view.generation.running {
        ui.add_space(8.0);
        progress::indicator(ui, view.generation, events);
    }

    ui.add_space(12.0);
    ui.separator();
    ui.add_space(8.0);

    gallery::panel(ui, view, textures, events);
}
