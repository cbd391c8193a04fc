use std::path::PathBuf;

use mockup_core::{IntakeId, IntakeView, Msg};

use crate::textures::TextureCache;
use crate::ui::{style, UiEvent};

/// One upload panel: drop target, hints, the latest rejection, and the
/// staged file list.
#[allow(clippy::too_many_arguments)]
pub fn panel(
    ui: &mut egui::Ui,
    title: &str,
    intake: IntakeId,
    view: &IntakeView,
    textures: &mut TextureCache,
    dropped: &[PathBuf],
    pointer: Option<egui::Pos2>,
    events: &mut Vec<UiEvent>,
) {
    ui.label(egui::RichText::new(title).strong());
    ui.add_space(4.0);

    let prompt = if view.allow_multiple {
        "Drop images here or click to browse"
    } else {
        "Drop an image here or click to browse"
    };
    let frame = egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(12));
    let response = frame
        .show(ui, |ui| {
            ui.set_min_height(style::DROP_TARGET_HEIGHT);
            ui.vertical_centered(|ui| {
                ui.label(prompt);
                ui.label(
                    egui::RichText::new(format!(
                        "{} · up to {} MiB each",
                        view.accept_summary, view.max_file_size_mib
                    ))
                    .small()
                    .color(style::HINT_COLOR),
                );
            });
        })
        .response;

    let target = response.interact(egui::Sense::click());
    if target.clicked() {
        events.push(UiEvent::BrowseRequested { intake });
    }
    // Dropped files belong to the panel under the pointer.
    if !dropped.is_empty()
        && pointer.is_some_and(|pos| target.rect.contains(pos))
    {
        events.push(UiEvent::FilesDropped {
            intake,
            paths: dropped.to_vec(),
        });
    }

    if let Some(error) = &view.error {
        ui.add_space(4.0);
        ui.colored_label(style::ERROR_COLOR, error);
    }

    for (index, file) in view.files.iter().enumerate() {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let thumb = egui::Vec2::splat(style::THUMBNAIL_SIZE);
            match textures.texture(ui.ctx(), file.preview) {
                Some(texture) => {
                    ui.add(egui::Image::new(&texture).fit_to_exact_size(thumb));
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(thumb, egui::Sense::hover());
                    ui.painter().rect_filled(rect, 2.0, style::HINT_COLOR);
                }
            }
            ui.vertical(|ui| {
                ui.label(&file.display_name);
                ui.label(
                    egui::RichText::new(style::size_label(file.byte_size))
                        .small()
                        .color(style::HINT_COLOR),
                );
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("✕").clicked() {
                    events.push(UiEvent::Core(Msg::FileRemoved { intake, index }));
                }
            });
        });
    }
}
