use mockup_core::{AppViewModel, MockupCardView, MockupStatus, Msg};

use crate::textures::TextureCache;
use crate::ui::{style, UiEvent};

/// The results section: header with Download All, the latest gallery error,
/// and a grid of one card per mockup.
pub fn panel(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    textures: &mut TextureCache,
    events: &mut Vec<UiEvent>,
) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Results").strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let download_all =
                ui.add_enabled(view.can_download_all, egui::Button::new("Download All"));
            if download_all.clicked() {
                events.push(UiEvent::Core(Msg::DownloadAllClicked));
            }
        });
    });

    if let Some(error) = &view.gallery_error {
        ui.colored_label(style::ERROR_COLOR, error);
    }

    if view.results.is_empty() {
        ui.add_space(8.0);
        ui.colored_label(
            style::HINT_COLOR,
            "Generated mockups will appear here.",
        );
        return;
    }

    ui.add_space(8.0);
    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Grid::new("mockup_gallery")
            .num_columns(style::GALLERY_COLUMNS)
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (position, result) in view.results.iter().enumerate() {
                    card(ui, result, view.selected == Some(result.id), textures, events);
                    if (position + 1) % style::GALLERY_COLUMNS == 0 {
                        ui.end_row();
                    }
                }
            });
    });
}

fn card(
    ui: &mut egui::Ui,
    result: &MockupCardView,
    selected: bool,
    textures: &mut TextureCache,
    events: &mut Vec<UiEvent>,
) {
    let mut frame = egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(8));
    if selected {
        frame = frame.stroke(style::selection_stroke());
    }
    let response = frame
        .show(ui, |ui| {
            ui.set_width(style::CARD_IMAGE_SIZE);
            let image_size = egui::Vec2::splat(style::CARD_IMAGE_SIZE);

            // Show the composed output once it exists, the source photo
            // until then.
            let shown = result.output.unwrap_or(result.source);
            match textures.texture(ui.ctx(), shown) {
                Some(texture) => {
                    ui.add(egui::Image::new(&texture).fit_to_exact_size(image_size));
                }
                None => {
                    let (rect, _) = ui.allocate_exact_size(image_size, egui::Sense::hover());
                    ui.painter().rect_filled(rect, 4.0, style::HINT_COLOR);
                }
            }

            match result.status {
                MockupStatus::Pending => {
                    ui.colored_label(style::HINT_COLOR, "Waiting to process...");
                }
                MockupStatus::Processing => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("{}%", result.progress));
                    });
                }
                MockupStatus::Completed => {
                    ui.label("Done");
                }
                MockupStatus::Failed => {
                    ui.colored_label(style::ERROR_COLOR, "Processing failed");
                }
            }

            let download = ui.add_enabled(
                result.status == MockupStatus::Completed,
                egui::Button::new("Download"),
            );
            if download.clicked() {
                events.push(UiEvent::Core(Msg::DownloadSingleClicked { id: result.id }));
            }
        })
        .response;

    if response.interact(egui::Sense::click()).clicked() {
        events.push(UiEvent::Core(Msg::MockupSelected { id: result.id }));
    }
}
