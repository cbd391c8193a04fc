use mockup_core::{GenerationView, Msg};

use crate::ui::UiEvent;

/// The processing readout shown while a run is in flight.
pub fn indicator(ui: &mut egui::Ui, generation: GenerationView, events: &mut Vec<UiEvent>) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(format!(
                "Processing mockup {} of {}",
                generation.current_index + 1,
                generation.total
            ));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Cancel").clicked() {
                    events.push(UiEvent::Core(Msg::CancelClicked));
                }
            });
        });
        ui.add(
            egui::ProgressBar::new(f32::from(generation.overall_progress) / 100.0)
                .text(format!("{}%", generation.overall_progress)),
        );
    });
}
