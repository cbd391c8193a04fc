mod app;
mod config;
mod effects;
mod logging;
mod textures;
mod ui;

fn main() -> anyhow::Result<()> {
    logging::initialize(logging::LogDestination::File);
    let config = config::load();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("T-Shirt Mockup Studio")
            .with_inner_size([960.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "mockup_studio",
        options,
        Box::new(move |cc| Ok(Box::new(app::StudioApp::new(cc, config)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run the studio window: {err}"))
}
