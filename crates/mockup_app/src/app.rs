use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;

use studio_logging::{studio_info, studio_warn};

use mockup_core::{
    update, AcceptedTypes, AppState, AppViewModel, CandidateFile, Effect, IntakeConfig, IntakeId,
    Msg,
};
use mockup_engine::ImageRegistry;

use crate::config::StudioConfig;
use crate::effects::EffectRunner;
use crate::textures::TextureCache;
use crate::ui::{self, UiEvent};

pub struct StudioApp {
    state: AppState,
    view: AppViewModel,
    registry: Arc<ImageRegistry>,
    effects: EffectRunner,
    textures: TextureCache,
    msg_rx: mpsc::Receiver<Msg>,
}

impl StudioApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: StudioConfig) -> Self {
        let registry = Arc::new(ImageRegistry::new());
        let (msg_tx, msg_rx) = mpsc::channel();
        let effects = EffectRunner::new(&config, registry.clone(), msg_tx);

        let mut design = IntakeConfig::design();
        design.max_file_size_mib = config.max_file_size_mib;
        let mut mockups = IntakeConfig::mockups();
        mockups.max_file_size_mib = config.max_file_size_mib;

        let state = AppState::with_intake_configs(design, mockups);
        let view = state.view();
        Self {
            state,
            view,
            registry: registry.clone(),
            effects,
            textures: TextureCache::new(registry),
            msg_rx,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);

        // Textures are keyed by the handles the effects are about to free.
        for effect in &effects {
            if let Effect::ReleaseImage { image } = effect {
                self.textures.evict(*image);
            }
        }
        self.effects.enqueue(effects);

        if state.consume_dirty() {
            self.view = state.view();
        }
        self.state = state;
    }

    fn process_pending(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
        }
    }

    fn handle_ui_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Core(msg) => self.dispatch(msg),
            UiEvent::BrowseRequested { intake } => {
                let paths = browse(self.intake_config(intake));
                self.submit_paths(intake, paths);
            }
            UiEvent::FilesDropped { intake, paths } => self.submit_paths(intake, paths),
        }
    }

    fn intake_config(&self, intake: IntakeId) -> &IntakeConfig {
        match intake {
            IntakeId::Design => self.state.design().config(),
            IntakeId::Mockups => self.state.mockups().config(),
        }
    }

    /// Reads each picked file and stages it as a candidate. Validation is
    /// the core's job; unreadable files only log a warning.
    fn submit_paths(&mut self, intake: IntakeId, paths: Vec<PathBuf>) {
        let mut files = Vec::new();
        for path in paths {
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(err) => {
                    studio_warn!("could not read {:?}: {}", path, err);
                    continue;
                }
            };
            let display_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let mime_type = mime_for_path(&path);
            let byte_size = bytes.len() as u64;
            let image = core_handle(self.registry.register(bytes, mime_type.clone()));
            files.push(CandidateFile {
                display_name,
                byte_size,
                mime_type,
                image,
            });
        }
        if !files.is_empty() {
            studio_info!("picked {} file(s) for {:?}", files.len(), intake);
            self.dispatch(Msg::FilesPicked { intake, files });
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_pending();

        let (dropped, pointer) = ctx.input(|input| {
            let dropped: Vec<PathBuf> = input
                .raw
                .dropped_files
                .iter()
                .filter_map(|file| file.path.clone())
                .collect();
            (dropped, input.pointer.latest_pos())
        });

        let mut events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui::render(ui, &self.view, &mut self.textures, &dropped, pointer, &mut events);
            });
        });
        for event in events {
            self.handle_ui_event(event);
        }

        // Engine events arrive over a channel, not through user input.
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.dispatch(Msg::CancelClicked);
        self.dispatch(Msg::IntakeCleared {
            intake: IntakeId::Design,
        });
        self.dispatch(Msg::IntakeCleared {
            intake: IntakeId::Mockups,
        });
    }
}

/// Blocking native file dialog, filtered to the intake's accept set.
fn browse(config: &IntakeConfig) -> Vec<PathBuf> {
    let mut dialog = rfd::FileDialog::new();
    let extensions = dialog_extensions(&config.accepted);
    if !extensions.is_empty() {
        let refs: Vec<&str> = extensions.iter().map(String::as_str).collect();
        dialog = dialog.add_filter("Images", &refs);
    }
    if config.allow_multiple {
        dialog.pick_files().unwrap_or_default()
    } else {
        dialog.pick_file().map(|path| vec![path]).unwrap_or_default()
    }
}

fn dialog_extensions(accepted: &AcceptedTypes) -> Vec<String> {
    match accepted {
        AcceptedTypes::Pattern(_) => Vec::new(),
        AcceptedTypes::Extensions(entries) => entries
            .iter()
            .flat_map(|entry| entry.extensions.iter())
            .map(|ext| ext.trim_start_matches('.').to_string())
            .collect(),
    }
}

fn mime_for_path(path: &Path) -> String {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
    .to_string()
}

fn core_handle(image: mockup_engine::ImageHandle) -> mockup_core::ImageHandle {
    mockup_core::ImageHandle(image.0)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{dialog_extensions, mime_for_path};
    use mockup_core::IntakeConfig;

    #[test]
    fn mime_is_derived_from_the_extension() {
        assert_eq!(mime_for_path(Path::new("art.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("logo.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(mime_for_path(Path::new("no_extension")), "application/octet-stream");
    }

    #[test]
    fn dialog_filter_lists_bare_extensions() {
        let extensions = dialog_extensions(&IntakeConfig::design().accepted);
        assert_eq!(extensions, vec!["png", "jpg", "jpeg", "svg"]);
    }
}
