use crate::{ImageHandle, MockupId, MockupStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub design: IntakeView,
    pub mockups: IntakeView,
    pub generation: GenerationView,
    pub results: Vec<MockupCardView>,
    pub selected: Option<MockupId>,
    pub can_generate: bool,
    pub can_download_all: bool,
    pub gallery_error: Option<String>,
    pub dirty: bool,
}

/// Render-ready projection of one upload intake.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IntakeView {
    pub files: Vec<StagedFileView>,
    pub error: Option<String>,
    pub allow_multiple: bool,
    pub accept_summary: String,
    pub max_file_size_mib: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFileView {
    pub display_name: String,
    pub byte_size: u64,
    pub preview: ImageHandle,
}

/// The transient processing readout; all zeroes when no run is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenerationView {
    pub running: bool,
    pub current_index: usize,
    pub total: usize,
    pub overall_progress: u8,
    pub current_item_progress: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockupCardView {
    pub id: MockupId,
    pub source: ImageHandle,
    pub output: Option<ImageHandle>,
    pub status: MockupStatus,
    pub progress: u8,
}
