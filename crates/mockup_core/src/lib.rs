//! Mockup core: pure state machine and view-model helpers.
mod effect;
mod intake;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use intake::{
    AcceptedTypes, CandidateFile, IntakeConfig, IntakeError, MimeExtensions, StagedFile,
    DEFAULT_MAX_FILE_SIZE_MIB,
};
pub use msg::Msg;
pub use state::{
    AppState, GalleryError, GenerationPhase, ImageHandle, IntakeId, MockupId, MockupResult,
    MockupStatus, RunId,
};
pub use update::update;
pub use view_model::{
    AppViewModel, GenerationView, IntakeView, MockupCardView, StagedFileView,
};
