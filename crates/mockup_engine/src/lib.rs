//! Mockup engine: simulated compositor pipeline and effect execution.
mod engine;
mod compose;
mod filename;
mod persist;
mod registry;
mod types;

pub use engine::{EngineConfig, EngineHandle};
pub use compose::{ComposedImage, Compositor, PlaceholderCompositor};
pub use filename::{extension_for_mime, mockup_filename};
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use registry::{ImageRegistry, StoredImage};
pub use types::{EngineEvent, FailureKind, ImageHandle, MockupId, RunId};
