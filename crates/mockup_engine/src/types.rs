use std::fmt;
use std::path::PathBuf;

pub type RunId = u64;
pub type MockupId = u64;

/// Opaque key into the [`crate::ImageRegistry`]. Previews, staged sources
/// and composited outputs all live behind these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Sub-tick progress for the item currently being composited.
    Progress {
        run_id: RunId,
        index: usize,
        percent: u8,
    },
    /// One composited mockup is ready; its bytes are in the registry.
    MockupCompleted {
        run_id: RunId,
        index: usize,
        output: ImageHandle,
        mime: String,
    },
    /// Compositing one item failed; the run continues with the next.
    MockupFailed {
        run_id: RunId,
        index: usize,
        kind: FailureKind,
    },
    /// The run processed its last item and stopped on its own.
    RunFinished { run_id: RunId },
    /// A save request landed on disk.
    SaveCompleted { id: MockupId, path: PathBuf },
    /// A save request did not land on disk.
    SaveFailed { id: MockupId, kind: FailureKind },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    MissingImage { handle: ImageHandle },
    Cancelled,
    Io(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::MissingImage { handle } => {
                write!(f, "image {} is not in the registry", handle.0)
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
            FailureKind::Io(message) => write!(f, "io error: {message}"),
        }
    }
}
