#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked files for an intake, via drag-and-drop or the browser.
    FilesPicked {
        intake: crate::IntakeId,
        files: Vec<crate::CandidateFile>,
    },
    /// User removed the staged file at `index` from an intake.
    FileRemoved {
        intake: crate::IntakeId,
        index: usize,
    },
    /// Intake teardown: release every staged preview.
    IntakeCleared { intake: crate::IntakeId },
    /// User clicked Generate Mockups.
    GenerateClicked,
    /// User clicked Cancel on the processing indicator.
    CancelClicked,
    /// Engine progress for the item currently in flight.
    ComposeProgress {
        run_id: crate::RunId,
        index: usize,
        percent: u8,
    },
    /// Engine completion for one item; the run's advancing tick.
    MockupComposed {
        run_id: crate::RunId,
        index: usize,
        output: crate::ImageHandle,
        mime: String,
    },
    /// Engine failure for one item; the run continues past it.
    ComposeFailed {
        run_id: crate::RunId,
        index: usize,
        reason: String,
    },
    /// User selected a gallery card.
    MockupSelected { id: crate::MockupId },
    /// User clicked Download on one gallery card.
    DownloadSingleClicked { id: crate::MockupId },
    /// User clicked Download All.
    DownloadAllClicked,
    /// Fallback for placeholder wiring.
    NoOp,
}
