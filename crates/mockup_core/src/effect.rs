#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start the simulated compositor over the staged images, in order.
    StartGeneration {
        run_id: crate::RunId,
        design: crate::ImageHandle,
        mockups: Vec<crate::ImageHandle>,
    },
    /// Stop the run; no further events for `run_id` may be applied.
    CancelGeneration { run_id: crate::RunId },
    /// Save one completed mockup as `mockup-<id>.<ext>` in the output dir.
    SaveMockup {
        id: crate::MockupId,
        image: crate::ImageHandle,
        mime: String,
    },
    /// Release one registry handle; emitted exactly once per handle.
    ReleaseImage { image: crate::ImageHandle },
}
