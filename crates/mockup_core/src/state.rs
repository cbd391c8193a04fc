use thiserror::Error;

use crate::intake::{IntakeConfig, IntakeState};
use crate::view_model::{
    AppViewModel, GenerationView, IntakeView, MockupCardView, StagedFileView,
};

/// Unique, stable identity of one gallery result. Process-global so
/// `mockup-<id>` filenames from consecutive runs never collide.
pub type MockupId = u64;

/// Identity of one generation run; stale engine events carry an old one.
pub type RunId = u64;

/// Opaque handle to image bytes held by the engine registry. A finite
/// resource: every handle acquired must be released exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Which of the two upload intakes a message addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntakeId {
    Design,
    Mockups,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockupStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl MockupStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, MockupStatus::Completed | MockupStatus::Failed)
    }
}

/// One gallery item. Created at run start, mutated only by engine events,
/// replaced wholesale when the next run starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockupResult {
    pub id: MockupId,
    pub source: ImageHandle,
    pub output: Option<ImageHandle>,
    pub output_mime: Option<String>,
    pub status: MockupStatus,
    pub progress: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationPhase {
    #[default]
    Idle,
    Running {
        run_id: RunId,
        current: usize,
        total: usize,
    },
    Cancelled {
        run_id: RunId,
    },
    Completed {
        run_id: RunId,
    },
}

impl GenerationPhase {
    pub fn is_running(self) -> bool {
        matches!(self, GenerationPhase::Running { .. })
    }
}

/// Gallery-level error surface; latest wins, same as the intake errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("mockup {id} is not ready to download")]
    DownloadUnavailable { id: MockupId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    design: IntakeState,
    mockups: IntakeState,
    phase: GenerationPhase,
    results: Vec<MockupResult>,
    overall_progress: u8,
    selected: Option<MockupId>,
    gallery_error: Option<GalleryError>,
    next_run_id: RunId,
    next_mockup_id: MockupId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_intake_configs(IntakeConfig::design(), IntakeConfig::mockups())
    }

    pub fn with_intake_configs(design: IntakeConfig, mockups: IntakeConfig) -> Self {
        Self {
            design: IntakeState::new(design),
            mockups: IntakeState::new(mockups),
            phase: GenerationPhase::Idle,
            results: Vec::new(),
            overall_progress: 0,
            selected: None,
            gallery_error: None,
            next_run_id: 1,
            next_mockup_id: 1,
            dirty: false,
        }
    }

    pub fn design(&self) -> &IntakeState {
        &self.design
    }

    pub fn mockups(&self) -> &IntakeState {
        &self.mockups
    }

    pub fn phase(&self) -> GenerationPhase {
        self.phase
    }

    pub fn results(&self) -> &[MockupResult] {
        &self.results
    }

    /// Overall run progress, `round(done / total * 100)`. Meaningful for the
    /// most recent run, including after it completed or was cancelled.
    pub fn overall_progress(&self) -> u8 {
        self.overall_progress
    }

    pub fn can_generate(&self) -> bool {
        !self.design.staged().is_empty()
            && !self.mockups.staged().is_empty()
            && !self.phase.is_running()
    }

    pub fn can_download_all(&self) -> bool {
        !self.phase.is_running()
            && self
                .results
                .iter()
                .any(|result| result.status == MockupStatus::Completed)
    }

    pub fn view(&self) -> AppViewModel {
        let generation = match self.phase {
            GenerationPhase::Running {
                current, total, ..
            } => GenerationView {
                running: true,
                current_index: current,
                total,
                overall_progress: self.overall_progress,
                current_item_progress: self
                    .results
                    .get(current)
                    .map(|result| result.progress)
                    .unwrap_or(0),
            },
            _ => GenerationView::default(),
        };

        AppViewModel {
            design: intake_view(&self.design),
            mockups: intake_view(&self.mockups),
            generation,
            results: self
                .results
                .iter()
                .map(|result| MockupCardView {
                    id: result.id,
                    source: result.source,
                    output: result.output,
                    status: result.status,
                    progress: result.progress,
                })
                .collect(),
            selected: self.selected,
            can_generate: self.can_generate(),
            can_download_all: self.can_download_all(),
            gallery_error: self.gallery_error.as_ref().map(|err| err.to_string()),
            dirty: self.dirty,
        }
    }

    /// Returns and clears the dirty flag; the shell uses this to coalesce
    /// re-rendering.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn intake_mut(&mut self, id: IntakeId) -> &mut IntakeState {
        match id {
            IntakeId::Design => &mut self.design,
            IntakeId::Mockups => &mut self.mockups,
        }
    }

    /// Replaces the result list with one pending entry per staged mockup and
    /// moves to `Running`. Returns the new run id and the output handles of
    /// the previous run's results, which the caller must release.
    pub(crate) fn begin_run(&mut self) -> (RunId, Vec<ImageHandle>) {
        let released: Vec<ImageHandle> = self
            .results
            .drain(..)
            .filter_map(|result| result.output)
            .collect();

        let sources: Vec<ImageHandle> = self
            .mockups
            .staged()
            .iter()
            .map(|file| file.preview)
            .collect();
        let total = sources.len();
        debug_assert!(total > 0, "begin_run requires staged mockups");

        self.results = sources
            .into_iter()
            .map(|source| MockupResult {
                id: self.take_mockup_id(),
                source,
                output: None,
                output_mime: None,
                status: MockupStatus::Pending,
                progress: 0,
            })
            .collect();

        let run_id = self.next_run_id;
        self.next_run_id += 1;
        self.phase = GenerationPhase::Running {
            run_id,
            current: 0,
            total,
        };
        self.overall_progress = 0;
        self.selected = None;
        self.gallery_error = None;
        self.mark_dirty();
        (run_id, released)
    }

    /// In-flight progress for the current item. Stale run ids and indices
    /// other than the current one are ignored.
    pub(crate) fn apply_item_progress(&mut self, run_id: RunId, index: usize, percent: u8) {
        let GenerationPhase::Running {
            run_id: active,
            current,
            ..
        } = self.phase
        else {
            return;
        };
        if run_id != active || index != current {
            return;
        }
        if let Some(result) = self.results.get_mut(index) {
            if result.status == MockupStatus::Pending {
                result.status = MockupStatus::Processing;
            }
            if result.status == MockupStatus::Processing {
                result.progress = result.progress.max(percent.min(100));
                self.mark_dirty();
            }
        }
    }

    /// Completion of the current item: the run's single advancing step.
    pub(crate) fn apply_item_completed(
        &mut self,
        run_id: RunId,
        index: usize,
        output: ImageHandle,
        mime: String,
    ) -> bool {
        if !self.event_is_current(run_id, index) {
            return false;
        }
        if let Some(result) = self.results.get_mut(index) {
            result.status = MockupStatus::Completed;
            result.output = Some(output);
            result.output_mime = Some(mime);
            result.progress = 100;
        }
        self.advance_current();
        self.mark_dirty();
        true
    }

    /// Failure of the current item; the run moves on to the next one.
    pub(crate) fn apply_item_failed(&mut self, run_id: RunId, index: usize) -> bool {
        if !self.event_is_current(run_id, index) {
            return false;
        }
        if let Some(result) = self.results.get_mut(index) {
            result.status = MockupStatus::Failed;
        }
        self.advance_current();
        self.mark_dirty();
        true
    }

    /// Running -> Cancelled; any other phase is a no-op. Returns the run id
    /// to cancel at the engine.
    pub(crate) fn cancel_run(&mut self) -> Option<RunId> {
        if let GenerationPhase::Running { run_id, .. } = self.phase {
            self.phase = GenerationPhase::Cancelled { run_id };
            self.mark_dirty();
            Some(run_id)
        } else {
            None
        }
    }

    pub(crate) fn select_mockup(&mut self, id: MockupId) {
        if self.results.iter().any(|result| result.id == id) && self.selected != Some(id) {
            self.selected = Some(id);
            self.mark_dirty();
        }
    }

    pub(crate) fn result_by_id(&self, id: MockupId) -> Option<&MockupResult> {
        self.results.iter().find(|result| result.id == id)
    }

    pub(crate) fn set_gallery_error(&mut self, error: GalleryError) {
        self.gallery_error = Some(error);
        self.mark_dirty();
    }

    fn event_is_current(&self, run_id: RunId, index: usize) -> bool {
        matches!(
            self.phase,
            GenerationPhase::Running { run_id: active, current, .. }
                if active == run_id && current == index
        )
    }

    fn advance_current(&mut self) {
        if let GenerationPhase::Running {
            run_id,
            current,
            total,
        } = self.phase
        {
            let done = current + 1;
            // Authoritative index; overall progress is never re-derived from
            // a rounded percentage.
            self.overall_progress = round_percent(done, total);
            self.phase = if done == total {
                GenerationPhase::Completed { run_id }
            } else {
                GenerationPhase::Running {
                    run_id,
                    current: done,
                    total,
                }
            };
        }
    }

    fn take_mockup_id(&mut self) -> MockupId {
        let id = self.next_mockup_id;
        self.next_mockup_id += 1;
        id
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

fn intake_view(intake: &IntakeState) -> IntakeView {
    IntakeView {
        files: intake
            .staged()
            .iter()
            .map(|file| StagedFileView {
                display_name: file.display_name.clone(),
                byte_size: file.byte_size,
                preview: file.preview,
            })
            .collect(),
        error: intake.error().map(|err| err.to_string()),
        allow_multiple: intake.config().allow_multiple,
        accept_summary: intake.config().accepted.summary(),
        max_file_size_mib: intake.config().max_file_size_mib,
    }
}

fn round_percent(done: usize, total: usize) -> u8 {
    ((done as f64 / total as f64) * 100.0).round() as u8
}
