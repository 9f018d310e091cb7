use crate::error::{Result, StudioError};
use crate::generation::{traits::ImageModel, BatchGenerator};
use crate::models::{
    GeneratedImage, GenerationTab, ReferenceImage, StyleConfig, MAX_REFERENCE_IMAGES,
};
use std::sync::Arc;

pub const MISSING_REFERENCES_MESSAGE: &str =
    "Please upload at least one reference image to lock facial identity.";
pub const AUTH_FAILURE_MESSAGE: &str = "API Key Error: Please re-select your Paid API Key.";
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Failed to generate thumbnail. Please try again or check your API key.";

/// Everything the studio surface shows: form state, uploads, the freshest
/// batch, accumulated history, and the banner/loading flags.
#[derive(Debug, Clone, Default)]
pub struct StudioState {
    pub tab: GenerationTab,
    pub config: StyleConfig,
    pub references: Vec<ReferenceImage>,
    pub current_batch: Vec<GeneratedImage>,
    pub history: Vec<GeneratedImage>,
    pub generating: bool,
    pub error: Option<String>,
}

/// One user-visible state transition. Applied through [`reduce`].
#[derive(Debug, Clone)]
pub enum StudioAction {
    SelectTab(GenerationTab),
    SetStyle(StyleConfig),
    AddReference(ReferenceImage),
    RemoveReference(String),
    BeginGeneration,
    FinishGeneration(Vec<GeneratedImage>),
    FailGeneration(StudioError),
}

/// Picks the banner for a propagated generation failure. Structured auth
/// classification comes first; the message signature check remains as a
/// fallback for errors that arrive as opaque text.
pub fn failure_banner(err: &StudioError) -> &'static str {
    if err.is_auth() || err.to_string().contains("Requested entity was not found") {
        AUTH_FAILURE_MESSAGE
    } else {
        GENERIC_FAILURE_MESSAGE
    }
}

/// Pure transition function: consumes a state snapshot and an action, returns
/// the next snapshot. All gallery/history bookkeeping lives here so the async
/// driver stays a thin shell.
pub fn reduce(state: StudioState, action: StudioAction) -> StudioState {
    let mut next = state;
    match action {
        StudioAction::SelectTab(tab) => {
            next.tab = tab;
            // Each tab publishes to one size; switching pins it.
            next.config.size = tab.output_size();
        }
        StudioAction::SetStyle(config) => {
            next.config = config;
        }
        StudioAction::AddReference(image) => {
            if next.references.len() >= MAX_REFERENCE_IMAGES {
                log::warn!(
                    "Reference limit of {} reached; ignoring upload",
                    MAX_REFERENCE_IMAGES
                );
            } else {
                next.references.push(image);
            }
        }
        StudioAction::RemoveReference(id) => {
            next.references.retain(|image| image.id != id);
        }
        StudioAction::BeginGeneration => {
            if next.references.is_empty() {
                next.error = Some(MISSING_REFERENCES_MESSAGE.to_string());
                return next;
            }
            next.generating = true;
            next.error = None;
            // Old results move to the front of history before the new batch
            // starts, leaving the current view empty while loading.
            if !next.current_batch.is_empty() {
                let mut history = std::mem::take(&mut next.current_batch);
                history.append(&mut next.history);
                next.history = history;
            }
        }
        StudioAction::FinishGeneration(images) => {
            next.current_batch = images;
            next.generating = false;
        }
        StudioAction::FailGeneration(err) => {
            next.error = Some(failure_banner(&err).to_string());
            next.generating = false;
        }
    }
    next
}

/// Async driver tying the reducer to a [`BatchGenerator`] backend. Owns the
/// single authoritative [`StudioState`].
pub struct ThumbnailStudio {
    state: StudioState,
    generator: BatchGenerator,
}

impl ThumbnailStudio {
    pub fn new(backend: Arc<dyn ImageModel>) -> Self {
        Self {
            state: StudioState::default(),
            generator: BatchGenerator::new(backend),
        }
    }

    pub fn state(&self) -> &StudioState {
        &self.state
    }

    pub fn apply(&mut self, action: StudioAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }

    /// Runs one generate press end to end. With no references uploaded this
    /// sets the banner and returns [`StudioError::MissingReferences`] before
    /// any network activity. Per-variation failures are absorbed inside the
    /// batch; only orchestration-level failures reach the error banner.
    pub async fn generate(&mut self) -> Result<usize> {
        if self.state.references.is_empty() {
            self.apply(StudioAction::BeginGeneration);
            return Err(StudioError::MissingReferences);
        }

        let config = self.state.config.clone();
        let references = self.state.references.clone();
        self.apply(StudioAction::BeginGeneration);

        match self.generator.generate_batch(&config, &references).await {
            Ok(variations) => {
                let images: Vec<GeneratedImage> = variations
                    .into_iter()
                    .map(|variation| GeneratedImage::from_variation(variation, config.pose.clone()))
                    .collect();
                let produced = images.len();
                self.apply(StudioAction::FinishGeneration(images));
                Ok(produced)
            }
            Err(err) => {
                log::error!("Batch generation failed: {}", err);
                self.apply(StudioAction::FailGeneration(err.clone()));
                Err(err)
            }
        }
    }
}

/// Which list the gallery is paging through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GallerySource {
    CurrentBatch,
    History,
}

/// Full-screen viewer cursor over the current batch or the history list.
/// Navigation clamps at both ends; a cursor left dangling by a state change
/// simply selects nothing.
#[derive(Debug, Clone, Copy)]
pub struct GalleryView {
    source: GallerySource,
    cursor: usize,
}

impl Default for GalleryView {
    fn default() -> Self {
        GalleryView {
            source: GallerySource::CurrentBatch,
            cursor: 0,
        }
    }
}

impl GalleryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn source(&self) -> GallerySource {
        self.source
    }

    pub fn toggle_source(&mut self) {
        self.source = match self.source {
            GallerySource::CurrentBatch => GallerySource::History,
            GallerySource::History => GallerySource::CurrentBatch,
        };
        self.cursor = 0;
    }

    pub fn visible<'a>(&self, state: &'a StudioState) -> &'a [GeneratedImage] {
        match self.source {
            GallerySource::CurrentBatch => &state.current_batch,
            GallerySource::History => &state.history,
        }
    }

    pub fn title(&self, state: &StudioState) -> String {
        match self.source {
            GallerySource::CurrentBatch => {
                format!("New Results ({})", state.current_batch.len())
            }
            GallerySource::History => format!("History ({})", state.history.len()),
        }
    }

    pub fn open(&mut self, index: usize) {
        self.cursor = index;
    }

    pub fn selected<'a>(&self, state: &'a StudioState) -> Option<&'a GeneratedImage> {
        self.visible(state).get(self.cursor)
    }

    pub fn next(&mut self, state: &StudioState) {
        let len = self.visible(state).len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    pub fn previous(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// One-based "n of m" label for the viewer footer; `(0, 0)` when the
    /// visible list is empty.
    pub fn position(&self, state: &StudioState) -> (usize, usize) {
        let len = self.visible(state).len();
        if len == 0 {
            (0, 0)
        } else {
            (self.cursor.min(len - 1) + 1, len)
        }
    }
}
