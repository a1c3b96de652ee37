use crate::view_model::{source_label, AppViewModel, TimelineStatus};
use crate::{filter_entries, Theme, TimelineEntry};

/// Monotonically increasing tag attached to every fetch.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Loading,
    Ready(Vec<TimelineEntry>),
    Failed(String),
}

/// Ingestion state for one source selection.
///
/// Created in `Loading` whenever the selected source changes and completed
/// exactly once, by the load carrying the same request id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineState {
    source: String,
    request_id: RequestId,
    phase: Phase,
}

impl PipelineState {
    pub(crate) fn loading(source: String, request_id: RequestId) -> Self {
        Self {
            source,
            request_id,
            phase: Phase::Loading,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Entries of a ready pipeline; empty in any other phase.
    pub fn entries(&self) -> &[TimelineEntry] {
        match &self.phase {
            Phase::Ready(entries) => entries,
            Phase::Loading | Phase::Failed(_) => &[],
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            Phase::Loading | Phase::Ready(_) => None,
        }
    }

    /// Applies a load result. Returns false when the result is stale or the
    /// pipeline has already completed.
    fn complete(
        &mut self,
        request_id: RequestId,
        outcome: Result<Vec<TimelineEntry>, String>,
    ) -> bool {
        if request_id != self.request_id || !self.is_loading() {
            return false;
        }
        self.phase = match outcome {
            Ok(entries) => Phase::Ready(entries),
            Err(message) => Phase::Failed(message),
        };
        true
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    sources: Vec<String>,
    pipeline: Option<PipelineState>,
    last_request_id: RequestId,
    query: String,
    theme: Theme,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let (status, entries) = match self.pipeline.as_ref().map(PipelineState::phase) {
            None | Some(Phase::Loading) => (TimelineStatus::Loading, Vec::new()),
            Some(Phase::Failed(message)) => (TimelineStatus::Failed(message.clone()), Vec::new()),
            Some(Phase::Ready(all)) => {
                let visible = filter_entries(all, &self.query);
                if visible.is_empty() {
                    (TimelineStatus::Empty, visible)
                } else {
                    (TimelineStatus::Showing, visible)
                }
            }
        };
        let source = self.pipeline.as_ref().map(|p| p.source().to_string());

        AppViewModel {
            source_label: source.as_deref().map(source_label),
            source,
            theme: self.theme,
            query: self.query.clone(),
            status,
            total_entries: self
                .pipeline
                .as_ref()
                .map_or(0, |p| p.entries().len()),
            entries,
        }
    }

    pub fn pipeline(&self) -> Option<&PipelineState> {
        self.pipeline.as_ref()
    }

    pub fn sources(&self) -> &[String] {
        &self.sources
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn last_request_id(&self) -> RequestId {
        self.last_request_id
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_sources(&mut self, sources: Vec<String>) {
        self.sources = sources
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
    }

    pub(crate) fn is_current_source(&self, source: &str) -> bool {
        self.pipeline
            .as_ref()
            .is_some_and(|pipeline| pipeline.source() == source)
    }

    /// Source following the current one in the configured list, wrapping
    /// around. An unlisted current source continues at the first entry.
    pub(crate) fn next_source(&self) -> Option<String> {
        let current = self.pipeline.as_ref().map(PipelineState::source);
        let position = current.and_then(|c| self.sources.iter().position(|s| s == c));
        let next = match position {
            Some(index) => (index + 1) % self.sources.len(),
            None => 0,
        };
        self.sources.get(next).cloned()
    }

    /// Replaces the pipeline with a fresh loading one and returns its request id.
    pub(crate) fn begin_load(&mut self, source: String) -> RequestId {
        self.last_request_id += 1;
        self.pipeline = Some(PipelineState::loading(source, self.last_request_id));
        self.mark_dirty();
        self.last_request_id
    }

    pub(crate) fn apply_loaded(
        &mut self,
        request_id: RequestId,
        outcome: Result<Vec<TimelineEntry>, String>,
    ) -> bool {
        let applied = self
            .pipeline
            .as_mut()
            .is_some_and(|pipeline| pipeline.complete(request_id, outcome));
        if applied {
            self.mark_dirty();
        }
        applied
    }

    pub(crate) fn set_query(&mut self, query: String) {
        if self.query != query {
            self.query = query;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_theme(&mut self, theme: Theme) {
        if self.theme != theme {
            self.theme = theme;
            self.mark_dirty();
        }
    }
}
