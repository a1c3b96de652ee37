use crate::{RequestId, Theme, TimelineEntry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Selectable document sources, in cycling order.
    SourcesConfigured(Vec<String>),
    /// First activation: start loading the first configured source.
    Activated,
    /// User selected an arbitrary document source.
    SourceSelected(String),
    /// User asked for the next configured source.
    NextSourceClicked,
    /// User edited the search box.
    QueryChanged(String),
    /// User clicked the theme toggle.
    ThemeToggled,
    /// Theme read back from the preference store at startup.
    ThemeRestored(Theme),
    /// Engine completion for a load. Errors arrive already reduced to a message.
    DocumentLoaded {
        request_id: RequestId,
        outcome: Result<Vec<TimelineEntry>, String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
