use crate::{RequestId, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch and ingest `source`; the result comes back as `Msg::DocumentLoaded`.
    FetchDocument { request_id: RequestId, source: String },
    /// Write the theme preference through to the preference store.
    PersistTheme(Theme),
}
