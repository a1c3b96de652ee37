//! Timeline core: pure state machine, entry filter and view-model helpers.
mod effect;
mod entry;
mod filter;
mod msg;
mod state;
mod theme;
mod update;
mod view_model;

pub use effect::Effect;
pub use entry::TimelineEntry;
pub use filter::filter_entries;
pub use msg::Msg;
pub use state::{AppState, Phase, PipelineState, RequestId};
pub use theme::{Theme, UnknownTheme};
pub use update::update;
pub use view_model::{source_label, AppViewModel, TimelineStatus};
