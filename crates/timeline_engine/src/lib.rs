//! Timeline engine: document retrieval, ingestion pipeline and preference storage.
mod decode;
mod engine;
mod fetch;
mod frontmatter;
mod parse;
mod persist;
mod pipeline;
mod types;
mod validate;

pub use decode::{decode_document, DecodeError, DecodedDocument};
pub use engine::{EngineConfig, EngineHandle};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use frontmatter::extract_front_matter;
pub use parse::parse_structured;
pub use persist::{FilePreferenceStore, MemoryPreferenceStore, PersistError, PreferenceStore};
pub use pipeline::{ingest_document, load_document};
pub use types::{
    EngineError, EngineEvent, ErrorKind, FailureKind, FetchError, FetchMetadata, FetchOutput,
    LoadError,
};
pub use validate::{validate_entries, EntryDefect, EntryPolicy};

pub use serde_yaml::Value as StructuredValue;
