#![deny(missing_docs)]
#![doc = "Core types and errors for the pipeline configuration generator."]

pub mod errors;
pub mod rng;
pub mod types;

pub use errors::{ErrorInfo, PipegenError};
pub use rng::RngHandle;
pub use types::{
    json_kind, Alternative, SearchMarker, SearchMode, SearchSpec, SearchableComponent, Slot,
    SEARCH_KEY,
};
