//! Shared HTTP building blocks: error bodies and request extractors

pub mod error;
pub mod validated_json;

pub use error::{ApiError, ErrorBody};
pub use validated_json::ValidatedJson;
