//! Extractors that reject with the error envelope.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::{NO_DATA_PROVIDED, ValidatedJson};
