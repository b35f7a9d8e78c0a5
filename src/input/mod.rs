pub mod artifact;
pub mod patient;

pub use artifact::{LoadError, load_model, resolve_model_path};
pub use patient::{FeatureVector, RangeError};
