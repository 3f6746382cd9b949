mod registry;
mod selectors;

pub use registry::{ModelRegistry, ModelSpec, DEFAULT_IMAGE_MODEL};
pub use selectors::{ModelSelection, ModelSelector};
