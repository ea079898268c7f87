pub mod classifier;
pub mod engine;
pub mod pattern;
pub mod pipeline;
pub mod projector;

pub use crate::domain::model::{IniModel, PropertyMap, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
