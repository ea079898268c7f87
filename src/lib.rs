pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod xml;

pub use adapters::storage::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{ConversionSettings, TomlConfig};

pub use crate::core::{engine::ConversionEngine, pipeline::IniXmlPipeline};
pub use crate::core::{pattern::GroupPattern, projector::project};
pub use domain::model::{IniModel, PropertyMap};
pub use utils::error::{ConvertError, Result};

/// Parses `lines` and projects them into an XML document in one call.
pub fn convert_lines<I, S>(lines: I, group_pattern: Option<&str>) -> xml::Document
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let model = crate::core::classifier::parse_lines(lines);
    let pattern = GroupPattern::from_setting(group_pattern);
    project(&model, pattern.as_ref())
}
