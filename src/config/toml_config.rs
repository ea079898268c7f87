use crate::domain::ports::ConfigProvider;
use crate::utils::error::{ConvertError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional settings file, passed with `--config`.
///
/// ```toml
/// [conversion]
/// input = "settings.ini"
/// output = "settings.xml"
/// group_pattern = '^(?<name>\d+)_(?<value>.+)'
///
/// [output]
/// indent = 2
/// declaration = true
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub conversion: ConversionSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConversionSection {
    pub input: Option<String>,
    pub output: Option<String>,
    pub group_pattern: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub indent: Option<usize>,
    pub declaration: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigParseError {
            message: e.to_string(),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unknown variables are
    /// left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> Option<&str> {
        self.conversion.input.as_deref()
    }

    fn output_path(&self) -> Option<&str> {
        self.conversion.output.as_deref()
    }

    fn group_pattern(&self) -> Option<&str> {
        self.conversion.group_pattern.as_deref()
    }

    fn indent(&self) -> Option<usize> {
        self.output.indent
    }

    fn declaration(&self) -> Option<bool> {
        self.output.declaration
    }
}
