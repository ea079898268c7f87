use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_required_field, Validate};
use crate::xml::WriteOptions;
use std::path::Path;

pub const DEFAULT_INDENT: usize = 2;
pub const MAX_INDENT: usize = 16;

/// Fully resolved settings for one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSettings {
    pub input: String,
    pub output: String,
    pub group_pattern: Option<String>,
    pub indent: usize,
    pub declaration: bool,
}

impl ConversionSettings {
    pub fn new(input: &str, output: &str) -> Self {
        Self {
            input: input.to_string(),
            output: output.to_string(),
            group_pattern: None,
            indent: DEFAULT_INDENT,
            declaration: true,
        }
    }

    pub fn with_group_pattern(mut self, pattern: &str) -> Self {
        self.group_pattern = Some(pattern.to_string());
        self
    }

    /// Merges providers in precedence order, the first to set a value wins.
    pub fn resolve(providers: &[&dyn ConfigProvider]) -> Result<Self> {
        fn first<'a, T>(
            providers: &[&'a dyn ConfigProvider],
            get: impl Fn(&'a dyn ConfigProvider) -> Option<T>,
        ) -> Option<T> {
            providers.iter().find_map(|p| get(*p))
        }

        let input = first(providers, |p| p.input_path()).map(str::to_string);
        let output = first(providers, |p| p.output_path()).map(str::to_string);

        Ok(Self {
            input: validate_required_field("input", &input)?.clone(),
            output: validate_required_field("output", &output)?.clone(),
            group_pattern: first(providers, |p| p.group_pattern()).map(str::to_string),
            indent: first(providers, |p| p.indent()).unwrap_or(DEFAULT_INDENT),
            declaration: first(providers, |p| p.declaration()).unwrap_or(true),
        })
    }

    /// Rewrites both paths as absolute paths against the current directory.
    pub fn absolutize(mut self) -> Result<Self> {
        self.input = absolute(&self.input)?;
        self.output = absolute(&self.output)?;
        Ok(self)
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            indent: (self.indent > 0).then_some(self.indent),
            declaration: self.declaration,
        }
    }
}

fn absolute(path: &str) -> Result<String> {
    let resolved = std::path::absolute(Path::new(path))?;
    Ok(resolved.to_string_lossy().into_owned())
}

impl Validate for ConversionSettings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input)?;
        validate_path("output", &self.output)?;
        validate_range("indent", self.indent, 0, MAX_INDENT)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ConvertError;

    #[derive(Default)]
    struct Layer {
        input: Option<&'static str>,
        output: Option<&'static str>,
        pattern: Option<&'static str>,
        indent: Option<usize>,
        declaration: Option<bool>,
    }

    impl ConfigProvider for Layer {
        fn input_path(&self) -> Option<&str> {
            self.input
        }
        fn output_path(&self) -> Option<&str> {
            self.output
        }
        fn group_pattern(&self) -> Option<&str> {
            self.pattern
        }
        fn indent(&self) -> Option<usize> {
            self.indent
        }
        fn declaration(&self) -> Option<bool> {
            self.declaration
        }
    }

    #[test]
    fn test_first_provider_wins() {
        let cli = Layer {
            input: Some("cli.ini"),
            indent: Some(4),
            ..Default::default()
        };
        let file = Layer {
            input: Some("file.ini"),
            output: Some("file.xml"),
            pattern: Some(r"^(?<name>\d+)_(?<value>.+)"),
            indent: Some(8),
            declaration: Some(false),
        };

        let settings = ConversionSettings::resolve(&[&cli, &file]).unwrap();

        assert_eq!(settings.input, "cli.ini");
        assert_eq!(settings.output, "file.xml");
        assert_eq!(settings.indent, 4);
        assert!(!settings.declaration);
        assert!(settings.group_pattern.is_some());
    }

    #[test]
    fn test_defaults() {
        let cli = Layer {
            input: Some("a.ini"),
            output: Some("a.xml"),
            ..Default::default()
        };
        let settings = ConversionSettings::resolve(&[&cli]).unwrap();
        assert_eq!(settings, ConversionSettings::new("a.ini", "a.xml"));
        assert_eq!(settings.write_options(), WriteOptions::pretty(DEFAULT_INDENT));
    }

    #[test]
    fn test_missing_output_is_reported() {
        let cli = Layer {
            input: Some("a.ini"),
            ..Default::default()
        };
        let err = ConversionSettings::resolve(&[&cli]).unwrap_err();
        assert!(matches!(err, ConvertError::MissingConfigError { field } if field == "output"));
    }

    #[test]
    fn test_zero_indent_is_compact() {
        let mut settings = ConversionSettings::new("a.ini", "a.xml");
        settings.indent = 0;
        assert_eq!(settings.write_options().indent, None);
    }

    #[test]
    fn test_validation() {
        let mut settings = ConversionSettings::new("a.ini", "a.xml");
        assert!(settings.validate().is_ok());
        settings.indent = MAX_INDENT + 1;
        assert!(settings.validate().is_err());
        let empty = ConversionSettings::new("", "a.xml");
        assert!(empty.validate().is_err());
    }

    #[test]
    fn test_absolutize() {
        let settings = ConversionSettings::new("in.ini", "out/out.xml")
            .absolutize()
            .unwrap();
        assert!(Path::new(&settings.input).is_absolute());
        assert!(settings.output.ends_with("out.xml"));
    }
}
