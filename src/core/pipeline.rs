use crate::config::ConversionSettings;
use crate::core::classifier::IniParser;
use crate::core::pattern::GroupPattern;
use crate::core::projector::{count_groups, project};
use crate::domain::model::TransformResult;
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::Result;

/// Splits file content into lines, dropping a UTF-8 byte order mark.
/// `\r\n`, `\n` and a lone `\r` all end a line; a final terminator does not
/// start an extra empty line.
pub fn split_lines(content: &str) -> Vec<String> {
    let mut rest = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = Vec::new();

    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + terminator..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}

pub struct IniXmlPipeline<S: Storage> {
    storage: S,
    settings: ConversionSettings,
    pattern: Option<GroupPattern>,
}

impl<S: Storage> IniXmlPipeline<S> {
    pub fn new(storage: S, settings: ConversionSettings) -> Self {
        let pattern = GroupPattern::from_setting(settings.group_pattern.as_deref());
        Self {
            storage,
            settings,
            pattern,
        }
    }

    pub fn settings(&self) -> &ConversionSettings {
        &self.settings
    }

    pub fn pattern(&self) -> Option<&GroupPattern> {
        self.pattern.as_ref()
    }
}

impl<S: Storage> Pipeline for IniXmlPipeline<S> {
    fn extract(&self) -> Result<Vec<String>> {
        tracing::debug!("Reading INI file: {}", self.settings.input);
        let data = self.storage.read_file(&self.settings.input)?;
        // undecodable bytes become U+FFFD instead of failing the run
        let content = String::from_utf8_lossy(&data);
        Ok(split_lines(&content))
    }

    fn transform(&self, lines: Vec<String>) -> Result<TransformResult> {
        let mut parser = IniParser::new();
        for line in &lines {
            parser.feed(line);
        }
        if parser.discarded() > 0 {
            tracing::info!("Ignored {} duplicate properties", parser.discarded());
        }
        let model = parser.finish();

        let document = project(&model, self.pattern.as_ref());
        let group_count = count_groups(&document);

        Ok(TransformResult {
            document,
            section_count: model.section_count(),
            property_count: model.property_count(),
            group_count,
        })
    }

    fn load(&self, result: TransformResult) -> Result<String> {
        let xml = result
            .document
            .to_xml_string(&self.settings.write_options())?;

        tracing::debug!(
            "Writing {} bytes to {}",
            xml.len(),
            self.settings.output
        );
        self.storage
            .write_file(&self.settings.output, xml.as_bytes())?;

        Ok(self.settings.output.clone())
    }
}
