use crate::domain::model::IniModel;

/// What a single INI line turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Line<'a> {
    Section(&'a str),
    Property { name: &'a str, value: &'a str },
    Comment,
    Blank,
}

/// Classifies one raw line. Nothing is trimmed: a header must start with
/// `[` and end with `]` exactly, and property names and values keep their
/// surrounding whitespace.
pub fn classify(line: &str) -> Line<'_> {
    if line.starts_with('[') && line.ends_with(']') {
        // a lone "[" or "]" cannot satisfy both tests, so both strips succeed
        let name = &line[1..line.len() - 1];
        return Line::Section(name);
    }
    if line.starts_with(';') {
        return Line::Comment;
    }
    if line.trim().is_empty() {
        return Line::Blank;
    }
    match line.split_once('=') {
        Some((name, value)) => Line::Property { name, value },
        None => Line::Property {
            name: line,
            value: "",
        },
    }
}

/// Accumulates classified lines into an [`IniModel`].
#[derive(Debug, Default)]
pub struct IniParser {
    active_section: String,
    model: IniModel,
    discarded: usize,
}

impl IniParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn feed(&mut self, line: &str) {
        match classify(line) {
            Line::Section(name) => {
                tracing::trace!("entering section [{}]", name);
                self.active_section = name.to_string();
            }
            Line::Property { name, value } => {
                if !self.model.add_property(&self.active_section, name, value) {
                    tracing::debug!(
                        "duplicate property '{}' in section '{}' ignored",
                        name,
                        self.active_section
                    );
                    self.discarded += 1;
                }
            }
            Line::Comment | Line::Blank => {}
        }
    }

    /// Number of repeated properties dropped so far.
    pub fn discarded(&self) -> usize {
        self.discarded
    }

    pub fn finish(self) -> IniModel {
        self.model
    }
}

/// Parses every line into a fresh model.
pub fn parse_lines<I, S>(lines: I) -> IniModel
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = IniParser::new();
    for line in lines {
        parser.feed(line.as_ref());
    }
    parser.finish()
}
