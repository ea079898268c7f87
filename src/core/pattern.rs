use regex::Regex;

/// A property name split by a [`GroupPattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupedName<'a> {
    /// The `name` capture: which group the property belongs to.
    pub group: &'a str,
    /// The `value` capture: the property name with the group prefix removed.
    pub name: &'a str,
}

/// Regex with exactly two named captures, `name` and `value`, used to pull a
/// group identifier out of property names.
///
/// A pattern that does not compile, or has any other capture layout, is
/// kept but never matches.
#[derive(Debug, Clone)]
pub struct GroupPattern {
    source: String,
    regex: Option<Regex>,
}

impl GroupPattern {
    /// Builds a pattern from an optional setting. Absent or blank input means
    /// no grouping at all.
    pub fn from_setting(setting: Option<&str>) -> Option<Self> {
        match setting {
            Some(source) if !source.trim().is_empty() => Some(Self::compile(source)),
            _ => None,
        }
    }

    pub fn compile(source: &str) -> Self {
        let regex = match Regex::new(source) {
            Ok(regex) if has_group_captures(&regex) => Some(regex),
            Ok(_) => {
                tracing::warn!(
                    "Group pattern '{}' must have exactly the named captures 'name' and 'value'; grouping disabled",
                    source
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    "Group pattern '{}' does not compile ({}); grouping disabled",
                    source,
                    e
                );
                None
            }
        };

        Self {
            source: source.to_string(),
            regex,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// `false` when the pattern was rejected and will never match.
    pub fn is_usable(&self) -> bool {
        self.regex.is_some()
    }

    /// Splits `property` into group and residual name, or `None` when it does
    /// not match. A capture that did not participate reads as empty.
    pub fn split<'a>(&self, property: &'a str) -> Option<GroupedName<'a>> {
        let caps = self.regex.as_ref()?.captures(property)?;
        Some(GroupedName {
            group: caps.name("name").map_or("", |m| m.as_str()),
            name: caps.name("value").map_or("", |m| m.as_str()),
        })
    }
}

fn has_group_captures(regex: &Regex) -> bool {
    // slot 0 is the whole match
    if regex.captures_len() != 3 {
        return false;
    }
    let names: Vec<&str> = regex.capture_names().flatten().collect();
    names.contains(&"name") && names.contains(&"value")
}
