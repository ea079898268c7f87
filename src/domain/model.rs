use crate::xml::Document;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Properties of one section, in first-encounter order.
///
/// A repeated key keeps its first value; later occurrences are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: IndexMap<String, String>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when `name` was already present and the value was discarded.
    pub fn insert(&mut self, name: &str, value: &str) -> bool {
        match self.entries.entry(name.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(value.to_string());
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parsed INI content: section name to properties, ordered by the first
/// time each section name received a property.
///
/// The empty section name holds properties that precede any header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniModel {
    sections: IndexMap<String, PropertyMap>,
}

impl IniModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a property to `section`, creating the section on first use.
    pub fn add_property(&mut self, section: &str, name: &str, value: &str) -> bool {
        if let Some(properties) = self.sections.get_mut(section) {
            return properties.insert(name, value);
        }
        let mut properties = PropertyMap::new();
        properties.insert(name, value);
        self.sections.insert(section.to_string(), properties);
        true
    }

    pub fn section(&self, name: &str) -> Option<&PropertyMap> {
        self.sections.get(name)
    }

    pub fn sections(&self) -> impl Iterator<Item = (&str, &PropertyMap)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn property_count(&self) -> usize {
        self.sections.values().map(PropertyMap::len).sum()
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub document: Document,
    pub section_count: usize,
    pub property_count: usize,
    pub group_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let mut props = PropertyMap::new();
        assert!(props.insert("host", "a"));
        assert!(!props.insert("host", "b"));
        assert_eq!(props.get("host"), Some("a"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_properties_keep_insertion_order() {
        let mut props = PropertyMap::new();
        for key in ["zeta", "alpha", "mid"] {
            props.insert(key, "");
        }
        let keys: Vec<&str> = props.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_sections_ordered_by_first_property() {
        let mut model = IniModel::new();
        model.add_property("b", "k", "1");
        model.add_property("a", "k", "2");
        model.add_property("b", "other", "3");

        let names: Vec<&str> = model.sections().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(model.section_count(), 2);
        assert_eq!(model.property_count(), 3);
        assert_eq!(model.section("b").unwrap().get("other"), Some("3"));
    }

    #[test]
    fn test_duplicate_across_sections_is_kept() {
        let mut model = IniModel::new();
        assert!(model.add_property("a", "k", "1"));
        assert!(model.add_property("b", "k", "2"));
        assert!(!model.add_property("a", "k", "3"));
        assert_eq!(model.section("a").unwrap().get("k"), Some("1"));
        assert_eq!(model.section("b").unwrap().get("k"), Some("2"));
    }
}
