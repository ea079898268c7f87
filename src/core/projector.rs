use crate::core::pattern::GroupPattern;
use crate::domain::model::{IniModel, PropertyMap};
use crate::xml::{Document, Element};

pub const ROOT_ELEMENT: &str = "root";
pub const SECTION_ELEMENT: &str = "section";
pub const GROUP_ELEMENT: &str = "group";
pub const PROPERTY_ELEMENT: &str = "property";

/// Where the next property of a section is appended.
///
/// Only the most recent group is remembered: after leaving a group, meeting
/// its identifier again opens a new `group` element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupState {
    /// Properties go directly under the section. Equivalent to an empty
    /// current group identifier.
    #[default]
    InSection,
    InGroup(String),
}

/// What to do with the property that caused a state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Section,
    CurrentGroup,
    NewGroup(String),
}

impl GroupState {
    /// The property's name matched the pattern with group identifier `id`.
    pub fn on_match(&mut self, id: &str) -> Placement {
        match self {
            GroupState::InGroup(current) if current == id => Placement::CurrentGroup,
            GroupState::InSection if id.is_empty() => Placement::Section,
            _ => {
                *self = GroupState::InGroup(id.to_string());
                Placement::NewGroup(id.to_string())
            }
        }
    }

    /// The property's name did not match; fall back to the section.
    pub fn on_miss(&mut self) -> Placement {
        *self = GroupState::InSection;
        Placement::Section
    }
}

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn property_element(name: &str, value: &str) -> Element {
    let mut property = Element::new(PROPERTY_ELEMENT);
    property.set_attr("name", name);
    if !value.is_empty() {
        property.set_attr("value", value);
    }
    property
}

/// Builds the `section` element for one section, regrouping its properties
/// when a pattern is given.
pub fn project_section(
    section_name: &str,
    properties: &PropertyMap,
    pattern: Option<&GroupPattern>,
) -> Element {
    let mut section = Element::new(SECTION_ELEMENT);
    if !is_blank(section_name) {
        section.set_attr("name", section_name);
    }

    let mut state = GroupState::default();
    let mut open_group: Option<Element> = None;

    for (key, value) in properties.iter() {
        let Some(pattern) = pattern else {
            section.add_child_element(property_element(key, value));
            continue;
        };

        let (display_name, placement) = match pattern.split(key) {
            Some(grouped) => (grouped.name, state.on_match(grouped.group)),
            None => (key, state.on_miss()),
        };
        let property = property_element(display_name, value);

        match placement {
            Placement::CurrentGroup => match open_group.as_mut() {
                Some(group) => group.add_child_element(property),
                None => section.add_child_element(property),
            },
            Placement::Section => {
                close_group(&mut section, &mut open_group);
                section.add_child_element(property);
            }
            Placement::NewGroup(id) => {
                close_group(&mut section, &mut open_group);
                let mut group = Element::new(GROUP_ELEMENT);
                // gated on the section name, not the group id
                if !is_blank(section_name) {
                    group.set_attr("name", &id);
                }
                group.add_child_element(property);
                open_group = Some(group);
            }
        }
    }
    close_group(&mut section, &mut open_group);

    section
}

// Nothing is appended to the section while a group is open, so attaching the
// group when it closes keeps document order.
fn close_group(section: &mut Element, open_group: &mut Option<Element>) {
    if let Some(group) = open_group.take() {
        section.add_child_element(group);
    }
}

/// Projects the whole model into a `root` document.
pub fn project(model: &IniModel, pattern: Option<&GroupPattern>) -> Document {
    let mut root = Element::new(ROOT_ELEMENT);
    for (name, properties) in model.sections() {
        root.add_child_element(project_section(name, properties, pattern));
    }
    Document::new(root)
}

/// Number of `group` elements in a projected document.
pub fn count_groups(document: &Document) -> usize {
    document
        .root
        .children()
        .iter()
        .flat_map(|section| section.children())
        .filter(|child| child.name() == GROUP_ELEMENT)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classifier::parse_lines;

    const NUMERIC_PREFIX: &str = r"^(?<name>\d+)_(?<value>.+)";

    fn describe(elem: &Element) -> String {
        let attrs: Vec<String> = elem
            .attributes()
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        let mut out = format!("{}({})", elem.name(), attrs.join(","));
        if !elem.is_empty() {
            let children: Vec<String> = elem.children().iter().map(describe).collect();
            out.push_str(&format!("[{}]", children.join(" ")));
        }
        out
    }

    fn convert(lines: &[&str], pattern: Option<&str>) -> String {
        let model = parse_lines(lines.iter().copied());
        let pattern = pattern.map(GroupPattern::compile);
        describe(&project(&model, pattern.as_ref()).root)
    }

    #[test]
    fn test_grouping_example() {
        let out = convert(&["[section]", "2_foo=val1", "2_boo=val2"], Some(NUMERIC_PREFIX));
        assert_eq!(
            out,
            "root()[section(name=section)[group(name=2)[property(name=foo,value=val1) property(name=boo,value=val2)]]]"
        );
    }

    #[test]
    fn test_no_pattern_keeps_raw_names() {
        let out = convert(&["[section]", "2_foo=val1", "2_boo=val2"], None);
        assert_eq!(
            out,
            "root()[section(name=section)[property(name=2_foo,value=val1) property(name=2_boo,value=val2)]]"
        );
    }

    #[test]
    fn test_empty_value_has_no_value_attribute() {
        let out = convert(&["[s]", "key=", "bare"], None);
        assert_eq!(out, "root()[section(name=s)[property(name=key) property(name=bare)]]");
    }

    #[test]
    fn test_unnamed_section_has_no_name_attribute() {
        let out = convert(&["a=1", "[  ]", "b=2"], None);
        assert_eq!(
            out,
            "root()[section()[property(name=a,value=1)] section()[property(name=b,value=2)]]"
        );
    }

    #[test]
    fn test_group_name_follows_section_blankness() {
        let out = convert(&["1_a=x", "1_b=y"], Some(NUMERIC_PREFIX));
        assert_eq!(
            out,
            "root()[section()[group()[property(name=a,value=x) property(name=b,value=y)]]]"
        );
    }

    #[test]
    fn test_non_match_resets_to_section() {
        let out = convert(
            &["[s]", "1_a=x", "plain=p", "1_b=y"],
            Some(NUMERIC_PREFIX),
        );
        assert_eq!(
            out,
            "root()[section(name=s)[group(name=1)[property(name=a,value=x)] property(name=plain,value=p) group(name=1)[property(name=b,value=y)]]]"
        );
    }

    #[test]
    fn test_alternating_groups_are_not_merged() {
        let out = convert(&["[s]", "1_a=x", "2_b=y", "1_c=z"], Some(NUMERIC_PREFIX));
        assert_eq!(
            out,
            "root()[section(name=s)[group(name=1)[property(name=a,value=x)] group(name=2)[property(name=b,value=y)] group(name=1)[property(name=c,value=z)]]]"
        );
    }

    #[test]
    fn test_group_state_resets_per_section() {
        let out = convert(&["[a]", "1_x=1", "[b]", "1_y=2"], Some(NUMERIC_PREFIX));
        assert_eq!(
            out,
            "root()[section(name=a)[group(name=1)[property(name=x,value=1)]] section(name=b)[group(name=1)[property(name=y,value=2)]]]"
        );
    }

    #[test]
    fn test_unusable_pattern_leaves_properties_ungrouped() {
        let out = convert(&["[s]", "2_foo=v"], Some(r"^(\d+)_(.+)"));
        assert_eq!(out, "root()[section(name=s)[property(name=2_foo,value=v)]]");
    }

    #[test]
    fn test_empty_group_id_from_section_stays_in_section() {
        let out = convert(
            &["[s]", "foo=1", "3_bar=2", "baz=3"],
            Some(r"^(?:(?<name>\d+)_)?(?<value>[a-z]+)$"),
        );
        assert_eq!(
            out,
            "root()[section(name=s)[property(name=foo,value=1) group(name=3)[property(name=bar,value=2)] group(name=)[property(name=baz,value=3)]]]"
        );
    }

    #[test]
    fn test_empty_model_projects_bare_root() {
        let model = parse_lines(["; nothing", "", "[only-header]"]);
        let doc = project(&model, None);
        assert_eq!(doc.root.name(), ROOT_ELEMENT);
        assert!(doc.root.is_empty());
    }

    #[test]
    fn test_state_machine_transitions() {
        let mut state = GroupState::default();
        assert_eq!(state.on_match("1"), Placement::NewGroup("1".to_string()));
        assert_eq!(state.on_match("1"), Placement::CurrentGroup);
        assert_eq!(state.on_match("2"), Placement::NewGroup("2".to_string()));
        assert_eq!(state.on_miss(), Placement::Section);
        assert_eq!(state, GroupState::InSection);
        assert_eq!(state.on_match("2"), Placement::NewGroup("2".to_string()));
    }

    #[test]
    fn test_count_groups() {
        let model = parse_lines(["[s]", "1_a=x", "2_b=y", "c=z"]);
        let pattern = GroupPattern::compile(NUMERIC_PREFIX);
        assert_eq!(count_groups(&project(&model, Some(&pattern))), 2);
        assert_eq!(count_groups(&project(&model, None)), 0);
    }
}
