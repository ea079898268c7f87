use crate::domain::ports::ConfigProvider;
use clap::Parser;

const GROUPING_HELP: &str = r#"Group pattern example. To turn

    [section]
    2_foo=val1
    2_boo=val2

into

    <section name="section">
      <group name="2">
        <property name="foo" value="val1" />
        <property name="boo" value="val2" />
      </group>
    </section>

use the group pattern "^(?<name>\d+)_(?<value>.+)"."#;

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "ini2xml", version)]
#[command(about = "Transform an INI file into an XML file")]
#[command(after_long_help = GROUPING_HELP)]
pub struct CliConfig {
    /// INI file to be transformed
    #[arg(value_name = "INI_FILE", allow_hyphen_values = true)]
    pub ini_file: Option<String>,

    /// XML file to be written
    #[arg(value_name = "XML_FILE", allow_hyphen_values = true)]
    pub xml_file: Option<String>,

    /// Regular expression with `name` and `value` captures; matching
    /// property names are gathered into <group> elements
    #[arg(value_name = "GROUP_PATTERN", allow_hyphen_values = true)]
    pub group_pattern: Option<String>,

    #[arg(hide = true)]
    pub extra: Vec<String>,

    /// TOML file supplying defaults for any setting not given here
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Spaces per nesting level; 0 writes a single line
    #[arg(long)]
    pub indent: Option<usize>,

    /// Omit the <?xml ...?> declaration
    #[arg(long)]
    pub no_declaration: bool,

    /// Parse and project without writing the XML file
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Both positional paths were given.
    pub fn has_paths(&self) -> bool {
        self.ini_file.is_some() && self.xml_file.is_some()
    }
}

impl ConfigProvider for CliConfig {
    fn input_path(&self) -> Option<&str> {
        self.ini_file.as_deref()
    }

    fn output_path(&self) -> Option<&str> {
        self.xml_file.as_deref()
    }

    fn group_pattern(&self) -> Option<&str> {
        self.group_pattern.as_deref()
    }

    fn indent(&self) -> Option<usize> {
        self.indent
    }

    fn declaration(&self) -> Option<bool> {
        self.no_declaration.then_some(false)
    }
}
