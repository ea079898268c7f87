use crate::domain::model::TransformResult;
use crate::utils::error::Result;

/// Where INI text comes from and XML bytes go to.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// One source of settings. `None` means "not set here", letting a lower
/// precedence source fill the value in.
pub trait ConfigProvider {
    fn input_path(&self) -> Option<&str>;
    fn output_path(&self) -> Option<&str>;
    fn group_pattern(&self) -> Option<&str>;
    fn indent(&self) -> Option<usize>;
    fn declaration(&self) -> Option<bool>;
}

pub trait Pipeline {
    /// Returns the input split into lines.
    fn extract(&self) -> Result<Vec<String>>;
    fn transform(&self, lines: Vec<String>) -> Result<TransformResult>;
    /// Persists the document and returns the path written.
    fn load(&self, result: TransformResult) -> Result<String>;
}
