pub mod config;
pub mod console;
pub mod detect;
pub mod error;
pub mod manifest;
pub mod prune;
pub mod scripts;
pub mod successor;
pub mod transform;
pub mod upgrade;

pub use config::{LintTool, LintToolConfig};
pub use error::LintshiftError;
pub use manifest::{Manifest, Section};
pub use transform::{Change, Migration};

pub type Result<T> = std::result::Result<T, LintshiftError>;
