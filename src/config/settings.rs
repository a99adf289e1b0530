use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::client::DEFAULT_JSON_INDENT;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub output: OutputSettings,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    /// JSON indent width
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            indent: default_indent(),
        }
    }
}

fn default_indent() -> usize {
    DEFAULT_JSON_INDENT
}

/// How a record is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Display,
    Json,
    String,
    Table,
}
