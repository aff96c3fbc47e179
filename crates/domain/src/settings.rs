//! Codec Settings Domain Model
//!
//! Defines output formatting preferences for the body transcoder.

use serde::{Deserialize, Serialize};

/// Formatting settings applied when the codec produces JSON or XML text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecSettings {
    /// Spaces per nesting level in JSON output. Zero produces compact JSON.
    #[serde(default = "default_indent")]
    pub json_indent: usize,

    /// Spaces per nesting level in XML output. Zero disables indentation.
    #[serde(default = "default_indent")]
    pub xml_indent: usize,

    /// Whether XML output starts with an `<?xml ...?>` declaration.
    #[serde(default = "default_xml_declaration")]
    pub xml_declaration: bool,
}

const fn default_indent() -> usize {
    2
}

const fn default_xml_declaration() -> bool {
    true
}

impl Default for CodecSettings {
    fn default() -> Self {
        Self {
            json_indent: default_indent(),
            xml_indent: default_indent(),
            xml_declaration: default_xml_declaration(),
        }
    }
}
