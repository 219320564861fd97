//! Rendering the finished document.

use std::path::Path;

use serde_json::Value;

use crate::error::WriteError;

/// Serialization format of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json {
        pretty: bool,
    },
}

/// Serialize `document` in full before anything is written.
pub fn render(document: &Value, format: OutputFormat) -> Result<String, WriteError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(document).map_err(|source| WriteError::Yaml { source })
        }
        OutputFormat::Json { pretty: true } => {
            serde_json::to_string_pretty(document).map_err(|source| WriteError::Json { source })
        }
        OutputFormat::Json { pretty: false } => {
            serde_json::to_string(document).map_err(|source| WriteError::Json { source })
        }
    }
}

/// Render and write to `path`. The file is untouched if rendering fails.
pub fn write_document(document: &Value, format: OutputFormat, path: &Path) -> Result<(), WriteError> {
    let rendered = render(document, format)?;
    std::fs::write(path, rendered).map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
