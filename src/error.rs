//! Error types for catalog loading, schema building and output rendering.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading and parsing the field catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Format errors (exit code 2)
    #[error("invalid catalog JSON: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    #[error("asset '{asset}' declares no properties")]
    EmptyAsset { asset: String },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// A type tag that matches no entry of the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized type \"{tag}\"")]
pub struct UnrecognizedTypeError {
    /// The raw tag as it appeared in the catalog.
    pub tag: String,
}

/// Errors while assembling the schema document.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("asset '{asset}', field '{field}': {source}")]
    UnrecognizedType {
        asset: String,
        field: String,
        #[source]
        source: UnrecognizedTypeError,
    },

    #[error("schema key '{key}' is produced more than once")]
    DuplicateSchema { key: String },
}

impl BuildError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

/// Errors while rendering or writing the finished document.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot serialize JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot serialize YAML: {source}")]
    Yaml {
        #[source]
        source: serde_yaml::Error,
    },

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl WriteError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            WriteError::Io { .. } => 3,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_exit_codes() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("documentation.json"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = LoadError::EmptyAsset {
            asset: "stops".into(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn unrecognized_type_display() {
        let err = UnrecognizedTypeError {
            tag: "banana".into(),
        };
        assert_eq!(err.to_string(), "unrecognized type \"banana\"");
    }

    #[test]
    fn build_error_names_location() {
        let err = BuildError::UnrecognizedType {
            asset: "stops".into(),
            field: "stop_lat".into(),
            source: UnrecognizedTypeError {
                tag: "Banana".into(),
            },
        };
        assert_eq!(
            err.to_string(),
            "asset 'stops', field 'stop_lat': unrecognized type \"Banana\""
        );
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn write_error_exit_codes() {
        let err = WriteError::Io {
            path: PathBuf::from("/out.yaml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.exit_code(), 3);
    }
}
