use thiserror::Error;

/// Reasons a single document could not be turned into a transfer object.
///
/// A decode failure only concerns the document being parsed; nothing that was
/// aggregated earlier is touched.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("document is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("document root must be a JSON object, found {0}")]
    NotAnObject(&'static str),

    #[error("document has no `links` field")]
    MissingLinks,

    #[error("`links` must be an array, found {0}")]
    LinksNotArray(&'static str),

    #[error("link #{index} is malformed: {source}")]
    InvalidLink {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} metadata is malformed: {source}")]
    InvalidMetadata {
        kind: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Only raised when the handler runs in strict mode.
    #[error("unrecognized top-level entry `{name}`")]
    UnrecognizedEntry { name: String },
}

/// Lookup on an empty collection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{what} is empty")]
pub struct NotFound {
    pub what: &'static str,
}

/// Short name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
