//! Error taxonomy for classification, assembly, and final validation.
//!
//! Every variant is fatal to the whole run — the caller never writes a
//! partial document. Variants carry enough of the offending fragment to
//! locate the source comment.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssembleError {
    /// First-line token matches none of the three directives.
    #[error("unknown directive: {line}")]
    UnknownDirective { line: String },

    /// Operation header needs at least method, path, and operation id;
    /// components header needs a component-type name.
    #[error("malformed header: {header:?} (expected {expected})")]
    MalformedHeader { header: String, expected: &'static str },

    /// Payload text is not a well-formed YAML mapping.
    #[error("invalid YAML payload: {source}\n--- offending text ---\n{text}")]
    MalformedPayload {
        text: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// More than one `openapi:main` fragment in the input.
    #[error("main section already set")]
    DuplicateMain,

    /// Main payload declares a top-level section the assembler owns.
    #[error("main section must not declare {key:?} — it is generated from operation/components fragments")]
    ReservedKeyConflict { key: String },

    /// Rendered document failed OpenAPI structural validation.
    #[error("document failed OpenAPI validation: {0}")]
    ValidationFailed(String),

    /// Assembled tree could not be serialized as YAML.
    #[error("failed to serialize document")]
    Serialize(#[from] serde_yaml::Error),
}
