//! Fragment classifier — turn one annotation block into a typed fragment.
//!
//! The first whitespace-delimited token of the block decides the kind;
//! the rest of the first line is the header, the remaining lines are the
//! payload. A non-empty payload must parse as a YAML mapping so the
//! assembler can merge trees instead of concatenating text.

use crate::error::AssembleError;
use serde_yaml::Mapping;

/// What a fragment declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    Main,
    Operation,
    Components,
}

impl Directive {
    /// Exact, case-sensitive first-line token for this directive.
    fn token(self) -> &'static str {
        match self {
            Directive::Main => "openapi:main",
            Directive::Operation => "openapi:operation",
            Directive::Components => "openapi:components",
        }
    }
}

/// One classified annotation fragment.
#[derive(Debug)]
pub struct Fragment {
    pub directive: Directive,
    /// Rest of the first line, trimmed. Empty for bare declarations.
    pub header: String,
    /// Parsed payload, `None` when the block has no body.
    pub payload: Option<Mapping>,
}

/// Classify one annotation block.
pub fn classify(block: &str) -> Result<Fragment, AssembleError> {
    let (first_line, payload_text) = match block.split_once('\n') {
        Some((first, rest)) => (first.trim(), rest),
        None => (block.trim(), ""),
    };

    let token = first_line.split_whitespace().next().unwrap_or(first_line);
    let directive = [Directive::Main, Directive::Operation, Directive::Components]
        .into_iter()
        .find(|d| d.token() == token)
        .ok_or_else(|| AssembleError::UnknownDirective {
            line: first_line.to_string(),
        })?;

    let header = first_line[token.len()..].trim().to_string();

    let payload = if payload_text.trim().is_empty() {
        None
    } else {
        let mapping: Mapping = serde_yaml::from_str(payload_text).map_err(|source| {
            AssembleError::MalformedPayload {
                text: payload_text.to_string(),
                source,
            }
        })?;
        Some(mapping)
    };

    Ok(Fragment {
        directive,
        header,
        payload,
    })
}
