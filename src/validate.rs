//! Final document validation.
//!
//! The rendered text is re-parsed and deserialized into the typed OpenAPI 3
//! model, which enforces required keys and type conformance. On top of that,
//! internal `#/...` references are resolved against the document tree —
//! the typed model accepts any `$ref` string, but a dangling one would only
//! blow up in consumers.

use crate::error::AssembleError;
use serde_yaml::Value;

/// Check the rendered document against OpenAPI 3 structural rules.
pub fn validate(rendered: &str) -> Result<(), AssembleError> {
    let _typed: openapiv3::OpenAPI = serde_yaml::from_str(rendered)
        .map_err(|e| AssembleError::ValidationFailed(e.to_string()))?;

    let tree: Value = serde_yaml::from_str(rendered)
        .map_err(|e| AssembleError::ValidationFailed(e.to_string()))?;
    check_refs(&tree, &tree)?;
    Ok(())
}

/// Walk the tree and resolve every internal `$ref` against the root.
fn check_refs(root: &Value, node: &Value) -> Result<(), AssembleError> {
    match node {
        Value::Mapping(map) => {
            for (key, value) in map {
                if key.as_str() == Some("$ref") {
                    if let Some(target) = value.as_str() {
                        if let Some(pointer) = target.strip_prefix("#/") {
                            resolve(root, pointer).ok_or_else(|| {
                                AssembleError::ValidationFailed(format!(
                                    "unresolved reference: {target}"
                                ))
                            })?;
                        }
                    }
                }
                check_refs(root, value)?;
            }
        }
        Value::Sequence(seq) => {
            for value in seq {
                check_refs(root, value)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Follow a `/`-separated pointer through nested mappings. Segments use
/// JSON-pointer escaping: `~1` is `/`, `~0` is `~` (RFC 6901).
fn resolve<'a>(root: &'a Value, pointer: &str) -> Option<&'a Value> {
    pointer.split('/').try_fold(root, |node, segment| {
        let segment = segment.replace("~1", "/").replace("~0", "~");
        node.as_mapping()?.get(&Value::from(segment))
    })
}
