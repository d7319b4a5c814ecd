//! Document assembler — merges classified fragments into one OpenAPI tree.
//!
//! The assembler is an explicit builder: created empty, fed one block at a
//! time, rendered and validated exactly once via [`Assembler::finish`]. The
//! document is held as a YAML tree and serialized in a single pass, so
//! payload indentation never has to be re-counted. Paths and component
//! types are kept in `BTreeMap`s — emission order is lexicographic and
//! reproducible across runs.

use crate::error::AssembleError;
use crate::fragment::{classify, Directive, Fragment};
use crate::validate;
use serde_yaml::{Mapping, Value};
use std::collections::BTreeMap;

/// One operation under a path. Append order within a path is preserved.
#[derive(Debug)]
struct OperationEntry {
    method: String,
    operation_id: String,
    body: Mapping,
}

/// Builder for the assembled document.
#[derive(Debug, Default)]
pub struct Assembler {
    main: Option<Mapping>,
    paths: BTreeMap<String, Vec<OperationEntry>>,
    components: BTreeMap<String, Mapping>,
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one annotation block and merge it into the document.
    pub fn add(&mut self, block: &str) -> Result<(), AssembleError> {
        let Fragment {
            directive,
            header,
            payload,
        } = classify(block)?;
        match directive {
            Directive::Main => self.set_main(payload),
            Directive::Operation => self.add_operation(&header, payload),
            Directive::Components => self.add_component(&header, payload),
        }
    }

    /// Render and validate; consumes the builder.
    pub fn finish(self) -> Result<String, AssembleError> {
        let rendered = self.render()?;
        validate::validate(&rendered)?;
        Ok(rendered)
    }

    fn set_main(&mut self, payload: Option<Mapping>) -> Result<(), AssembleError> {
        if self.main.is_some() {
            return Err(AssembleError::DuplicateMain);
        }
        let payload = payload.unwrap_or_default();
        // paths/components are assembler-owned sections
        for reserved in ["paths", "components"] {
            if payload.contains_key(&Value::from(reserved)) {
                return Err(AssembleError::ReservedKeyConflict {
                    key: reserved.to_string(),
                });
            }
        }
        self.main = Some(payload);
        Ok(())
    }

    /// Header grammar: `<METHOD> <path> [?tag...] <operationId>`.
    /// Tags sit between path and id and currently have no effect.
    fn add_operation(
        &mut self,
        header: &str,
        payload: Option<Mapping>,
    ) -> Result<(), AssembleError> {
        let tokens: Vec<&str> = header.split_whitespace().collect();
        if tokens.len() < 3 {
            return Err(AssembleError::MalformedHeader {
                header: header.to_string(),
                expected: "<method> <path> <operationId>",
            });
        }
        let operation_id = tokens[tokens.len() - 1];
        if operation_id.starts_with('?') {
            return Err(AssembleError::MalformedHeader {
                header: header.to_string(),
                expected: "an operation id after the tag list",
            });
        }
        // OpenAPI path item keys are lowercase
        let method = tokens[0].to_ascii_lowercase();
        let path = tokens[1].to_string();

        self.paths.entry(path).or_default().push(OperationEntry {
            method,
            operation_id: operation_id.to_string(),
            body: payload.unwrap_or_default(),
        });
        Ok(())
    }

    /// Merge a fragment's definitions into its component-type bucket.
    /// Many fragments may contribute to the same type; entries accumulate
    /// in append order.
    fn add_component(&mut self, header: &str, payload: Option<Mapping>) -> Result<(), AssembleError> {
        let component_type = match header.split_whitespace().next() {
            Some(t) => t.to_string(),
            None => {
                return Err(AssembleError::MalformedHeader {
                    header: header.to_string(),
                    expected: "<componentType>",
                })
            }
        };
        let bucket = self.components.entry(component_type).or_default();
        for (key, value) in payload.unwrap_or_default() {
            bucket.insert(key, value);
        }
        Ok(())
    }

    /// Serialize the assembled tree: main keys in author order, then
    /// `paths` (sorted), then `components` (sorted).
    pub fn render(&self) -> Result<String, AssembleError> {
        let mut root = self.main.clone().unwrap_or_default();

        if !self.paths.is_empty() {
            let mut paths = Mapping::new();
            for (path, entries) in &self.paths {
                let mut item = Mapping::new();
                for entry in entries {
                    let mut op = Mapping::new();
                    op.insert(
                        Value::from("operationId"),
                        Value::from(entry.operation_id.clone()),
                    );
                    for (key, value) in &entry.body {
                        op.insert(key.clone(), value.clone());
                    }
                    item.insert(Value::from(entry.method.clone()), Value::Mapping(op));
                }
                paths.insert(Value::from(path.clone()), Value::Mapping(item));
            }
            root.insert(Value::from("paths"), Value::Mapping(paths));
        }

        if !self.components.is_empty() {
            let mut components = Mapping::new();
            for (component_type, bucket) in &self.components {
                components.insert(
                    Value::from(component_type.clone()),
                    Value::Mapping(bucket.clone()),
                );
            }
            root.insert(Value::from("components"), Value::Mapping(components));
        }

        Ok(serde_yaml::to_string(&Value::Mapping(root))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAIN: &str = "openapi:main\nopenapi: 3.0.3\ninfo:\n  title: X\n  version: \"1\"";

    fn parsed(assembler: &Assembler) -> Value {
        serde_yaml::from_str(&assembler.render().unwrap()).unwrap()
    }

    #[test]
    fn main_payload_becomes_top_level() {
        let mut a = Assembler::new();
        a.add(MAIN).unwrap();
        let doc = parsed(&a);
        assert_eq!(doc["info"]["title"], Value::from("X"));
        assert_eq!(doc["openapi"], Value::from("3.0.3"));
    }

    #[test]
    fn second_main_is_rejected() {
        let mut a = Assembler::new();
        a.add(MAIN).unwrap();
        let err = a.add("openapi:main\ninfo: {title: Y, version: \"2\"}").unwrap_err();
        assert!(matches!(err, AssembleError::DuplicateMain));
    }

    #[test]
    fn main_must_not_own_reserved_sections() {
        let mut a = Assembler::new();
        let err = a
            .add("openapi:main\npaths:\n  /x:\n    get: {}")
            .unwrap_err();
        assert!(matches!(
            err,
            AssembleError::ReservedKeyConflict { ref key } if key == "paths"
        ));
    }

    #[test]
    fn short_operation_header_is_rejected() {
        let mut a = Assembler::new();
        let err = a.add("openapi:operation GET /items").unwrap_err();
        assert!(matches!(err, AssembleError::MalformedHeader { .. }));
    }

    #[test]
    fn tags_sit_between_path_and_operation_id() {
        let mut a = Assembler::new();
        a.add("openapi:operation GET /items ?pub ?beta listItems")
            .unwrap();
        let doc = parsed(&a);
        assert_eq!(
            doc["paths"]["/items"]["get"]["operationId"],
            Value::from("listItems")
        );
    }

    #[test]
    fn trailing_tag_without_id_is_rejected() {
        let mut a = Assembler::new();
        let err = a.add("openapi:operation GET /items ?pub").unwrap_err();
        assert!(matches!(err, AssembleError::MalformedHeader { .. }));
    }

    #[test]
    fn methods_share_a_path() {
        let mut a = Assembler::new();
        a.add("openapi:operation GET /items listItems").unwrap();
        a.add("openapi:operation POST /items createItem").unwrap();
        let doc = parsed(&a);
        let item = &doc["paths"]["/items"];
        assert_eq!(item.as_mapping().unwrap().len(), 2);
        assert_eq!(item["get"]["operationId"], Value::from("listItems"));
        assert_eq!(item["post"]["operationId"], Value::from("createItem"));
    }

    #[test]
    fn duplicate_method_is_not_rejected_and_last_wins() {
        let mut a = Assembler::new();
        a.add("openapi:operation GET /items listItems").unwrap();
        a.add("openapi:operation GET /items listItemsAgain").unwrap();
        let doc = parsed(&a);
        let item = &doc["paths"]["/items"];
        assert_eq!(item.as_mapping().unwrap().len(), 1);
        assert_eq!(item["get"]["operationId"], Value::from("listItemsAgain"));
    }

    #[test]
    fn bare_components_header_is_rejected() {
        let mut a = Assembler::new();
        let err = a.add("openapi:components").unwrap_err();
        assert!(matches!(err, AssembleError::MalformedHeader { .. }));
    }

    #[test]
    fn paths_emit_sorted() {
        let mut a = Assembler::new();
        a.add("openapi:operation GET /zebra z").unwrap();
        a.add("openapi:operation GET /alpha a").unwrap();
        let rendered = a.render().unwrap();
        let alpha = rendered.find("/alpha").unwrap();
        let zebra = rendered.find("/zebra").unwrap();
        assert!(alpha < zebra);
    }

    #[test]
    fn component_fragments_accumulate() {
        let mut a = Assembler::new();
        a.add("openapi:components schemas\nItem:\n  type: object").unwrap();
        a.add("openapi:components schemas\nUser:\n  type: object").unwrap();
        let doc = parsed(&a);
        let schemas = doc["components"]["schemas"].as_mapping().unwrap();
        assert_eq!(schemas.len(), 2);
        assert!(schemas.contains_key(&Value::from("Item")));
        assert!(schemas.contains_key(&Value::from("User")));
    }

    #[test]
    fn component_types_emit_sorted() {
        let mut a = Assembler::new();
        a.add("openapi:components securitySchemes\nkey: {type: apiKey, name: k, in: header}")
            .unwrap();
        a.add("openapi:components parameters\nPage: {name: page, in: query, schema: {type: integer}}")
            .unwrap();
        let rendered = a.render().unwrap();
        let parameters = rendered.find("parameters").unwrap();
        let schemes = rendered.find("securitySchemes").unwrap();
        assert!(parameters < schemes);
    }

    #[test]
    fn render_round_trips() {
        let mut a = Assembler::new();
        a.add(MAIN).unwrap();
        a.add("openapi:operation GET /items listItems\nresponses:\n  \"200\":\n    description: ok")
            .unwrap();
        a.add("openapi:operation DELETE /items/{id} deleteItem").unwrap();
        a.add("openapi:components schemas\nItem:\n  type: object").unwrap();
        let doc = parsed(&a);
        assert_eq!(doc["paths"].as_mapping().unwrap().len(), 2);
        assert_eq!(doc["paths"]["/items"].as_mapping().unwrap().len(), 1);
        assert_eq!(doc["components"].as_mapping().unwrap().len(), 1);
    }

    #[test]
    fn payload_merges_under_method_key() {
        let mut a = Assembler::new();
        a.add("openapi:operation GET /items listItems\nsummary: List them\nresponses:\n  \"200\":\n    description: ok")
            .unwrap();
        let doc = parsed(&a);
        let op = &doc["paths"]["/items"]["get"];
        assert_eq!(op["operationId"], Value::from("listItems"));
        assert_eq!(op["summary"], Value::from("List them"));
        assert_eq!(op["responses"]["200"]["description"], Value::from("ok"));
    }

    #[test]
    fn finish_validates_the_whole_document() {
        let mut a = Assembler::new();
        a.add(MAIN).unwrap();
        a.add("openapi:operation GET /items listItems\nresponses:\n  \"200\":\n    description: ok")
            .unwrap();
        let rendered = a.finish().unwrap();
        assert!(rendered.contains("operationId: listItems"));
    }

    #[test]
    fn finish_rejects_incomplete_documents() {
        let mut a = Assembler::new();
        // no main fragment: missing openapi/info keys
        a.add("openapi:operation GET /items listItems\nresponses:\n  \"200\":\n    description: ok")
            .unwrap();
        let err = a.finish().unwrap_err();
        assert!(matches!(err, AssembleError::ValidationFailed(_)));
    }
}
