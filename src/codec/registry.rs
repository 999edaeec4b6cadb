use std::collections::HashMap;

use serde_json::Value;

use crate::codec::cursor::Json;
use crate::codec::error::ParseError;

/// Handler for one recognized field: consume the member value into the reader.
pub type FieldParser<R> = fn(&mut R, &Json<'_>) -> Result<(), ParseError>;

/// Immutable mapping from wire field name to its parse handler.
///
/// One registry exists per entity type, built once in a `LazyLock` static and
/// shared by every deserialization call; it holds no per-call state.
pub struct FieldRegistry<R> {
    fields: HashMap<&'static str, FieldParser<R>>,
}

impl<R> FieldRegistry<R> {
    pub fn new(fields: &[(&'static str, FieldParser<R>)]) -> Self {
        Self {
            fields: fields.iter().copied().collect(),
        }
    }

    pub fn field_parser(&self, name: &str) -> Option<FieldParser<R>> {
        self.fields.get(name).copied()
    }
}

/// Per-call accumulator that wraps a builder during deserialization.
///
/// One reader instance is created per [`read_object`] call and never shared.
/// The terminal step validates the accumulated state and either yields the
/// immutable entity or a [`ParseError`] locating the object being parsed.
pub trait ObjectReader: Default {
    type Output;

    fn validate_and_build(self, json: &Json<'_>) -> Result<Self::Output, ParseError>;
}

/// Generic streaming driver shared by every entity type.
///
/// Expects an object node, feeds each member through the registry in document
/// order, skips unrecognized members (of arbitrary depth) for forward
/// compatibility, and finishes with the reader's validate-and-build step.
pub fn read_object<R: ObjectReader>(
    registry: &FieldRegistry<R>,
    json: &Json<'_>,
) -> Result<R::Output, ParseError> {
    let mut reader = R::default();
    for (name, member) in json.entries()? {
        if let Some(parse) = registry.field_parser(name) {
            parse(&mut reader, &member)?;
        }
    }
    reader.validate_and_build(json)
}

/// Parse a whole document with an entity's registry.
pub fn parse_json<R: ObjectReader>(
    registry: &FieldRegistry<R>,
    input: &str,
) -> Result<R::Output, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    read_object(registry, &Json::root(&value))
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::*;

    #[derive(Debug, Default)]
    struct PairReader {
        left: Option<String>,
        right: Option<i64>,
    }

    #[derive(Debug, PartialEq)]
    struct Pair {
        left: String,
        right: i64,
    }

    impl ObjectReader for PairReader {
        type Output = Pair;

        fn validate_and_build(self, json: &Json<'_>) -> Result<Pair, ParseError> {
            Ok(Pair {
                left: self
                    .left
                    .ok_or_else(|| json.error("left must be set"))?,
                right: self
                    .right
                    .ok_or_else(|| json.error("right must be set"))?,
            })
        }
    }

    static PAIR_FIELDS: LazyLock<FieldRegistry<PairReader>> = LazyLock::new(|| {
        FieldRegistry::new(&[
            ("left", |reader, json| {
                reader.left = Some(json.string()?);
                Ok(())
            }),
            ("right", |reader, json| {
                reader.right = Some(json.integer()?);
                Ok(())
            }),
        ])
    });

    #[test]
    fn known_fields_dispatch_through_the_registry() {
        let pair = parse_json(&PAIR_FIELDS, r#"{"left":"a","right":2}"#).unwrap();
        assert_eq!(
            pair,
            Pair {
                left: "a".to_owned(),
                right: 2
            }
        );
    }

    #[test]
    fn unknown_fields_are_skipped() {
        let pair = parse_json(
            &PAIR_FIELDS,
            r#"{"left":"a","mystery":{"nested":[1,{"deep":true}]},"right":2}"#,
        )
        .unwrap();
        assert_eq!(pair.right, 2);
    }

    #[test]
    fn duplicate_members_are_last_write_wins() {
        let pair = parse_json(&PAIR_FIELDS, r#"{"left":"a","right":1,"right":2}"#).unwrap();
        assert_eq!(pair.right, 2);
    }

    #[test]
    fn non_object_root_is_rejected() {
        let err = parse_json(&PAIR_FIELDS, "[]").unwrap_err();
        assert_eq!(err.to_string(), "expected a JSON object");
    }

    #[test]
    fn missing_required_field_is_reported_at_build_time() {
        let err = parse_json(&PAIR_FIELDS, r#"{"left":"a"}"#).unwrap_err();
        assert_eq!(err.to_string(), "right must be set");
    }

    #[test]
    fn malformed_documents_report_line_and_column() {
        let err = parse_json(&PAIR_FIELDS, "{ left }").unwrap_err();
        assert!(err.location().is_some());
    }
}
