use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::codec::DATE_TIME_FORMAT;
use crate::codec::error::ParseError;
use crate::domain::ValidationError;

/// Positioned cursor over a parsed JSON document.
///
/// A cursor borrows one node of the document and remembers the path from the
/// root (`notification.actions.open`, `variants[2]`), so every extraction
/// failure can name the offending node. Cursors are cheap to copy around; all
/// typed extractors fail with a [`ParseError`] instead of coercing.
#[derive(Debug, Clone)]
pub struct Json<'a> {
    value: &'a Value,
    path: String,
}

impl<'a> Json<'a> {
    /// Cursor over the document root.
    pub fn root(value: &'a Value) -> Self {
        Self {
            value,
            path: String::new(),
        }
    }

    /// JSON path from the document root; empty at the root itself.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The raw node under the cursor.
    pub fn value(&self) -> &'a Value {
        self.value
    }

    fn member_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_owned()
        } else {
            format!("{}.{name}", self.path)
        }
    }

    /// Build an error pointing at this node.
    pub fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError::at_path(message, &self.path)
    }

    /// Translate a builder validation failure into a parse error at this node.
    pub fn invalid(&self, err: ValidationError) -> ParseError {
        ParseError::at_path(err.to_string(), &self.path)
    }

    /// The node as a JSON object.
    pub fn object(&self) -> Result<&'a Map<String, Value>, ParseError> {
        self.value
            .as_object()
            .ok_or_else(|| self.error("expected a JSON object"))
    }

    /// Members of a JSON object in document order, each with its own cursor.
    pub fn entries(&self) -> Result<Vec<(&'a str, Json<'a>)>, ParseError> {
        Ok(self
            .object()?
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str(),
                    Json {
                        value,
                        path: self.member_path(name),
                    },
                )
            })
            .collect())
    }

    /// A named member of a JSON object, if present.
    pub fn member(&self, name: &str) -> Option<Json<'a>> {
        self.value.as_object().and_then(|object| {
            object.get(name).map(|value| Json {
                value,
                path: self.member_path(name),
            })
        })
    }

    /// A named member that must be present.
    pub fn require(&self, name: &str) -> Result<Json<'a>, ParseError> {
        self.member(name)
            .ok_or_else(|| self.error(format!("the {name} attribute must be present")))
    }

    /// The node as a borrowed string.
    pub fn str_value(&self) -> Result<&'a str, ParseError> {
        self.value
            .as_str()
            .ok_or_else(|| self.error("expected a string value"))
    }

    /// The node as an owned string.
    pub fn string(&self) -> Result<String, ParseError> {
        self.str_value().map(str::to_owned)
    }

    /// The node as a boolean. No string coercion.
    pub fn boolean(&self) -> Result<bool, ParseError> {
        self.value
            .as_bool()
            .ok_or_else(|| self.error("expected a boolean value"))
    }

    /// The node as a signed integer.
    pub fn integer(&self) -> Result<i64, ParseError> {
        self.value
            .as_i64()
            .ok_or_else(|| self.error("expected an integer value"))
    }

    /// The node as a float.
    pub fn float(&self) -> Result<f64, ParseError> {
        self.value
            .as_f64()
            .ok_or_else(|| self.error("expected a number value"))
    }

    /// Elements of a JSON array, each with its own `[index]` path.
    pub fn elements(&self) -> Result<Vec<Json<'a>>, ParseError> {
        let items = self
            .value
            .as_array()
            .ok_or_else(|| self.error("expected a JSON array"))?;
        Ok(items
            .iter()
            .enumerate()
            .map(|(index, value)| Json {
                value,
                path: format!("{}[{index}]", self.path),
            })
            .collect())
    }

    /// A homogeneous array of strings.
    pub fn string_list(&self) -> Result<Vec<String>, ParseError> {
        self.elements()?
            .iter()
            .map(Json::string)
            .collect::<Result<Vec<_>, _>>()
    }

    /// An object with string values only.
    pub fn string_map(&self) -> Result<BTreeMap<String, String>, ParseError> {
        self.entries()?
            .into_iter()
            .map(|(name, member)| Ok((name.to_owned(), member.string()?)))
            .collect()
    }

    /// The node as an API timestamp (`2018-02-17T11:48:00`).
    pub fn datetime(&self) -> Result<NaiveDateTime, ParseError> {
        let text = self.str_value()?;
        NaiveDateTime::parse_from_str(text, DATE_TIME_FORMAT)
            .map_err(|_| self.error(format!("expected a timestamp, got '{text}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(json: &str) -> Value {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn member_paths_use_dot_notation() {
        let value = parsed(r#"{"notification":{"alert":"wat"}}"#);
        let root = Json::root(&value);
        let alert = root
            .member("notification")
            .unwrap()
            .member("alert")
            .unwrap();
        assert_eq!(alert.path(), "notification.alert");
        assert_eq!(alert.string().unwrap(), "wat");
    }

    #[test]
    fn array_paths_use_brackets() {
        let value = parsed(r#"{"variants":[{"weight":1},{"weight":2}]}"#);
        let root = Json::root(&value);
        let variants = root.member("variants").unwrap();
        let second = &variants.elements().unwrap()[1];
        assert_eq!(second.path(), "variants[1]");
        assert_eq!(second.member("weight").unwrap().integer().unwrap(), 2);
    }

    #[test]
    fn type_mismatch_names_the_path() {
        let value = parsed(r#"{"ok":"yes"}"#);
        let root = Json::root(&value);
        let err = root.member("ok").unwrap().boolean().unwrap_err();
        assert_eq!(err.path(), Some("ok"));
        assert_eq!(err.to_string(), "expected a boolean value at ok");
    }

    #[test]
    fn datetime_parses_api_format() {
        let value = parsed(r#"{"created":"2018-02-17T11:48:00"}"#);
        let root = Json::root(&value);
        let created = root.member("created").unwrap().datetime().unwrap();
        assert_eq!(created.to_string(), "2018-02-17 11:48:00");

        let value = parsed(r#"{"created":"yesterday"}"#);
        let root = Json::root(&value);
        assert!(root.member("created").unwrap().datetime().is_err());
    }

    #[test]
    fn require_reports_missing_members() {
        let value = parsed(r#"{}"#);
        let err = Json::root(&value).require("content").unwrap_err();
        assert_eq!(err.to_string(), "the content attribute must be present");
    }
}
