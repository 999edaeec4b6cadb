use serde_json::{Map, Value};

/// Token sink for the custom serializers: an object under construction.
///
/// Members are emitted in insertion order, so writers control the wire order
/// deterministically.
#[derive(Debug, Default)]
pub struct ObjectWriter {
    map: Map<String, Value>,
}

impl ObjectWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&mut self, name: impl Into<String>, value: Value) -> &mut Self {
        self.map.insert(name.into(), value);
        self
    }

    pub fn string(&mut self, name: impl Into<String>, value: &str) -> &mut Self {
        self.field(name, Value::String(value.to_owned()))
    }

    pub fn boolean(&mut self, name: impl Into<String>, value: bool) -> &mut Self {
        self.field(name, Value::Bool(value))
    }

    pub fn integer(&mut self, name: impl Into<String>, value: i64) -> &mut Self {
        self.field(name, Value::from(value))
    }

    /// Emit the member only when the value is present.
    pub fn maybe_string(&mut self, name: impl Into<String>, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.string(name, value);
        }
        self
    }

    pub fn finish(self) -> Value {
        Value::Object(self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::ObjectWriter;

    #[test]
    fn members_keep_insertion_order() {
        let mut writer = ObjectWriter::new();
        writer
            .string("audience", "all")
            .boolean("ok", true)
            .integer("expiry", 600)
            .maybe_string("alert", None)
            .maybe_string("title", Some("hi"));
        let value = writer.finish();
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"{"audience":"all","ok":true,"expiry":600,"title":"hi"}"#
        );
    }
}
