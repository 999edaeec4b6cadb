use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde_json::Value;

use crate::codec::{FieldRegistry, Json, ObjectReader, ObjectWriter, ParseError, read_object};
use crate::domain::{InApp, Position, RichPushMessage};

pub(crate) fn write_message(message: &RichPushMessage) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .string("title", message.title())
        .string("body", message.body())
        .maybe_string("content_type", message.content_type());
    if !message.extra().is_empty() {
        let mut extra = ObjectWriter::new();
        for (name, value) in message.extra() {
            extra.string(name.clone(), value);
        }
        writer.field("extra", extra.finish());
    }
    writer.finish()
}

#[derive(Debug, Default)]
pub(crate) struct MessageReader {
    title: Option<String>,
    body: Option<String>,
    content_type: Option<String>,
    extra: BTreeMap<String, String>,
}

impl ObjectReader for MessageReader {
    type Output = RichPushMessage;

    fn validate_and_build(self, json: &Json<'_>) -> Result<RichPushMessage, ParseError> {
        let mut builder = RichPushMessage::builder();
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        if let Some(body) = self.body {
            builder = builder.body(body);
        }
        if let Some(content_type) = self.content_type {
            builder = builder.content_type(content_type);
        }
        for (key, value) in self.extra {
            builder = builder.extra(key, value);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static MESSAGE_FIELDS: LazyLock<FieldRegistry<MessageReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("title", |reader, json| {
            reader.title = Some(json.string()?);
            Ok(())
        }),
        ("body", |reader, json| {
            reader.body = Some(json.string()?);
            Ok(())
        }),
        ("content_type", |reader, json| {
            reader.content_type = Some(json.string()?);
            Ok(())
        }),
        ("extra", |reader, json| {
            reader.extra = json.string_map()?;
            Ok(())
        }),
    ])
});

pub(crate) fn read_message(json: &Json<'_>) -> Result<RichPushMessage, ParseError> {
    read_object(&MESSAGE_FIELDS, json)
}

pub(crate) fn write_in_app(in_app: &InApp) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .string("alert", in_app.alert())
        .string("display_type", in_app.display_type());
    if let Some(position) = in_app.position() {
        let mut display = ObjectWriter::new();
        display.string("position", position.identifier());
        writer.field("display", display.finish());
    }
    writer.finish()
}

#[derive(Debug, Default)]
pub(crate) struct InAppReader {
    alert: Option<String>,
    display_type: Option<String>,
    position: Option<Position>,
}

impl ObjectReader for InAppReader {
    type Output = InApp;

    fn validate_and_build(self, json: &Json<'_>) -> Result<InApp, ParseError> {
        let mut builder = InApp::builder();
        if let Some(alert) = self.alert {
            builder = builder.alert(alert);
        }
        if let Some(display_type) = self.display_type {
            builder = builder.display_type(display_type);
        }
        if let Some(position) = self.position {
            builder = builder.position(position);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static IN_APP_FIELDS: LazyLock<FieldRegistry<InAppReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("alert", |reader, json| {
            reader.alert = Some(json.string()?);
            Ok(())
        }),
        ("display_type", |reader, json| {
            reader.display_type = Some(json.string()?);
            Ok(())
        }),
        ("display", |reader, json| {
            if let Some(position) = json.member("position") {
                let text = position.str_value()?;
                reader.position = Some(Position::from_identifier(text).ok_or_else(|| {
                    position.error(format!("unrecognized position '{text}'"))
                })?);
            }
            Ok(())
        }),
    ])
});

pub(crate) fn read_in_app(json: &Json<'_>) -> Result<InApp, ParseError> {
    read_object(&IN_APP_FIELDS, json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(input: &str) -> Value {
        serde_json::from_str(input).unwrap()
    }

    #[test]
    fn message_round_trips() {
        let input =
            r#"{"title":"T","body":"B","content_type":"text/html","extra":{"offer_id":"608a1"}}"#;
        let value = parsed(input);
        let message = read_message(&Json::root(&value)).unwrap();
        assert_eq!(message.extra().get("offer_id"), Some(&"608a1".to_owned()));
        assert_eq!(serde_json::to_string(&write_message(&message)).unwrap(), input);
    }

    #[test]
    fn message_requires_title_and_body() {
        let value = parsed(r#"{"title":"T"}"#);
        let err = read_message(&Json::root(&value)).unwrap_err();
        assert_eq!(err.to_string(), "body must be set");
    }

    #[test]
    fn in_app_round_trips_with_display_position() {
        let input = r#"{"alert":"This part appears in-app!","display_type":"banner","display":{"position":"top"}}"#;
        let value = parsed(input);
        let in_app = read_in_app(&Json::root(&value)).unwrap();
        assert_eq!(in_app.position(), Some(Position::Top));
        assert_eq!(serde_json::to_string(&write_in_app(&in_app)).unwrap(), input);
    }

    #[test]
    fn unknown_positions_are_rejected() {
        let value = parsed(r#"{"alert":"x","display_type":"banner","display":{"position":"left"}}"#);
        let err = read_in_app(&Json::root(&value)).unwrap_err();
        assert_eq!(err.path(), Some("display.position"));
    }
}
