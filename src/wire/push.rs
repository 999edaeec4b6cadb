use std::sync::LazyLock;

use serde_json::Value;

use crate::codec::{
    FieldRegistry, Json, ObjectReader, ObjectWriter, ParseError, parse_json, read_object,
};
use crate::domain::{
    DeviceTypeData, ErrorDetails, InApp, Notification, PushOptions, PushPayload, PushResponse,
    RichPushMessage, Selector,
};
use crate::wire::audience::{read_selector, write_selector};
use crate::wire::common::read_error_details;
use crate::wire::device_types::{read_device_types, write_device_types};
use crate::wire::expiry::{read_expiry, write_expiry};
use crate::wire::message::{read_in_app, read_message, write_in_app, write_message};
use crate::wire::notification::{read_notification, write_notification};

/// Serialize a push payload to the request body shape.
pub fn encode_push_payload(payload: &PushPayload) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .field("audience", write_selector(payload.audience()))
        .field("device_types", write_device_types(payload.device_types()));
    if let Some(notification) = payload.notification() {
        writer.field("notification", write_notification(notification));
    }
    if let Some(message) = payload.message() {
        writer.field("message", write_message(message));
    }
    if let Some(options) = payload.options() {
        writer.field("options", write_options(options));
    }
    if let Some(in_app) = payload.in_app() {
        writer.field("in_app", write_in_app(in_app));
    }
    writer.finish()
}

pub fn encode_push_payload_json(payload: &PushPayload) -> String {
    encode_push_payload(payload).to_string()
}

pub(crate) fn write_options(options: &PushOptions) -> Value {
    let mut writer = ObjectWriter::new();
    if let Some(expiry) = options.expiry() {
        writer.field("expiry", write_expiry(expiry));
    }
    if options.no_throttle() {
        writer.boolean("no_throttle", true);
    }
    if options.personalization() {
        writer.boolean("personalization", true);
    }
    writer.finish()
}

#[derive(Debug, Default)]
pub(crate) struct PushPayloadReader {
    audience: Option<Selector>,
    device_types: Option<DeviceTypeData>,
    notification: Option<Notification>,
    message: Option<RichPushMessage>,
    options: Option<PushOptions>,
    in_app: Option<InApp>,
}

impl ObjectReader for PushPayloadReader {
    type Output = PushPayload;

    fn validate_and_build(self, json: &Json<'_>) -> Result<PushPayload, ParseError> {
        let mut builder = PushPayload::builder();
        if let Some(audience) = self.audience {
            builder = builder.audience(audience);
        }
        if let Some(device_types) = self.device_types {
            builder = builder.device_types(device_types);
        }
        if let Some(notification) = self.notification {
            builder = builder.notification(notification);
        }
        if let Some(message) = self.message {
            builder = builder.message(message);
        }
        if let Some(options) = self.options {
            builder = builder.options(options);
        }
        if let Some(in_app) = self.in_app {
            builder = builder.in_app(in_app);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static PUSH_PAYLOAD_FIELDS: LazyLock<FieldRegistry<PushPayloadReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("audience", |reader, json| {
            reader.audience = Some(read_selector(json)?);
            Ok(())
        }),
        ("device_types", |reader, json| {
            reader.device_types = Some(read_device_types(json)?);
            Ok(())
        }),
        ("notification", |reader, json| {
            reader.notification = Some(read_notification(json)?);
            Ok(())
        }),
        ("message", |reader, json| {
            reader.message = Some(read_message(json)?);
            Ok(())
        }),
        ("options", |reader, json| {
            reader.options = Some(read_options(json)?);
            Ok(())
        }),
        ("in_app", |reader, json| {
            reader.in_app = Some(read_in_app(json)?);
            Ok(())
        }),
    ])
});

fn read_options(json: &Json<'_>) -> Result<PushOptions, ParseError> {
    let mut builder = PushOptions::builder();
    if let Some(expiry) = json.member("expiry") {
        builder = builder.expiry(read_expiry(&expiry)?);
    }
    if let Some(no_throttle) = json.member("no_throttle") {
        builder = builder.no_throttle(no_throttle.boolean()?);
    }
    if let Some(personalization) = json.member("personalization") {
        builder = builder.personalization(personalization.boolean()?);
    }
    Ok(builder.build())
}

pub(crate) fn read_push_payload(json: &Json<'_>) -> Result<PushPayload, ParseError> {
    read_object(&PUSH_PAYLOAD_FIELDS, json)
}

/// Deserialize a push payload from its request body shape.
pub fn decode_push_payload_json(input: &str) -> Result<PushPayload, ParseError> {
    parse_json(&PUSH_PAYLOAD_FIELDS, input)
}

#[derive(Debug, Default)]
pub(crate) struct PushResponseReader {
    ok: bool,
    operation_id: Option<String>,
    push_ids: Option<Vec<String>>,
    message_ids: Option<Vec<String>>,
    content_urls: Option<Vec<String>>,
    error: Option<String>,
    error_details: Option<ErrorDetails>,
}

impl ObjectReader for PushResponseReader {
    type Output = PushResponse;

    fn validate_and_build(self, _json: &Json<'_>) -> Result<PushResponse, ParseError> {
        Ok(PushResponse {
            ok: self.ok,
            operation_id: self.operation_id,
            push_ids: self.push_ids,
            message_ids: self.message_ids,
            content_urls: self.content_urls,
            error: self.error,
            error_details: self.error_details,
        })
    }
}

static PUSH_RESPONSE_FIELDS: LazyLock<FieldRegistry<PushResponseReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("ok", |reader, json| {
            reader.ok = json.boolean()?;
            Ok(())
        }),
        ("operation_id", |reader, json| {
            reader.operation_id = Some(json.string()?);
            Ok(())
        }),
        ("push_ids", |reader, json| {
            reader.push_ids = Some(json.string_list()?);
            Ok(())
        }),
        ("message_ids", |reader, json| {
            reader.message_ids = Some(json.string_list()?);
            Ok(())
        }),
        ("content_urls", |reader, json| {
            reader.content_urls = Some(json.string_list()?);
            Ok(())
        }),
        ("error", |reader, json| {
            reader.error = Some(json.string()?);
            Ok(())
        }),
        ("details", |reader, json| {
            reader.error_details = Some(read_error_details(json)?);
            Ok(())
        }),
    ])
});

/// Deserialize a push response body.
pub fn decode_push_response_json(input: &str) -> Result<PushResponse, ParseError> {
    parse_json(&PUSH_RESPONSE_FIELDS, input)
}

#[cfg(test)]
mod tests {
    use crate::domain::{DeviceType, Expiry};

    use super::*;

    fn minimal_payload() -> PushPayload {
        PushPayload::builder()
            .audience(Selector::All)
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .notification(Notification::alert_only("wat"))
            .build()
            .unwrap()
    }

    #[test]
    fn minimal_payload_serializes_exactly() {
        assert_eq!(
            encode_push_payload_json(&minimal_payload()),
            r#"{"audience":"all","device_types":["ios"],"notification":{"alert":"wat"}}"#
        );
    }

    #[test]
    fn minimal_payload_round_trips() {
        let text = encode_push_payload_json(&minimal_payload());
        let parsed = decode_push_payload_json(&text).unwrap();
        assert_eq!(parsed, minimal_payload());
        assert!(parsed.options().is_none());
    }

    #[test]
    fn options_carry_expiry_and_flags() {
        let payload = PushPayload::builder()
            .audience(Selector::tag("tag1"))
            .device_types(DeviceTypeData::of([DeviceType::Android]).unwrap())
            .notification(Notification::alert_only("hi"))
            .options(
                PushOptions::builder()
                    .expiry(Expiry::builder().seconds(600).build().unwrap())
                    .no_throttle(true)
                    .build(),
            )
            .build()
            .unwrap();
        let text = encode_push_payload_json(&payload);
        assert_eq!(
            text,
            r#"{"audience":{"tag":"tag1"},"device_types":["android"],"notification":{"alert":"hi"},"options":{"expiry":600,"no_throttle":true}}"#
        );
        assert_eq!(decode_push_payload_json(&text).unwrap(), payload);
    }

    #[test]
    fn unknown_payload_fields_are_skipped() {
        let payload = decode_push_payload_json(
            r#"{"audience":"all","device_types":["ios"],"notification":{"alert":"wat"},"campaigns":{"categories":["a"]}}"#,
        )
        .unwrap();
        assert_eq!(payload, minimal_payload());
    }

    #[test]
    fn payload_without_content_is_rejected() {
        let err =
            decode_push_payload_json(r#"{"audience":"all","device_types":["ios"]}"#).unwrap_err();
        assert_eq!(err.to_string(), "notification or message must be set");
    }

    #[test]
    fn push_response_success() {
        let response = decode_push_response_json(
            r#"{"ok":true,"operation_id":"df6a6b50","push_ids":["id1","id2"],"message_ids":[],"content_urls":[]}"#,
        )
        .unwrap();
        assert!(response.ok);
        assert_eq!(response.operation_id.as_deref(), Some("df6a6b50"));
        assert_eq!(response.push_ids.as_deref(), Some(&["id1".to_owned(), "id2".to_owned()][..]));
        assert_eq!(response.message_ids.as_deref(), Some(&[][..]));
    }

    #[test]
    fn push_response_error_details() {
        let response = decode_push_response_json(
            r#"{"ok":false,"error":"Could not parse request body.","details":{"error":"expected value","path":"audience","location":{"line":2,"column":21}}}"#,
        )
        .unwrap();
        assert!(!response.ok);
        let details = response.error_details.unwrap();
        assert_eq!(details.path.as_deref(), Some("audience"));
        assert_eq!(details.location.unwrap().line, 2);
    }

    #[test]
    fn malformed_response_reports_position() {
        let err = decode_push_response_json("{\n  \"ok\": tru\n}").unwrap_err();
        assert!(err.location().is_some());
    }
}
