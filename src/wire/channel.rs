use std::sync::LazyLock;

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::codec::{
    FieldRegistry, Json, ObjectReader, ObjectWriter, ParseError, parse_json, read_object,
};
use crate::domain::{
    ChannelResponse, ChannelView, DeviceType, ErrorDetails, RegisterEmailChannel,
};
use crate::wire::common::{read_error_details, timestamp_string};
use crate::wire::device_types::read_device_type;

#[derive(Debug, Default)]
pub(crate) struct ChannelViewReader {
    channel_id: Option<String>,
    device_type: Option<DeviceType>,
    installed: Option<bool>,
    opt_in: Option<bool>,
    background: Option<bool>,
    push_address: Option<String>,
    created: Option<NaiveDateTime>,
    last_registration: Option<NaiveDateTime>,
    alias: Option<String>,
    tags: Vec<String>,
    named_user: Option<String>,
}

impl ObjectReader for ChannelViewReader {
    type Output = ChannelView;

    fn validate_and_build(self, json: &Json<'_>) -> Result<ChannelView, ParseError> {
        let mut builder = ChannelView::builder();
        if let Some(channel_id) = self.channel_id {
            builder = builder.channel_id(channel_id);
        }
        if let Some(device_type) = self.device_type {
            builder = builder.device_type(device_type);
        }
        if let Some(installed) = self.installed {
            builder = builder.installed(installed);
        }
        if let Some(opt_in) = self.opt_in {
            builder = builder.opt_in(opt_in);
        }
        if let Some(background) = self.background {
            builder = builder.background(background);
        }
        if let Some(push_address) = self.push_address {
            builder = builder.push_address(push_address);
        }
        if let Some(created) = self.created {
            builder = builder.created(created);
        }
        if let Some(last_registration) = self.last_registration {
            builder = builder.last_registration(last_registration);
        }
        if let Some(alias) = self.alias {
            builder = builder.alias(alias);
        }
        for tag in self.tags {
            builder = builder.tag(tag);
        }
        if let Some(named_user) = self.named_user {
            builder = builder.named_user(named_user);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static CHANNEL_VIEW_FIELDS: LazyLock<FieldRegistry<ChannelViewReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("channel_id", |reader, json| {
            reader.channel_id = Some(json.string()?);
            Ok(())
        }),
        ("device_type", |reader, json| {
            reader.device_type = Some(read_device_type(json)?);
            Ok(())
        }),
        ("installed", |reader, json| {
            reader.installed = Some(json.boolean()?);
            Ok(())
        }),
        ("opt_in", |reader, json| {
            reader.opt_in = Some(json.boolean()?);
            Ok(())
        }),
        ("background", |reader, json| {
            reader.background = Some(json.boolean()?);
            Ok(())
        }),
        ("push_address", |reader, json| {
            // Explicit null is common here for opted-out channels.
            if !json.value().is_null() {
                reader.push_address = Some(json.string()?);
            }
            Ok(())
        }),
        ("created", |reader, json| {
            reader.created = Some(json.datetime()?);
            Ok(())
        }),
        ("last_registration", |reader, json| {
            if !json.value().is_null() {
                reader.last_registration = Some(json.datetime()?);
            }
            Ok(())
        }),
        ("alias", |reader, json| {
            if !json.value().is_null() {
                reader.alias = Some(json.string()?);
            }
            Ok(())
        }),
        ("tags", |reader, json| {
            reader.tags = json.string_list()?;
            Ok(())
        }),
        ("named_user_id", |reader, json| {
            if !json.value().is_null() {
                reader.named_user = Some(json.string()?);
            }
            Ok(())
        }),
    ])
});

pub(crate) fn read_channel_view(json: &Json<'_>) -> Result<ChannelView, ParseError> {
    read_object(&CHANNEL_VIEW_FIELDS, json)
}

#[derive(Debug, Default)]
pub(crate) struct ChannelResponseReader {
    ok: bool,
    next_page: Option<String>,
    channel: Option<ChannelView>,
    channels: Option<Vec<ChannelView>>,
    error: Option<String>,
    error_details: Option<ErrorDetails>,
}

impl ObjectReader for ChannelResponseReader {
    type Output = ChannelResponse;

    fn validate_and_build(self, _json: &Json<'_>) -> Result<ChannelResponse, ParseError> {
        Ok(ChannelResponse {
            ok: self.ok,
            next_page: self.next_page,
            channel: self.channel,
            channels: self.channels,
            error: self.error,
            error_details: self.error_details,
        })
    }
}

static CHANNEL_RESPONSE_FIELDS: LazyLock<FieldRegistry<ChannelResponseReader>> =
    LazyLock::new(|| {
        FieldRegistry::new(&[
            ("ok", |reader, json| {
                reader.ok = json.boolean()?;
                Ok(())
            }),
            ("next_page", |reader, json| {
                reader.next_page = Some(json.string()?);
                Ok(())
            }),
            ("channel", |reader, json| {
                reader.channel = Some(read_channel_view(json)?);
                Ok(())
            }),
            ("channels", |reader, json| {
                reader.channels = Some(
                    json.elements()?
                        .iter()
                        .map(read_channel_view)
                        .collect::<Result<Vec<_>, _>>()?,
                );
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

/// Deserialize a channel lookup or listing response body.
pub fn decode_channel_response_json(input: &str) -> Result<ChannelResponse, ParseError> {
    parse_json(&CHANNEL_RESPONSE_FIELDS, input)
}

/// Serialize an email channel registration request body.
pub fn encode_email_channel_registration(channel: &RegisterEmailChannel) -> Value {
    let mut body = ObjectWriter::new();
    body.string("type", "email").string("address", channel.address());
    if let Some(opted_in) = channel.commercial_opted_in() {
        body.string("commercial_opted_in", &timestamp_string(opted_in));
    }
    if let Some(opted_in) = channel.transactional_opted_in() {
        body.string("transactional_opted_in", &timestamp_string(opted_in));
    }
    let mut writer = ObjectWriter::new();
    writer.field("channel", body.finish());
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_lookup_round_trips_the_view() {
        let response = decode_channel_response_json(
            r#"{
                "ok": true,
                "channel": {
                    "channel_id": "0a8bcbbb-a24f-4739-a921-ae9d4433a2b2",
                    "device_type": "ios",
                    "installed": true,
                    "opt_in": true,
                    "background": true,
                    "push_address": "3C0590EBCC11618723B3D4C8AA60BCFB",
                    "created": "2018-02-17T11:48:00",
                    "last_registration": "2018-05-01T18:00:27",
                    "alias": "mobile_1",
                    "tags": ["tag1", "tag2"],
                    "named_user_id": "user-id-1234"
                }
            }"#,
        )
        .unwrap();
        let channel = response.channel.unwrap();
        assert_eq!(channel.channel_id(), "0a8bcbbb-a24f-4739-a921-ae9d4433a2b2");
        assert_eq!(channel.device_type(), &DeviceType::Ios);
        assert_eq!(channel.background(), Some(true));
        assert_eq!(channel.tags().unwrap().len(), 2);
        assert_eq!(channel.named_user(), Some("user-id-1234"));
    }

    #[test]
    fn nulls_and_missing_tags_are_tolerated() {
        let response = decode_channel_response_json(
            r#"{"ok":true,"channel":{"channel_id":"id","device_type":"email","installed":false,"opt_in":false,"push_address":null,"alias":null}}"#,
        )
        .unwrap();
        let channel = response.channel.unwrap();
        assert!(channel.push_address().is_none());
        assert!(channel.tags().is_none());
    }

    #[test]
    fn listings_carry_a_next_page() {
        let response = decode_channel_response_json(
            r#"{
                "ok": true,
                "next_page": "https://go.urbanairship.com/api/channels?start=abc",
                "channels": [
                    {"channel_id":"a","device_type":"ios","installed":true,"opt_in":true},
                    {"channel_id":"b","device_type":"android","installed":true,"opt_in":false}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.channels.unwrap().len(), 2);
        assert!(response.next_page.unwrap().contains("start=abc"));
    }

    #[test]
    fn bad_channel_element_names_its_path() {
        let err = decode_channel_response_json(
            r#"{"ok":true,"channels":[{"channel_id":"a","device_type":"fax","installed":true,"opt_in":true}]}"#,
        )
        .unwrap_err();
        assert_eq!(err.path(), Some("channels[0].device_type"));
    }

    #[test]
    fn email_registration_body() {
        let channel = RegisterEmailChannel::builder()
            .address("user@example.com")
            .commercial_opted_in(
                NaiveDateTime::parse_from_str("2020-10-28T10:34:22", "%Y-%m-%dT%H:%M:%S").unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(
            encode_email_channel_registration(&channel).to_string(),
            r#"{"channel":{"type":"email","address":"user@example.com","commercial_opted_in":"2020-10-28T10:34:22"}}"#
        );
    }
}
