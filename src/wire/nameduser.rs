use std::sync::LazyLock;

use crate::codec::{FieldRegistry, Json, ObjectReader, ParseError, parse_json, read_object};
use crate::domain::{ChannelView, ErrorDetails, NamedUserListingResponse, NamedUserView};
use crate::wire::channel::read_channel_view;
use crate::wire::common::read_error_details;

#[derive(Debug, Default)]
pub(crate) struct NamedUserViewReader {
    named_user_id: Option<String>,
    tags: Vec<(String, Vec<String>)>,
    channels: Vec<ChannelView>,
}

impl ObjectReader for NamedUserViewReader {
    type Output = NamedUserView;

    fn validate_and_build(self, json: &Json<'_>) -> Result<NamedUserView, ParseError> {
        let mut builder = NamedUserView::builder();
        if let Some(named_user_id) = self.named_user_id {
            builder = builder.named_user_id(named_user_id);
        }
        for (group, tags) in self.tags {
            for tag in tags {
                builder = builder.tag(group.clone(), tag);
            }
        }
        for channel in self.channels {
            builder = builder.channel(channel);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static NAMED_USER_FIELDS: LazyLock<FieldRegistry<NamedUserViewReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("named_user_id", |reader, json| {
            reader.named_user_id = Some(json.string()?);
            Ok(())
        }),
        ("tags", |reader, json| {
            reader.tags = json
                .entries()?
                .into_iter()
                .map(|(group, member)| Ok((group.to_owned(), member.string_list()?)))
                .collect::<Result<Vec<_>, ParseError>>()?;
            Ok(())
        }),
        ("channels", |reader, json| {
            reader.channels = json
                .elements()?
                .iter()
                .map(read_channel_view)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(())
        }),
    ])
});

pub(crate) fn read_named_user_view(json: &Json<'_>) -> Result<NamedUserView, ParseError> {
    read_object(&NAMED_USER_FIELDS, json)
}

#[derive(Debug, Default)]
pub(crate) struct NamedUserListingReader {
    ok: bool,
    next_page: Option<String>,
    named_user: Option<NamedUserView>,
    named_users: Option<Vec<NamedUserView>>,
    error: Option<String>,
    error_details: Option<ErrorDetails>,
}

impl ObjectReader for NamedUserListingReader {
    type Output = NamedUserListingResponse;

    fn validate_and_build(self, _json: &Json<'_>) -> Result<NamedUserListingResponse, ParseError> {
        Ok(NamedUserListingResponse {
            ok: self.ok,
            next_page: self.next_page,
            named_user: self.named_user,
            named_users: self.named_users,
            error: self.error,
            error_details: self.error_details,
        })
    }
}

static NAMED_USER_LISTING_FIELDS: LazyLock<FieldRegistry<NamedUserListingReader>> =
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
            ("named_user", |reader, json| {
                reader.named_user = Some(read_named_user_view(json)?);
                Ok(())
            }),
            ("named_users", |reader, json| {
                reader.named_users = Some(
                    json.elements()?
                        .iter()
                        .map(read_named_user_view)
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

/// Deserialize a named user lookup or listing response body.
pub fn decode_named_user_response_json(
    input: &str,
) -> Result<NamedUserListingResponse, ParseError> {
    parse_json(&NAMED_USER_LISTING_FIELDS, input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_response_with_tags_and_channels() {
        let response = decode_named_user_response_json(
            r#"{
                "ok": true,
                "named_user": {
                    "named_user_id": "user-id-1234",
                    "tags": {"crm": ["tag1", "tag2"]},
                    "channels": [
                        {"channel_id":"abcdef","device_type":"ios","installed":true,"opt_in":true}
                    ]
                }
            }"#,
        )
        .unwrap();
        let user = response.named_user.unwrap();
        assert_eq!(user.named_user_id(), "user-id-1234");
        assert_eq!(user.tags()["crm"].len(), 2);
        assert_eq!(user.channels()[0].channel_id(), "abcdef");
    }

    #[test]
    fn listing_response_with_paging() {
        let response = decode_named_user_response_json(
            r#"{
                "ok": true,
                "next_page": "https://go.urbanairship.com/api/named_users?start=user-b",
                "named_users": [
                    {"named_user_id": "user-a", "tags": {}, "channels": []},
                    {"named_user_id": "user-b", "tags": {}, "channels": []}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(response.named_users.unwrap().len(), 2);
        assert!(response.next_page.is_some());
    }

    #[test]
    fn tag_groups_must_hold_string_lists() {
        let err = decode_named_user_response_json(
            r#"{"ok":true,"named_user":{"named_user_id":"u","tags":{"crm":"tag1"}}}"#,
        )
        .unwrap_err();
        assert_eq!(err.path(), Some("named_user.tags.crm"));
    }
}
