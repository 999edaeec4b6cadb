use std::sync::LazyLock;

use chrono::NaiveDateTime;

use crate::codec::{FieldRegistry, Json, ObjectReader, ParseError, parse_json};
use crate::domain::{ErrorDetails, PushInfoResponse, PushType};
use crate::wire::common::{read_error_details, unsigned};

#[derive(Debug, Default)]
pub(crate) struct PushInfoReader {
    ok: bool,
    push_uuid: Option<String>,
    push_time: Option<NaiveDateTime>,
    push_type: Option<PushType>,
    direct_responses: Option<u64>,
    sends: Option<u64>,
    group_id: Option<String>,
    error: Option<String>,
    error_details: Option<ErrorDetails>,
}

impl ObjectReader for PushInfoReader {
    type Output = PushInfoResponse;

    fn validate_and_build(self, json: &Json<'_>) -> Result<PushInfoResponse, ParseError> {
        // Error responses carry no report fields.
        if self.error.is_none() && self.push_uuid.is_none() {
            return Err(json.error("the push_uuid attribute must be present"));
        }
        Ok(PushInfoResponse {
            ok: self.ok,
            push_uuid: self.push_uuid,
            push_time: self.push_time,
            push_type: self.push_type,
            direct_responses: self.direct_responses,
            sends: self.sends,
            group_id: self.group_id,
            error: self.error,
            error_details: self.error_details,
        })
    }
}

static PUSH_INFO_FIELDS: LazyLock<FieldRegistry<PushInfoReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("ok", |reader, json| {
            reader.ok = json.boolean()?;
            Ok(())
        }),
        ("push_uuid", |reader, json| {
            reader.push_uuid = Some(json.string()?);
            Ok(())
        }),
        ("push_time", |reader, json| {
            reader.push_time = Some(json.datetime()?);
            Ok(())
        }),
        ("push_type", |reader, json| {
            let text = json.str_value()?;
            reader.push_type = Some(
                PushType::from_identifier(text)
                    .ok_or_else(|| json.error(format!("unrecognized push type '{text}'")))?,
            );
            Ok(())
        }),
        ("direct_responses", |reader, json| {
            reader.direct_responses = Some(unsigned(json)?);
            Ok(())
        }),
        ("sends", |reader, json| {
            reader.sends = Some(unsigned(json)?);
            Ok(())
        }),
        ("group_id", |reader, json| {
            reader.group_id = Some(json.string()?);
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

/// Deserialize an individual push report response body.
pub fn decode_push_info_response_json(input: &str) -> Result<PushInfoResponse, ParseError> {
    parse_json(&PUSH_INFO_FIELDS, input)
}
