use std::sync::LazyLock;

use serde_json::Value;

use crate::codec::{FieldRegistry, Json, ObjectReader, ObjectWriter, ParseError, parse_json};
use crate::domain::{ErrorDetails, PushPayload, Schedule, SchedulePayload, ScheduleResponse};
use crate::wire::common::{date, date_string, read_error_details, timestamp_string};
use crate::wire::push::{encode_push_payload, read_push_payload};

pub(crate) fn write_schedule(schedule: &Schedule) -> Value {
    let mut writer = ObjectWriter::new();
    match schedule {
        Schedule::ScheduledTime(time) => {
            writer.string("scheduled_time", &timestamp_string(*time));
        }
        Schedule::LocalScheduledTime(time) => {
            writer.string("local_scheduled_time", &timestamp_string(*time));
        }
        Schedule::BestTime { send_date } => {
            let mut best_time = ObjectWriter::new();
            best_time.string("send_date", &date_string(*send_date));
            writer.field("best_time", best_time.finish());
        }
    }
    writer.finish()
}

pub(crate) fn read_schedule(json: &Json<'_>) -> Result<Schedule, ParseError> {
    let mut builder = Schedule::builder();
    if let Some(time) = json.member("scheduled_time") {
        builder = builder.scheduled_time(time.datetime()?);
    }
    if let Some(time) = json.member("local_scheduled_time") {
        builder = builder.local_scheduled_time(time.datetime()?);
    }
    if let Some(best_time) = json.member("best_time") {
        builder = builder.best_time(date(&best_time.require("send_date")?)?);
    }
    builder.build().map_err(|err| json.invalid(err))
}

/// Serialize a schedule creation request body.
pub fn encode_schedule_payload(payload: &SchedulePayload) -> Value {
    let mut writer = ObjectWriter::new();
    writer.field("schedule", write_schedule(payload.schedule()));
    writer.maybe_string("name", payload.name());
    writer.field("push", encode_push_payload(payload.push()));
    writer.finish()
}

pub fn encode_schedule_payload_json(payload: &SchedulePayload) -> String {
    encode_schedule_payload(payload).to_string()
}

#[derive(Debug, Default)]
pub(crate) struct SchedulePayloadReader {
    schedule: Option<Schedule>,
    name: Option<String>,
    push: Option<PushPayload>,
}

impl ObjectReader for SchedulePayloadReader {
    type Output = SchedulePayload;

    fn validate_and_build(self, json: &Json<'_>) -> Result<SchedulePayload, ParseError> {
        let mut builder = SchedulePayload::builder();
        if let Some(schedule) = self.schedule {
            builder = builder.schedule(schedule);
        }
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(push) = self.push {
            builder = builder.push(push);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static SCHEDULE_PAYLOAD_FIELDS: LazyLock<FieldRegistry<SchedulePayloadReader>> =
    LazyLock::new(|| {
        FieldRegistry::new(&[
            ("schedule", |reader, json| {
                reader.schedule = Some(read_schedule(json)?);
                Ok(())
            }),
            ("name", |reader, json| {
                reader.name = Some(json.string()?);
                Ok(())
            }),
            ("push", |reader, json| {
                reader.push = Some(read_push_payload(json)?);
                Ok(())
            }),
        ])
    });

/// Deserialize a schedule payload from its request body shape.
pub fn decode_schedule_payload_json(input: &str) -> Result<SchedulePayload, ParseError> {
    parse_json(&SCHEDULE_PAYLOAD_FIELDS, input)
}

#[derive(Debug, Default)]
pub(crate) struct ScheduleResponseReader {
    ok: bool,
    operation_id: Option<String>,
    schedule_urls: Option<Vec<String>>,
    schedule_ids: Option<Vec<String>>,
    schedule_payloads: Option<Vec<Value>>,
    error: Option<String>,
    error_details: Option<ErrorDetails>,
}

impl ObjectReader for ScheduleResponseReader {
    type Output = ScheduleResponse;

    fn validate_and_build(self, _json: &Json<'_>) -> Result<ScheduleResponse, ParseError> {
        Ok(ScheduleResponse {
            ok: self.ok,
            operation_id: self.operation_id,
            schedule_urls: self.schedule_urls,
            schedule_ids: self.schedule_ids,
            schedule_payloads: self.schedule_payloads,
            error: self.error,
            error_details: self.error_details,
        })
    }
}

static SCHEDULE_RESPONSE_FIELDS: LazyLock<FieldRegistry<ScheduleResponseReader>> =
    LazyLock::new(|| {
        FieldRegistry::new(&[
            ("ok", |reader, json| {
                reader.ok = json.boolean()?;
                Ok(())
            }),
            ("operation_id", |reader, json| {
                reader.operation_id = Some(json.string()?);
                Ok(())
            }),
            ("schedule_urls", |reader, json| {
                reader.schedule_urls = Some(json.string_list()?);
                Ok(())
            }),
            ("schedule_ids", |reader, json| {
                reader.schedule_ids = Some(json.string_list()?);
                Ok(())
            }),
            ("schedules", |reader, json| {
                // Kept raw: the echoed payloads may carry server-side fields.
                reader.schedule_payloads = Some(
                    json.elements()?
                        .iter()
                        .map(|element| element.value().clone())
                        .collect(),
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

/// Deserialize a schedule creation response body.
pub fn decode_schedule_response_json(input: &str) -> Result<ScheduleResponse, ParseError> {
    parse_json(&SCHEDULE_RESPONSE_FIELDS, input)
}
