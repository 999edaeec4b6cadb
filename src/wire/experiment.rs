use std::sync::LazyLock;

use serde_json::Value;

use crate::codec::{FieldRegistry, Json, ObjectReader, ObjectWriter, ParseError, parse_json};
use crate::domain::{ErrorDetails, Experiment, ExperimentResponse, Variant, VariantPushPayload};
use crate::wire::audience::write_selector;
use crate::wire::common::read_error_details;
use crate::wire::device_types::write_device_types;
use crate::wire::message::write_in_app;
use crate::wire::notification::write_notification;
use crate::wire::push::write_options;
use crate::wire::schedule::write_schedule;

/// Serialize an experiment creation request body.
pub fn encode_experiment(experiment: &Experiment) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .maybe_string("name", experiment.name())
        .maybe_string("description", experiment.description());
    if let Some(control) = experiment.control() {
        writer.field("control", Value::from(control));
    }
    writer
        .field("audience", write_selector(experiment.audience()))
        .field("device_types", write_device_types(experiment.device_types()))
        .field(
            "variants",
            Value::Array(experiment.variants().iter().map(write_variant).collect()),
        );
    writer.finish()
}

pub fn encode_experiment_json(experiment: &Experiment) -> String {
    encode_experiment(experiment).to_string()
}

fn write_variant(variant: &Variant) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .maybe_string("name", variant.name())
        .maybe_string("description", variant.description());
    if let Some(schedule) = variant.schedule() {
        writer.field("schedule", write_schedule(schedule));
    }
    if let Some(weight) = variant.weight() {
        writer.integer("weight", weight);
    }
    writer.field("push", write_variant_push(variant.push()));
    writer.finish()
}

fn write_variant_push(push: &VariantPushPayload) -> Value {
    let mut writer = ObjectWriter::new();
    writer.field("notification", write_notification(push.notification()));
    if let Some(options) = push.options() {
        writer.field("options", write_options(options));
    }
    if let Some(in_app) = push.in_app() {
        writer.field("in_app", write_in_app(in_app));
    }
    writer.finish()
}

#[derive(Debug, Default)]
pub(crate) struct ExperimentResponseReader {
    ok: bool,
    operation_id: Option<String>,
    experiment_id: Option<String>,
    push_id: Option<String>,
    error: Option<String>,
    error_details: Option<ErrorDetails>,
}

impl ObjectReader for ExperimentResponseReader {
    type Output = ExperimentResponse;

    fn validate_and_build(self, _json: &Json<'_>) -> Result<ExperimentResponse, ParseError> {
        Ok(ExperimentResponse {
            ok: self.ok,
            operation_id: self.operation_id,
            experiment_id: self.experiment_id,
            push_id: self.push_id,
            error: self.error,
            error_details: self.error_details,
        })
    }
}

static EXPERIMENT_RESPONSE_FIELDS: LazyLock<FieldRegistry<ExperimentResponseReader>> =
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
            ("experiment_id", |reader, json| {
                reader.experiment_id = Some(json.string()?);
                Ok(())
            }),
            ("push_id", |reader, json| {
                reader.push_id = Some(json.string()?);
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

/// Deserialize an experiment creation response body.
pub fn decode_experiment_response_json(input: &str) -> Result<ExperimentResponse, ParseError> {
    parse_json(&EXPERIMENT_RESPONSE_FIELDS, input)
}

#[cfg(test)]
mod tests {
    use crate::domain::{DeviceType, DeviceTypeData, Notification, Selector};

    use super::*;

    fn variant(alert: &str, weight: i64) -> Variant {
        Variant::builder()
            .weight(weight)
            .push(
                VariantPushPayload::builder()
                    .notification(Notification::alert_only(alert))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn experiment_body_shape() {
        let experiment = Experiment::builder()
            .name("Alert test")
            .control(0.1)
            .audience(Selector::tag("subscribed"))
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .variant(variant("Short", 2))
            .variant(variant("Long and wordy", 1))
            .build()
            .unwrap();
        assert_eq!(
            encode_experiment_json(&experiment),
            r#"{"name":"Alert test","control":0.1,"audience":{"tag":"subscribed"},"device_types":["ios"],"variants":[{"weight":2,"push":{"notification":{"alert":"Short"}}},{"weight":1,"push":{"notification":{"alert":"Long and wordy"}}}]}"#
        );
    }

    #[test]
    fn experiment_response_is_decoded() {
        let response = decode_experiment_response_json(
            r#"{"ok":true,"operation_id":"op-1","experiment_id":"exp-1","push_id":"push-1"}"#,
        )
        .unwrap();
        assert!(response.ok);
        assert_eq!(response.experiment_id.as_deref(), Some("exp-1"));
    }

    #[test]
    fn experiment_error_response() {
        let response = decode_experiment_response_json(
            r#"{"ok":false,"error":"Audience required","details":{"path":"audience"}}"#,
        )
        .unwrap();
        assert!(!response.ok);
        assert_eq!(
            response.error_details.unwrap().path.as_deref(),
            Some("audience")
        );
    }
}
