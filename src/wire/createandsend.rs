use serde_json::Value;

use crate::codec::ObjectWriter;
use crate::domain::{CreateAndSendAudience, EmailChannel, SmsChannel};
use crate::wire::common::timestamp_string;

/// Serialize a create-and-send audience: all inline channels merged into one
/// array under `create_and_send`, reserved fields carrying the `ua_` prefix.
pub fn encode_create_and_send_audience(audience: &CreateAndSendAudience) -> Value {
    let mut channels = Vec::with_capacity(
        audience.email_channels().len() + audience.sms_channels().len(),
    );
    channels.extend(audience.email_channels().iter().map(write_email_channel));
    channels.extend(audience.sms_channels().iter().map(write_sms_channel));

    let mut writer = ObjectWriter::new();
    writer.field("create_and_send", Value::Array(channels));
    writer.finish()
}

fn write_email_channel(channel: &EmailChannel) -> Value {
    let mut writer = ObjectWriter::new();
    writer.string("ua_address", channel.address());
    if let Some(opted_in) = channel.commercial_opted_in() {
        writer.string("ua_commercial_opted_in", &timestamp_string(opted_in));
    }
    if let Some(opted_in) = channel.transactional_opted_in() {
        writer.string("ua_transactional_opted_in", &timestamp_string(opted_in));
    }
    for (key, value) in channel.substitutions() {
        writer.string(key.clone(), value);
    }
    writer.finish()
}

fn write_sms_channel(channel: &SmsChannel) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .string("ua_msisdn", channel.msisdn())
        .string("ua_sender", channel.sender());
    if let Some(opted_in) = channel.opted_in() {
        writer.string("ua_opted_in", &timestamp_string(opted_in));
    }
    for (key, value) in channel.substitutions() {
        writer.string(key.clone(), value);
    }
    writer.finish()
}
