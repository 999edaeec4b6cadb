use serde_json::Value;

use crate::codec::{Json, ParseError};
use crate::domain::Expiry;
use crate::wire::common::timestamp_string;

pub(crate) fn write_expiry(expiry: &Expiry) -> Value {
    if let Some(seconds) = expiry.seconds() {
        Value::from(seconds)
    } else if let Some(timestamp) = expiry.timestamp() {
        Value::String(timestamp_string(timestamp))
    } else {
        // The builder guarantees one variant is set.
        Value::String(expiry.personalization().unwrap_or_default().to_owned())
    }
}

/// An expiry is either a relative offset (number), an absolute timestamp
/// (string) or a `{{field}}` template string.
pub(crate) fn read_expiry(json: &Json<'_>) -> Result<Expiry, ParseError> {
    let builder = match json.value() {
        Value::Number(_) => Expiry::builder().seconds(json.integer()?),
        Value::String(text) if text.starts_with("{{") => {
            Expiry::builder().personalization(text.clone())
        }
        Value::String(_) => Expiry::builder().timestamp(json.datetime()?),
        _ => return Err(json.error("expected a number or string expiry")),
    };
    builder.build().map_err(|err| json.invalid(err))
}
