//! Wire layer: the custom JSON serializers and deserializers for each API
//! subdomain, built on the shared codec machinery.

mod actions;
mod audience;
mod channel;
mod common;
mod createandsend;
mod device_types;
mod experiment;
mod expiry;
mod message;
mod nameduser;
mod notification;
mod push;
mod reports;
mod schedule;
mod segment;
mod template;

pub use channel::{decode_channel_response_json, encode_email_channel_registration};
pub use createandsend::encode_create_and_send_audience;
pub use experiment::{
    decode_experiment_response_json, encode_experiment, encode_experiment_json,
};
pub use nameduser::decode_named_user_response_json;
pub use push::{
    decode_push_payload_json, decode_push_response_json, encode_push_payload,
    encode_push_payload_json,
};
pub use reports::decode_push_info_response_json;
pub use schedule::{
    decode_schedule_payload_json, decode_schedule_response_json, encode_schedule_payload,
    encode_schedule_payload_json,
};
pub use segment::{decode_segment_json, encode_segment};
pub use template::encode_template_selection;
