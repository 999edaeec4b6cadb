use chrono::NaiveDateTime;

use crate::domain::response::ErrorDetails;

/// Kind of push recorded by the reporting service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PushType {
    UnicastPush,
    BroadcastPush,
    TagPush,
    ScheduledPush,
    ApiPush,
}

impl PushType {
    pub fn identifier(self) -> &'static str {
        match self {
            Self::UnicastPush => "UNICAST_PUSH",
            Self::BroadcastPush => "BROADCAST_PUSH",
            Self::TagPush => "TAG_PUSH",
            Self::ScheduledPush => "SCHEDULED_PUSH",
            Self::ApiPush => "API_PUSH",
        }
    }

    pub fn from_identifier(input: &str) -> Option<Self> {
        match input {
            "UNICAST_PUSH" => Some(Self::UnicastPush),
            "BROADCAST_PUSH" => Some(Self::BroadcastPush),
            "TAG_PUSH" => Some(Self::TagPush),
            "SCHEDULED_PUSH" => Some(Self::ScheduledPush),
            "API_PUSH" => Some(Self::ApiPush),
            _ => None,
        }
    }
}

/// Per-push statistics returned by the individual push response listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PushInfoResponse {
    pub ok: bool,
    pub push_uuid: Option<String>,
    pub push_time: Option<NaiveDateTime>,
    pub push_type: Option<PushType>,
    pub direct_responses: Option<u64>,
    pub sends: Option<u64>,
    pub group_id: Option<String>,
    pub error: Option<String>,
    pub error_details: Option<ErrorDetails>,
}
