use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::domain::push::PushPayload;
use crate::domain::response::ErrorDetails;
use crate::domain::validation::ValidationError;

/// When a scheduled push fires. Exactly one delivery mode must be chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Schedule {
    /// Deliver at an absolute UTC time.
    ScheduledTime(NaiveDateTime),
    /// Deliver at the given wall-clock time in each device's local timezone.
    LocalScheduledTime(NaiveDateTime),
    /// Let the platform pick the optimal hour on the given day.
    BestTime { send_date: NaiveDate },
}

impl Schedule {
    /// Wire field name (`schedule`).
    pub const FIELD: &'static str = "schedule";

    pub fn builder() -> ScheduleBuilder {
        ScheduleBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleBuilder {
    scheduled_time: Option<NaiveDateTime>,
    local_scheduled_time: Option<NaiveDateTime>,
    best_time: Option<NaiveDate>,
}

impl ScheduleBuilder {
    pub fn scheduled_time(mut self, value: NaiveDateTime) -> Self {
        self.scheduled_time = Some(value);
        self
    }

    pub fn local_scheduled_time(mut self, value: NaiveDateTime) -> Self {
        self.local_scheduled_time = Some(value);
        self
    }

    pub fn best_time(mut self, send_date: NaiveDate) -> Self {
        self.best_time = Some(send_date);
        self
    }

    pub fn build(self) -> Result<Schedule, ValidationError> {
        match (self.scheduled_time, self.local_scheduled_time, self.best_time) {
            (Some(time), None, None) => Ok(Schedule::ScheduledTime(time)),
            (None, Some(time), None) => Ok(Schedule::LocalScheduledTime(time)),
            (None, None, Some(send_date)) => Ok(Schedule::BestTime { send_date }),
            (None, None, None) => Err(ValidationError::Missing {
                field: Schedule::FIELD,
            }),
            (Some(_), Some(_), _) => Err(ValidationError::MutuallyExclusive {
                first: "scheduled_time",
                second: "local_scheduled_time",
            }),
            (Some(_), _, Some(_)) => Err(ValidationError::MutuallyExclusive {
                first: "scheduled_time",
                second: "best_time",
            }),
            (_, Some(_), Some(_)) => Err(ValidationError::MutuallyExclusive {
                first: "local_scheduled_time",
                second: "best_time",
            }),
        }
    }
}

/// A schedule plus the push it delivers.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulePayload {
    schedule: Schedule,
    name: Option<String>,
    push: PushPayload,
}

impl SchedulePayload {
    pub fn builder() -> SchedulePayloadBuilder {
        SchedulePayloadBuilder::default()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn push(&self) -> &PushPayload {
        &self.push
    }
}

#[derive(Debug, Clone, Default)]
pub struct SchedulePayloadBuilder {
    schedule: Option<Schedule>,
    name: Option<String>,
    push: Option<PushPayload>,
}

impl SchedulePayloadBuilder {
    pub fn schedule(mut self, value: Schedule) -> Self {
        self.schedule = Some(value);
        self
    }

    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn push(mut self, value: PushPayload) -> Self {
        self.push = Some(value);
        self
    }

    pub fn build(self) -> Result<SchedulePayload, ValidationError> {
        Ok(SchedulePayload {
            schedule: self.schedule.ok_or(ValidationError::Missing {
                field: Schedule::FIELD,
            })?,
            name: self.name,
            push: self.push.ok_or(ValidationError::Missing { field: "push" })?,
        })
    }
}

/// Response to a schedule creation request.
///
/// `schedule_payloads` keeps the echoed payloads as raw JSON; the server may
/// return shapes richer than what this client can model.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScheduleResponse {
    pub ok: bool,
    pub operation_id: Option<String>,
    pub schedule_urls: Option<Vec<String>>,
    pub schedule_ids: Option<Vec<String>>,
    pub schedule_payloads: Option<Vec<Value>>,
    pub error: Option<String>,
    pub error_details: Option<ErrorDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn exactly_one_delivery_mode() {
        assert!(matches!(
            Schedule::builder().build(),
            Err(ValidationError::Missing { field: "schedule" })
        ));
        let err = Schedule::builder()
            .scheduled_time(dt("2026-01-01T12:00:00"))
            .local_scheduled_time(dt("2026-01-01T12:00:00"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MutuallyExclusive {
                first: "scheduled_time",
                second: "local_scheduled_time",
            }
        );
        let err = Schedule::builder()
            .scheduled_time(dt("2026-01-01T12:00:00"))
            .best_time(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MutuallyExclusive {
                first: "scheduled_time",
                second: "best_time",
            }
        );
    }

    #[test]
    fn each_mode_builds() {
        assert_eq!(
            Schedule::builder()
                .scheduled_time(dt("2026-02-03T04:05:06"))
                .build()
                .unwrap(),
            Schedule::ScheduledTime(dt("2026-02-03T04:05:06"))
        );
        assert_eq!(
            Schedule::builder()
                .local_scheduled_time(dt("2026-02-03T04:05:06"))
                .build()
                .unwrap(),
            Schedule::LocalScheduledTime(dt("2026-02-03T04:05:06"))
        );
        assert_eq!(
            Schedule::builder()
                .best_time(NaiveDate::from_ymd_opt(2026, 2, 3).unwrap())
                .build()
                .unwrap(),
            Schedule::BestTime {
                send_date: NaiveDate::from_ymd_opt(2026, 2, 3).unwrap()
            }
        );
    }

    #[test]
    fn payload_requires_schedule_and_push() {
        use crate::domain::audience::Selector;
        use crate::domain::device_types::{DeviceType, DeviceTypeData};
        use crate::domain::notification::Notification;

        let push = PushPayload::builder()
            .audience(Selector::All)
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .notification(Notification::alert_only("Scheduled"))
            .build()
            .unwrap();

        assert!(SchedulePayload::builder().push(push.clone()).build().is_err());

        let schedule = Schedule::builder()
            .scheduled_time(dt("2026-05-05T12:00:00"))
            .build()
            .unwrap();
        assert!(SchedulePayload::builder().schedule(schedule.clone()).build().is_err());

        let payload = SchedulePayload::builder()
            .schedule(schedule)
            .name("morning batch")
            .push(push)
            .build()
            .unwrap();
        assert_eq!(payload.name(), Some("morning batch"));
    }
}
