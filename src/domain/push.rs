use crate::domain::audience::Selector;
use crate::domain::device_types::DeviceTypeData;
use crate::domain::expiry::Expiry;
use crate::domain::message::{InApp, RichPushMessage};
use crate::domain::notification::Notification;
use crate::domain::response::ErrorDetails;
use crate::domain::validation::ValidationError;

/// Delivery options attached to a push payload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PushOptions {
    expiry: Option<Expiry>,
    no_throttle: bool,
    personalization: bool,
}

impl PushOptions {
    /// Wire field name (`options`).
    pub const FIELD: &'static str = "options";

    pub fn builder() -> PushOptionsBuilder {
        PushOptionsBuilder::default()
    }

    pub fn expiry(&self) -> Option<&Expiry> {
        self.expiry.as_ref()
    }

    pub fn no_throttle(&self) -> bool {
        self.no_throttle
    }

    pub fn personalization(&self) -> bool {
        self.personalization
    }
}

#[derive(Debug, Clone, Default)]
pub struct PushOptionsBuilder {
    expiry: Option<Expiry>,
    no_throttle: bool,
    personalization: bool,
}

impl PushOptionsBuilder {
    pub fn expiry(mut self, value: Expiry) -> Self {
        self.expiry = Some(value);
        self
    }

    pub fn no_throttle(mut self, value: bool) -> Self {
        self.no_throttle = value;
        self
    }

    pub fn personalization(mut self, value: bool) -> Self {
        self.personalization = value;
        self
    }

    pub fn build(self) -> PushOptions {
        PushOptions {
            expiry: self.expiry,
            no_throttle: self.no_throttle,
            personalization: self.personalization,
        }
    }
}

/// A complete push payload: who (audience), where (device types) and what
/// (notification and/or message center message).
#[derive(Debug, Clone, PartialEq)]
pub struct PushPayload {
    audience: Selector,
    device_types: DeviceTypeData,
    notification: Option<Notification>,
    message: Option<RichPushMessage>,
    options: Option<PushOptions>,
    in_app: Option<InApp>,
}

impl PushPayload {
    pub fn builder() -> PushPayloadBuilder {
        PushPayloadBuilder::default()
    }

    pub fn audience(&self) -> &Selector {
        &self.audience
    }

    pub fn device_types(&self) -> &DeviceTypeData {
        &self.device_types
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn message(&self) -> Option<&RichPushMessage> {
        self.message.as_ref()
    }

    pub fn options(&self) -> Option<&PushOptions> {
        self.options.as_ref()
    }

    pub fn in_app(&self) -> Option<&InApp> {
        self.in_app.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PushPayloadBuilder {
    audience: Option<Selector>,
    device_types: Option<DeviceTypeData>,
    notification: Option<Notification>,
    message: Option<RichPushMessage>,
    options: Option<PushOptions>,
    in_app: Option<InApp>,
}

impl PushPayloadBuilder {
    pub fn audience(mut self, value: Selector) -> Self {
        self.audience = Some(value);
        self
    }

    pub fn device_types(mut self, value: DeviceTypeData) -> Self {
        self.device_types = Some(value);
        self
    }

    pub fn notification(mut self, value: Notification) -> Self {
        self.notification = Some(value);
        self
    }

    pub fn message(mut self, value: RichPushMessage) -> Self {
        self.message = Some(value);
        self
    }

    pub fn options(mut self, value: PushOptions) -> Self {
        self.options = Some(value);
        self
    }

    pub fn in_app(mut self, value: InApp) -> Self {
        self.in_app = Some(value);
        self
    }

    pub fn build(self) -> Result<PushPayload, ValidationError> {
        let audience = self.audience.ok_or(ValidationError::Missing {
            field: Selector::FIELD,
        })?;
        let device_types = self.device_types.ok_or(ValidationError::Missing {
            field: DeviceTypeData::FIELD,
        })?;
        if self.notification.is_none() && self.message.is_none() {
            return Err(ValidationError::Missing {
                field: "notification or message",
            });
        }
        Ok(PushPayload {
            audience,
            device_types,
            notification: self.notification,
            message: self.message,
            options: self.options,
            in_app: self.in_app,
        })
    }
}

/// Response to a push request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PushResponse {
    pub ok: bool,
    pub operation_id: Option<String>,
    pub push_ids: Option<Vec<String>>,
    pub message_ids: Option<Vec<String>>,
    pub content_urls: Option<Vec<String>>,
    pub error: Option<String>,
    pub error_details: Option<ErrorDetails>,
}

#[cfg(test)]
mod tests {
    use crate::domain::device_types::DeviceType;

    use super::*;

    #[test]
    fn audience_is_required() {
        let err = PushPayload::builder()
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .notification(Notification::alert_only("wat"))
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "audience" });
    }

    #[test]
    fn device_types_are_required() {
        let err = PushPayload::builder()
            .audience(Selector::All)
            .notification(Notification::alert_only("wat"))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "device_types"
            }
        );
    }

    #[test]
    fn notification_or_message_is_required() {
        let err = PushPayload::builder()
            .audience(Selector::All)
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "notification or message"
            }
        );
    }

    #[test]
    fn message_only_payload_builds() {
        let payload = PushPayload::builder()
            .audience(Selector::All)
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .message(
                RichPushMessage::builder()
                    .title("T")
                    .body("B")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert!(payload.notification().is_none());
        assert!(payload.message().is_some());
        assert!(payload.options().is_none());
    }
}
