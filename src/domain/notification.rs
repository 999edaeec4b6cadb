use std::collections::BTreeMap;

use crate::domain::actions::Actions;
use crate::domain::validation::ValidationError;

/// Push notification: a default alert plus optional actions and per-platform
/// overrides. At least one field must be set.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    alert: Option<String>,
    actions: Option<Actions>,
    ios: Option<PlatformOverride>,
    android: Option<PlatformOverride>,
    web: Option<PlatformOverride>,
}

impl Notification {
    /// Wire field name (`notification`).
    pub const FIELD: &'static str = "notification";

    pub fn builder() -> NotificationBuilder {
        NotificationBuilder::default()
    }

    /// Convenience constructor for an alert-only notification.
    pub fn alert_only(alert: impl Into<String>) -> Self {
        Notification {
            alert: Some(alert.into()),
            actions: None,
            ios: None,
            android: None,
            web: None,
        }
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn actions(&self) -> Option<&Actions> {
        self.actions.as_ref()
    }

    pub fn ios(&self) -> Option<&PlatformOverride> {
        self.ios.as_ref()
    }

    pub fn android(&self) -> Option<&PlatformOverride> {
        self.android.as_ref()
    }

    pub fn web(&self) -> Option<&PlatformOverride> {
        self.web.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationBuilder {
    alert: Option<String>,
    actions: Option<Actions>,
    ios: Option<PlatformOverride>,
    android: Option<PlatformOverride>,
    web: Option<PlatformOverride>,
}

impl NotificationBuilder {
    pub fn alert(mut self, value: impl Into<String>) -> Self {
        self.alert = Some(value.into());
        self
    }

    pub fn actions(mut self, value: Actions) -> Self {
        self.actions = Some(value);
        self
    }

    pub fn ios(mut self, value: PlatformOverride) -> Self {
        self.ios = Some(value);
        self
    }

    pub fn android(mut self, value: PlatformOverride) -> Self {
        self.android = Some(value);
        self
    }

    pub fn web(mut self, value: PlatformOverride) -> Self {
        self.web = Some(value);
        self
    }

    pub fn build(self) -> Result<Notification, ValidationError> {
        if self.alert.is_none()
            && self.actions.is_none()
            && self.ios.is_none()
            && self.android.is_none()
            && self.web.is_none()
        {
            return Err(ValidationError::Empty {
                field: Notification::FIELD,
            });
        }
        Ok(Notification {
            alert: self.alert,
            actions: self.actions,
            ios: self.ios,
            android: self.android,
            web: self.web,
        })
    }
}

/// Platform-specific notification override (`ios`, `android`, `web`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformOverride {
    alert: Option<String>,
    title: Option<String>,
    extra: BTreeMap<String, String>,
}

impl PlatformOverride {
    pub fn builder() -> PlatformOverrideBuilder {
        PlatformOverrideBuilder::default()
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Extra key-value payload; empty when none were added.
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

#[derive(Debug, Clone, Default)]
pub struct PlatformOverrideBuilder {
    alert: Option<String>,
    title: Option<String>,
    extra: BTreeMap<String, String>,
}

impl PlatformOverrideBuilder {
    pub fn alert(mut self, value: impl Into<String>) -> Self {
        self.alert = Some(value.into());
        self
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<PlatformOverride, ValidationError> {
        if self.alert.is_none() && self.title.is_none() && self.extra.is_empty() {
            return Err(ValidationError::Empty {
                field: "platform override",
            });
        }
        Ok(PlatformOverride {
            alert: self.alert,
            title: self.title,
            extra: self.extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_notification_is_rejected() {
        assert!(matches!(
            Notification::builder().build(),
            Err(ValidationError::Empty {
                field: "notification"
            })
        ));
    }

    #[test]
    fn alert_only_builds() {
        let notification = Notification::alert_only("wat");
        assert_eq!(notification.alert(), Some("wat"));
        assert!(notification.actions().is_none());
    }

    #[test]
    fn overrides_are_kept_per_platform() {
        let notification = Notification::builder()
            .alert("wat")
            .ios(PlatformOverride::builder().alert("ios alert").build().unwrap())
            .android(
                PlatformOverride::builder()
                    .alert("droid")
                    .extra("sound", "default")
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        assert_eq!(notification.ios().unwrap().alert(), Some("ios alert"));
        assert_eq!(
            notification.android().unwrap().extra().get("sound"),
            Some(&"default".to_owned())
        );
        assert!(notification.web().is_none());
    }

    #[test]
    fn empty_override_is_rejected() {
        assert!(PlatformOverride::builder().build().is_err());
    }
}
