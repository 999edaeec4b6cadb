use std::collections::BTreeMap;

use crate::domain::validation::ValidationError;

/// Rich Application Page (message center) message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RichPushMessage {
    title: String,
    body: String,
    content_type: Option<String>,
    extra: BTreeMap<String, String>,
}

impl RichPushMessage {
    /// Wire field name (`message`).
    pub const FIELD: &'static str = "message";

    pub fn builder() -> RichPushMessageBuilder {
        RichPushMessageBuilder::default()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }
}

#[derive(Debug, Clone, Default)]
pub struct RichPushMessageBuilder {
    title: Option<String>,
    body: Option<String>,
    content_type: Option<String>,
    extra: BTreeMap<String, String>,
}

impl RichPushMessageBuilder {
    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn body(mut self, value: impl Into<String>) -> Self {
        self.body = Some(value.into());
        self
    }

    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    pub fn extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<RichPushMessage, ValidationError> {
        Ok(RichPushMessage {
            title: self.title.ok_or(ValidationError::Missing { field: "title" })?,
            body: self.body.ok_or(ValidationError::Missing { field: "body" })?,
            content_type: self.content_type,
            extra: self.extra,
        })
    }
}

/// In-app message displayed inside the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InApp {
    alert: String,
    display_type: String,
    position: Option<Position>,
}

impl InApp {
    /// Wire field name (`in_app`).
    pub const FIELD: &'static str = "in_app";

    pub fn builder() -> InAppBuilder {
        InAppBuilder::default()
    }

    pub fn alert(&self) -> &str {
        &self.alert
    }

    pub fn display_type(&self) -> &str {
        &self.display_type
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }
}

/// Screen position of a banner in-app message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Position {
    Top,
    Bottom,
}

impl Position {
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    pub fn from_identifier(input: &str) -> Option<Self> {
        match input {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InAppBuilder {
    alert: Option<String>,
    display_type: Option<String>,
    position: Option<Position>,
}

impl InAppBuilder {
    pub fn alert(mut self, value: impl Into<String>) -> Self {
        self.alert = Some(value.into());
        self
    }

    pub fn display_type(mut self, value: impl Into<String>) -> Self {
        self.display_type = Some(value.into());
        self
    }

    pub fn position(mut self, value: Position) -> Self {
        self.position = Some(value);
        self
    }

    pub fn build(self) -> Result<InApp, ValidationError> {
        Ok(InApp {
            alert: self.alert.ok_or(ValidationError::Missing { field: "alert" })?,
            display_type: self.display_type.ok_or(ValidationError::Missing {
                field: "display_type",
            })?,
            position: self.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_push_requires_title_and_body() {
        assert!(matches!(
            RichPushMessage::builder().body("B").build(),
            Err(ValidationError::Missing { field: "title" })
        ));
        assert!(matches!(
            RichPushMessage::builder().title("T").build(),
            Err(ValidationError::Missing { field: "body" })
        ));

        let message = RichPushMessage::builder().title("T").body("B").build().unwrap();
        assert_eq!(message.title(), "T");
        assert_eq!(message.body(), "B");
        assert!(message.extra().is_empty());
    }

    #[test]
    fn in_app_requires_alert_and_display_type() {
        assert!(InApp::builder().alert("hi").build().is_err());
        let in_app = InApp::builder()
            .alert("This part appears in-app!")
            .display_type("banner")
            .position(Position::Top)
            .build()
            .unwrap();
        assert_eq!(in_app.display_type(), "banner");
        assert_eq!(in_app.position(), Some(Position::Top));
    }
}
