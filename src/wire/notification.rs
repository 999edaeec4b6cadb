use std::sync::LazyLock;

use serde_json::Value;

use crate::codec::{FieldRegistry, Json, ObjectReader, ObjectWriter, ParseError, read_object};
use crate::domain::{Actions, Notification, PlatformOverride};
use crate::wire::actions::{read_actions, write_actions};

pub(crate) fn write_notification(notification: &Notification) -> Value {
    let mut writer = ObjectWriter::new();
    writer.maybe_string("alert", notification.alert());
    if let Some(actions) = notification.actions() {
        writer.field("actions", write_actions(actions));
    }
    if let Some(over) = notification.ios() {
        writer.field("ios", write_platform_override(over));
    }
    if let Some(over) = notification.android() {
        writer.field("android", write_platform_override(over));
    }
    if let Some(over) = notification.web() {
        writer.field("web", write_platform_override(over));
    }
    writer.finish()
}

fn write_platform_override(over: &PlatformOverride) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .maybe_string("alert", over.alert())
        .maybe_string("title", over.title());
    if !over.extra().is_empty() {
        let mut extra = ObjectWriter::new();
        for (name, value) in over.extra() {
            extra.string(name.clone(), value);
        }
        writer.field("extra", extra.finish());
    }
    writer.finish()
}

#[derive(Debug, Default)]
pub(crate) struct NotificationReader {
    alert: Option<String>,
    actions: Option<Actions>,
    ios: Option<PlatformOverride>,
    android: Option<PlatformOverride>,
    web: Option<PlatformOverride>,
}

impl ObjectReader for NotificationReader {
    type Output = Notification;

    fn validate_and_build(self, json: &Json<'_>) -> Result<Notification, ParseError> {
        let mut builder = Notification::builder();
        if let Some(alert) = self.alert {
            builder = builder.alert(alert);
        }
        if let Some(actions) = self.actions {
            builder = builder.actions(actions);
        }
        if let Some(over) = self.ios {
            builder = builder.ios(over);
        }
        if let Some(over) = self.android {
            builder = builder.android(over);
        }
        if let Some(over) = self.web {
            builder = builder.web(over);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static NOTIFICATION_FIELDS: LazyLock<FieldRegistry<NotificationReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("alert", |reader, json| {
            reader.alert = Some(json.string()?);
            Ok(())
        }),
        ("actions", |reader, json| {
            reader.actions = Some(read_actions(json)?);
            Ok(())
        }),
        ("ios", |reader, json| {
            reader.ios = Some(read_platform_override(json)?);
            Ok(())
        }),
        ("android", |reader, json| {
            reader.android = Some(read_platform_override(json)?);
            Ok(())
        }),
        ("web", |reader, json| {
            reader.web = Some(read_platform_override(json)?);
            Ok(())
        }),
    ])
});

pub(crate) fn read_notification(json: &Json<'_>) -> Result<Notification, ParseError> {
    read_object(&NOTIFICATION_FIELDS, json)
}

fn read_platform_override(json: &Json<'_>) -> Result<PlatformOverride, ParseError> {
    let mut builder = PlatformOverride::builder();
    for (name, member) in json.entries()? {
        match name {
            "alert" => builder = builder.alert(member.string()?),
            "title" => builder = builder.title(member.string()?),
            "extra" => {
                for (key, value) in member.string_map()? {
                    builder = builder.extra(key, value);
                }
            }
            _ => {}
        }
    }
    builder.build().map_err(|err| json.invalid(err))
}
