use serde_json::{Map, Value};

use crate::codec::{Json, ObjectWriter, ParseError};
use crate::domain::{Actions, Encoding, LandingPageContent, OpenAction, TagActionData};
use crate::wire::common::exclusive_member;

pub(crate) fn write_actions(actions: &Actions) -> Value {
    let mut writer = ObjectWriter::new();
    if let Some(data) = actions.add_tag() {
        writer.field("add_tag", write_tag_data(data));
    }
    if let Some(data) = actions.remove_tag() {
        writer.field("remove_tag", write_tag_data(data));
    }
    if let Some(open) = actions.open() {
        writer.field("open", write_open_action(open));
    }
    if let Some(share) = actions.share() {
        writer.string("share", share);
    }
    // App-defined actions live inline next to the built-in ones.
    if let Some(app_defined) = actions.app_defined() {
        for (name, value) in app_defined {
            writer.field(name.clone(), value.clone());
        }
    }
    writer.finish()
}

fn write_tag_data(data: &TagActionData) -> Value {
    match data {
        TagActionData::Single(tag) => Value::String(tag.clone()),
        TagActionData::List(tags) => Value::Array(
            tags.iter()
                .map(|tag| Value::String(tag.clone()))
                .collect(),
        ),
    }
}

fn write_open_action(open: &OpenAction) -> Value {
    let mut writer = ObjectWriter::new();
    match open {
        OpenAction::Url(url) => {
            writer.string("type", "url").string("content", url.as_str());
        }
        OpenAction::DeepLink(content) => {
            writer.string("type", "deep_link").string("content", content);
        }
        OpenAction::LandingPage(content) => {
            writer
                .string("type", "landing_page")
                .field("content", write_landing_page(content));
        }
    }
    writer.finish()
}

fn write_landing_page(content: &LandingPageContent) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .string("body", content.body())
        .string("content_type", content.content_type());
    if let Some(encoding) = content.encoding() {
        writer.string("content_encoding", encoding.identifier());
    }
    writer.finish()
}

/// Read an `actions` object. Members that are not built-in actions are kept
/// as app-defined actions.
pub(crate) fn read_actions(json: &Json<'_>) -> Result<Actions, ParseError> {
    let mut builder = Actions::builder();
    let mut app_defined = Map::new();
    for (name, member) in json.entries()? {
        match name {
            "add_tag" => builder = builder.add_tag(read_tag_data(&member)?),
            "remove_tag" => builder = builder.remove_tag(read_tag_data(&member)?),
            "open" => builder = builder.open(read_open_action(&member)?),
            "share" => builder = builder.share(member.string()?),
            _ => {
                app_defined.insert(name.to_owned(), member.value().clone());
            }
        }
    }
    if !app_defined.is_empty() {
        builder = builder.app_defined(app_defined);
    }
    builder.build().map_err(|err| json.invalid(err))
}

fn read_tag_data(json: &Json<'_>) -> Result<TagActionData, ParseError> {
    let data = match json.value() {
        Value::String(tag) => TagActionData::single(tag.clone()),
        Value::Array(_) => TagActionData::list(json.string_list()?),
        _ => return Err(json.error("expected a tag or an array of tags")),
    };
    data.map_err(|err| json.invalid(err))
}

fn read_open_action(json: &Json<'_>) -> Result<OpenAction, ParseError> {
    let kind = json.require("type")?;
    let content = json.require("content")?;
    match kind.str_value()? {
        "url" => OpenAction::url(content.str_value()?).map_err(|err| content.invalid(err)),
        "deep_link" => Ok(OpenAction::deep_link(content.string()?)),
        "landing_page" => Ok(OpenAction::LandingPage(read_landing_page(&content)?)),
        other => Err(kind.error(format!("unrecognized open action type '{other}'"))),
    }
}

fn read_landing_page(json: &Json<'_>) -> Result<LandingPageContent, ParseError> {
    let mut builder = LandingPageContent::builder().body(json.require("body")?.string()?);
    // Both spellings are accepted, but not at once.
    if let Some(content_type) = exclusive_member(json, "content_type", "content-type")? {
        builder = builder.content_type(content_type.string()?);
    }
    if let Some(encoding) = exclusive_member(json, "content_encoding", "content-encoding")? {
        builder = builder.encoding(read_encoding(&encoding)?);
    }
    builder.build().map_err(|err| json.invalid(err))
}

fn read_encoding(json: &Json<'_>) -> Result<Encoding, ParseError> {
    match json.str_value()? {
        "utf-8" => Ok(Encoding::Utf8),
        "base64" => Ok(Encoding::Base64),
        other => Err(json.error(format!("unrecognized content encoding '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<Actions, ParseError> {
        let value: Value = serde_json::from_str(input).unwrap();
        read_actions(&Json::root(&value))
    }

    fn written(actions: &Actions) -> String {
        serde_json::to_string(&write_actions(actions)).unwrap()
    }

    #[test]
    fn tag_actions_round_trip() {
        let actions = read(r#"{"add_tag":"tag1","remove_tag":["tag2","tag3"]}"#).unwrap();
        assert_eq!(
            actions.add_tag(),
            Some(&TagActionData::Single("tag1".to_owned()))
        );
        assert_eq!(
            written(&actions),
            r#"{"add_tag":"tag1","remove_tag":["tag2","tag3"]}"#
        );
    }

    #[test]
    fn url_open_action() {
        let actions = read(r#"{"open":{"type":"url","content":"https://example.com/"}}"#).unwrap();
        assert_eq!(
            written(&actions),
            r#"{"open":{"type":"url","content":"https://example.com/"}}"#
        );

        let err = read(r#"{"open":{"type":"url","content":"ftp://example.com/"}}"#).unwrap_err();
        assert_eq!(err.path(), Some("open.content"));
    }

    #[test]
    fn landing_page_open_action() {
        let actions = read(
            r#"{"open":{"type":"landing_page","content":{"body":"<p>hi</p>","content_type":"text/html"}}}"#,
        )
        .unwrap();
        let OpenAction::LandingPage(content) = actions.open().unwrap() else {
            panic!("expected a landing page");
        };
        assert_eq!(content.body(), "<p>hi</p>");
        assert_eq!(content.encoding(), None);
    }

    #[test]
    fn landing_page_accepts_hyphenated_spellings() {
        let actions = read(
            r#"{"open":{"type":"landing_page","content":{"body":"aGVsbG8=","content-type":"text/plain","content-encoding":"base64"}}}"#,
        )
        .unwrap();
        let OpenAction::LandingPage(content) = actions.open().unwrap() else {
            panic!("expected a landing page");
        };
        assert_eq!(content.encoding(), Some(Encoding::Base64));

        let err = read(
            r#"{"open":{"type":"landing_page","content":{"body":"x","content_type":"text/plain","content-type":"text/html"}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("only one of content_type"));
    }

    #[test]
    fn missing_content_type_is_reported_with_the_path() {
        let err =
            read(r#"{"open":{"type":"landing_page","content":{"body":"<p>hi</p>"}}}"#).unwrap_err();
        assert_eq!(err.path(), Some("open.content"));
        assert!(err.message().contains("content_type"));
    }

    #[test]
    fn unrecognized_members_become_app_defined() {
        let actions = read(r#"{"share":"look at this!","battery_status":"show"}"#).unwrap();
        assert_eq!(
            actions.app_defined().unwrap().get("battery_status"),
            Some(&Value::String("show".to_owned()))
        );
        assert_eq!(
            written(&actions),
            r#"{"share":"look at this!","battery_status":"show"}"#
        );
    }

    #[test]
    fn unknown_open_action_types_are_rejected() {
        let err = read(r#"{"open":{"type":"window","content":"x"}}"#).unwrap_err();
        assert_eq!(err.path(), Some("open.type"));
    }
}
