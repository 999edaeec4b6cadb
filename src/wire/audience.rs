use serde_json::Value;

use crate::codec::{Json, ObjectWriter, ParseError};
use crate::domain::{LocationIdentifier, LocationSelector, Selector};

pub(crate) fn write_selector(selector: &Selector) -> Value {
    match selector {
        Selector::All => Value::String("all".to_owned()),
        Selector::Tag { tag, group } => {
            let mut writer = ObjectWriter::new();
            writer.string("tag", tag).maybe_string("group", group.as_deref());
            writer.finish()
        }
        Selector::Alias(value) => single("alias", value),
        Selector::NamedUser(value) => single("named_user", value),
        Selector::Apid(value) => single("apid", value),
        Selector::Channel(value) => single("channel", value),
        Selector::OpenChannel(value) => single("open_channel", value),
        Selector::And(children) => compound("and", children),
        Selector::Or(children) => compound("or", children),
        Selector::Not(child) => {
            let mut writer = ObjectWriter::new();
            writer.field("not", write_selector(child));
            writer.finish()
        }
        Selector::Location(location) => {
            let mut writer = ObjectWriter::new();
            writer.field("location", write_location(location));
            writer.finish()
        }
    }
}

fn single(name: &str, value: &str) -> Value {
    let mut writer = ObjectWriter::new();
    writer.string(name, value);
    writer.finish()
}

fn compound(name: &str, children: &[Selector]) -> Value {
    let mut writer = ObjectWriter::new();
    writer.field(
        name,
        Value::Array(children.iter().map(write_selector).collect()),
    );
    writer.finish()
}

fn write_location(location: &LocationSelector) -> Value {
    let mut writer = ObjectWriter::new();
    match location.identifier() {
        LocationIdentifier::Id(id) => {
            writer.string("id", id);
        }
        LocationIdentifier::Alias(alias) => {
            writer.string(alias.alias_type(), alias.alias_value());
        }
    }
    writer.finish()
}

/// Read any audience selector: the bare string `"all"`, a value selector
/// object, or a compound selector object.
pub(crate) fn read_selector(json: &Json<'_>) -> Result<Selector, ParseError> {
    if let Some(text) = json.value().as_str() {
        if text.eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        return Err(json.error(format!("unrecognized audience selector '{text}'")));
    }

    let mut selector: Option<Selector> = None;
    let mut tag: Option<String> = None;
    let mut group: Option<String> = None;

    for (name, member) in json.entries()? {
        let found = match name {
            "tag" => {
                tag = Some(member.string()?);
                continue;
            }
            "group" => {
                group = Some(member.string()?);
                continue;
            }
            "alias" => Selector::Alias(member.string()?),
            "named_user" => Selector::NamedUser(member.string()?),
            "apid" => Selector::apid(member.string()?).map_err(|err| member.invalid(err))?,
            "channel" => Selector::channel(member.string()?).map_err(|err| member.invalid(err))?,
            "open_channel" => Selector::OpenChannel(member.string()?),
            "and" => Selector::And(read_children(&member)?),
            "or" => Selector::Or(read_children(&member)?),
            "not" => Selector::Not(Box::new(read_selector(&member)?)),
            "location" => Selector::Location(read_location(&member)?),
            _ => {
                return Err(member.error(format!("unrecognized audience selector '{name}'")));
            }
        };
        if selector.is_some() {
            return Err(json.error("audience selector must contain exactly one selector"));
        }
        selector = Some(found);
    }

    match (selector, tag, group) {
        (Some(selector), None, None) => Ok(selector),
        (None, Some(tag), group) => Ok(Selector::Tag { tag, group }),
        (None, None, Some(_)) => Err(json.error("the group attribute must accompany a tag")),
        (None, None, None) => Err(json.error("audience selector must contain exactly one selector")),
        (Some(_), _, _) => Err(json.error("audience selector must contain exactly one selector")),
    }
}

fn read_children(json: &Json<'_>) -> Result<Vec<Selector>, ParseError> {
    json.elements()?.iter().map(read_selector).collect()
}

fn read_location(json: &Json<'_>) -> Result<LocationSelector, ParseError> {
    if let Some(id) = json.member("id") {
        return Ok(LocationSelector::new(LocationIdentifier::id(id.string()?)));
    }
    let entries = json.entries()?;
    match entries.as_slice() {
        [(alias_type, member)] => Ok(LocationSelector::new(LocationIdentifier::alias(
            *alias_type,
            member.string()?,
        ))),
        _ => Err(json.error("location selector must contain an id or exactly one alias")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<Selector, ParseError> {
        let value: Value = serde_json::from_str(input).unwrap();
        read_selector(&Json::root(&value))
    }

    fn written(selector: &Selector) -> String {
        serde_json::to_string(&write_selector(selector)).unwrap()
    }

    #[test]
    fn all_is_a_bare_string() {
        assert_eq!(written(&Selector::All), r#""all""#);
        assert_eq!(read(r#""all""#).unwrap(), Selector::All);
        assert_eq!(read(r#""ALL""#).unwrap(), Selector::All);
        assert!(read(r#""everyone""#).is_err());
    }

    #[test]
    fn tag_with_optional_group() {
        assert_eq!(written(&Selector::tag("tag1")), r#"{"tag":"tag1"}"#);
        assert_eq!(
            written(&Selector::tag_with_group("tag1", "group1")),
            r#"{"tag":"tag1","group":"group1"}"#
        );
        assert_eq!(
            read(r#"{"tag":"tag1","group":"group1"}"#).unwrap(),
            Selector::tag_with_group("tag1", "group1")
        );
    }

    #[test]
    fn group_without_tag_is_rejected() {
        assert!(read(r#"{"group":"group1"}"#).is_err());
    }

    #[test]
    fn compound_selectors_nest() {
        let selector = Selector::Or(vec![
            Selector::tag("tag1"),
            Selector::And(vec![
                Selector::tag("tag2"),
                Selector::Not(Box::new(Selector::Alias("alias1".to_owned()))),
            ]),
        ]);
        let text = written(&selector);
        assert_eq!(
            text,
            r#"{"or":[{"tag":"tag1"},{"and":[{"tag":"tag2"},{"not":{"alias":"alias1"}}]}]}"#
        );
        assert_eq!(read(&text).unwrap(), selector);
    }

    #[test]
    fn channel_selectors_validate_the_uuid() {
        let err = read(r#"{"channel":"nope"}"#).unwrap_err();
        assert_eq!(err.path(), Some("channel"));

        assert_eq!(
            read(r#"{"channel":"0a8bcbbb-a24f-4739-a921-ae9d4433a2b2"}"#).unwrap(),
            Selector::channel("0a8bcbbb-a24f-4739-a921-ae9d4433a2b2").unwrap()
        );
    }

    #[test]
    fn location_by_id_and_by_alias() {
        let by_id = Selector::Location(LocationSelector::new(LocationIdentifier::id(
            "4oFkxX7RcUdirjtQenGOIQ",
        )));
        assert_eq!(
            written(&by_id),
            r#"{"location":{"id":"4oFkxX7RcUdirjtQenGOIQ"}}"#
        );
        assert_eq!(read(r#"{"location":{"id":"4oFkxX7RcUdirjtQenGOIQ"}}"#).unwrap(), by_id);

        let by_alias = Selector::Location(LocationSelector::new(LocationIdentifier::alias(
            "us_state", "CA",
        )));
        assert_eq!(written(&by_alias), r#"{"location":{"us_state":"CA"}}"#);
        assert_eq!(read(r#"{"location":{"us_state":"CA"}}"#).unwrap(), by_alias);
    }

    #[test]
    fn multiple_selectors_in_one_object_are_rejected() {
        let err = read(r#"{"alias":"a","named_user":"b"}"#).unwrap_err();
        assert!(err.to_string().contains("exactly one selector"));
    }
}
