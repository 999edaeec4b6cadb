use uuid::Uuid;

use crate::domain::validation::ValidationError;

/// Audience selector expression for a push or experiment.
///
/// Value selectors name one addressable thing; compound selectors combine
/// other selectors with boolean logic. The atomic `All` selector addresses
/// every registered device and serializes as the bare string `"all"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    All,
    Tag { tag: String, group: Option<String> },
    Alias(String),
    NamedUser(String),
    Apid(String),
    Channel(String),
    OpenChannel(String),
    And(Vec<Selector>),
    Or(Vec<Selector>),
    Not(Box<Selector>),
    Location(LocationSelector),
}

impl Selector {
    /// Wire field name when embedded in a payload (`audience`).
    pub const FIELD: &'static str = "audience";

    /// Select by device tag.
    pub fn tag(tag: impl Into<String>) -> Self {
        Self::Tag {
            tag: tag.into(),
            group: None,
        }
    }

    /// Select by tag within a tag group.
    pub fn tag_with_group(tag: impl Into<String>, group: impl Into<String>) -> Self {
        Self::Tag {
            tag: tag.into(),
            group: Some(group.into()),
        }
    }

    /// Select by Android push address. The identifier must be a UUID.
    pub fn apid(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::Apid(valid_uuid("apid", value.into())?))
    }

    /// Select by channel id. The identifier must be a UUID.
    pub fn channel(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::Channel(valid_uuid("channel", value.into())?))
    }
}

fn valid_uuid(field: &'static str, input: String) -> Result<String, ValidationError> {
    if Uuid::parse_str(&input).is_err() {
        return Err(ValidationError::InvalidUuid { field, input });
    }
    Ok(input)
}

/// Selector over a location definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationSelector {
    identifier: LocationIdentifier,
}

impl LocationSelector {
    pub fn new(identifier: LocationIdentifier) -> Self {
        Self { identifier }
    }

    pub fn identifier(&self) -> &LocationIdentifier {
        &self.identifier
    }
}

/// Identifier for a location definition: either an opaque id or an alias,
/// never both. Equality is structural over whichever variant is present.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LocationIdentifier {
    Id(String),
    Alias(LocationAlias),
}

impl LocationIdentifier {
    pub fn id(value: impl Into<String>) -> Self {
        Self::Id(value.into())
    }

    pub fn alias(alias_type: impl Into<String>, alias_value: impl Into<String>) -> Self {
        Self::Alias(LocationAlias {
            alias_type: alias_type.into(),
            alias_value: alias_value.into(),
        })
    }
}

/// Named alias for a location (`"us_state": "CA"` on the wire).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationAlias {
    alias_type: String,
    alias_value: String,
}

impl LocationAlias {
    pub fn alias_type(&self) -> &str {
        &self.alias_type
    }

    pub fn alias_value(&self) -> &str {
        &self.alias_value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apid_must_be_a_uuid() {
        assert!(Selector::apid("6de14dab-a4e0-fe5b-06f7-f03b090e4a25").is_ok());
        assert!(matches!(
            Selector::apid("apid1"),
            Err(ValidationError::InvalidUuid { field: "apid", .. })
        ));
    }

    #[test]
    fn channel_must_be_a_uuid() {
        assert!(Selector::channel("0a8bcbbb-a24f-4739-a921-ae9d4433a2b2").is_ok());
        assert!(Selector::channel("nope").is_err());
    }

    #[test]
    fn compound_selectors_nest() {
        let selector = Selector::Or(vec![
            Selector::tag("tag1"),
            Selector::And(vec![
                Selector::tag_with_group("tag2", "group2"),
                Selector::Not(Box::new(Selector::Alias("alias1".to_owned()))),
            ]),
        ]);
        assert_eq!(selector, selector.clone());
    }

    #[test]
    fn location_identifier_equality_is_structural() {
        let id = LocationIdentifier::id("4oFkxX7RcUdirjtQenGOIQ");
        assert_eq!(id, id.clone());
        assert_eq!(id, LocationIdentifier::id("4oFkxX7RcUdirjtQenGOIQ"));
        assert_ne!(id, LocationIdentifier::id("other"));

        let alias = LocationIdentifier::alias("us_state", "CA");
        assert_eq!(alias, LocationIdentifier::alias("us_state", "CA"));
        assert_ne!(alias, id);
    }
}
