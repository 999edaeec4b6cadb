use std::collections::{BTreeMap, BTreeSet};

use crate::domain::channel::ChannelView;
use crate::domain::response::ErrorDetails;
use crate::domain::validation::ValidationError;

/// A named user: an identifier grouping one or more channels, with tags
/// organised by tag group.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedUserView {
    named_user_id: String,
    tags: BTreeMap<String, BTreeSet<String>>,
    channels: Vec<ChannelView>,
}

impl NamedUserView {
    pub fn builder() -> NamedUserViewBuilder {
        NamedUserViewBuilder::default()
    }

    pub fn named_user_id(&self) -> &str {
        &self.named_user_id
    }

    /// Tags keyed by tag group name.
    pub fn tags(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.tags
    }

    pub fn channels(&self) -> &[ChannelView] {
        &self.channels
    }
}

#[derive(Debug, Clone, Default)]
pub struct NamedUserViewBuilder {
    named_user_id: Option<String>,
    tags: BTreeMap<String, BTreeSet<String>>,
    channels: Vec<ChannelView>,
}

impl NamedUserViewBuilder {
    pub fn named_user_id(mut self, value: impl Into<String>) -> Self {
        self.named_user_id = Some(value.into());
        self
    }

    pub fn tag(mut self, group: impl Into<String>, tag: impl Into<String>) -> Self {
        self.tags.entry(group.into()).or_default().insert(tag.into());
        self
    }

    pub fn channel(mut self, value: ChannelView) -> Self {
        self.channels.push(value);
        self
    }

    pub fn build(self) -> Result<NamedUserView, ValidationError> {
        Ok(NamedUserView {
            named_user_id: self.named_user_id.ok_or(ValidationError::Missing {
                field: "named_user_id",
            })?,
            tags: self.tags,
            channels: self.channels,
        })
    }
}

/// Response to named user lookup and listing requests.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedUserListingResponse {
    pub ok: bool,
    pub next_page: Option<String>,
    pub named_user: Option<NamedUserView>,
    pub named_users: Option<Vec<NamedUserView>>,
    pub error: Option<String>,
    pub error_details: Option<ErrorDetails>,
}
