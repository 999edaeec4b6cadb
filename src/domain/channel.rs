use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::domain::device_types::DeviceType;
use crate::domain::response::ErrorDetails;
use crate::domain::validation::ValidationError;

/// A registered channel as returned by the channel listing/lookup endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelView {
    channel_id: String,
    device_type: DeviceType,
    installed: bool,
    opt_in: bool,
    background: Option<bool>,
    push_address: Option<String>,
    created: Option<NaiveDateTime>,
    last_registration: Option<NaiveDateTime>,
    alias: Option<String>,
    tags: Option<BTreeSet<String>>,
    named_user: Option<String>,
}

impl ChannelView {
    pub fn builder() -> ChannelViewBuilder {
        ChannelViewBuilder::default()
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn device_type(&self) -> &DeviceType {
        &self.device_type
    }

    pub fn installed(&self) -> bool {
        self.installed
    }

    pub fn opt_in(&self) -> bool {
        self.opt_in
    }

    pub fn background(&self) -> Option<bool> {
        self.background
    }

    pub fn push_address(&self) -> Option<&str> {
        self.push_address.as_deref()
    }

    pub fn created(&self) -> Option<NaiveDateTime> {
        self.created
    }

    pub fn last_registration(&self) -> Option<NaiveDateTime> {
        self.last_registration
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Device tags; absent when the channel carries none.
    pub fn tags(&self) -> Option<&BTreeSet<String>> {
        self.tags.as_ref()
    }

    pub fn named_user(&self) -> Option<&str> {
        self.named_user.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChannelViewBuilder {
    channel_id: Option<String>,
    device_type: Option<DeviceType>,
    installed: Option<bool>,
    opt_in: Option<bool>,
    background: Option<bool>,
    push_address: Option<String>,
    created: Option<NaiveDateTime>,
    last_registration: Option<NaiveDateTime>,
    alias: Option<String>,
    tags: BTreeSet<String>,
    named_user: Option<String>,
}

impl ChannelViewBuilder {
    pub fn channel_id(mut self, value: impl Into<String>) -> Self {
        self.channel_id = Some(value.into());
        self
    }

    pub fn device_type(mut self, value: DeviceType) -> Self {
        self.device_type = Some(value);
        self
    }

    pub fn installed(mut self, value: bool) -> Self {
        self.installed = Some(value);
        self
    }

    pub fn opt_in(mut self, value: bool) -> Self {
        self.opt_in = Some(value);
        self
    }

    pub fn background(mut self, value: bool) -> Self {
        self.background = Some(value);
        self
    }

    pub fn push_address(mut self, value: impl Into<String>) -> Self {
        self.push_address = Some(value.into());
        self
    }

    pub fn created(mut self, value: NaiveDateTime) -> Self {
        self.created = Some(value);
        self
    }

    pub fn last_registration(mut self, value: NaiveDateTime) -> Self {
        self.last_registration = Some(value);
        self
    }

    pub fn alias(mut self, value: impl Into<String>) -> Self {
        self.alias = Some(value.into());
        self
    }

    pub fn tag(mut self, value: impl Into<String>) -> Self {
        self.tags.insert(value.into());
        self
    }

    pub fn named_user(mut self, value: impl Into<String>) -> Self {
        self.named_user = Some(value.into());
        self
    }

    pub fn build(self) -> Result<ChannelView, ValidationError> {
        Ok(ChannelView {
            channel_id: self.channel_id.ok_or(ValidationError::Missing {
                field: "channel_id",
            })?,
            device_type: self.device_type.ok_or(ValidationError::Missing {
                field: "device_type",
            })?,
            installed: self.installed.ok_or(ValidationError::Missing {
                field: "installed",
            })?,
            opt_in: self.opt_in.ok_or(ValidationError::Missing { field: "opt_in" })?,
            background: self.background,
            push_address: self.push_address,
            created: self.created,
            last_registration: self.last_registration,
            alias: self.alias,
            // Absent rather than present-but-empty.
            tags: if self.tags.is_empty() {
                None
            } else {
                Some(self.tags)
            },
            named_user: self.named_user,
        })
    }
}

/// Response shape shared by channel lookup and listing.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChannelResponse {
    pub ok: bool,
    pub next_page: Option<String>,
    pub channel: Option<ChannelView>,
    pub channels: Option<Vec<ChannelView>>,
    pub error: Option<String>,
    pub error_details: Option<ErrorDetails>,
}

/// Registration payload for an email channel.
///
/// The writer wraps this in the `{"channel": {"type": "email", …}}` envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterEmailChannel {
    address: String,
    commercial_opted_in: Option<NaiveDateTime>,
    transactional_opted_in: Option<NaiveDateTime>,
}

impl RegisterEmailChannel {
    pub fn builder() -> RegisterEmailChannelBuilder {
        RegisterEmailChannelBuilder::default()
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn commercial_opted_in(&self) -> Option<NaiveDateTime> {
        self.commercial_opted_in
    }

    pub fn transactional_opted_in(&self) -> Option<NaiveDateTime> {
        self.transactional_opted_in
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterEmailChannelBuilder {
    address: Option<String>,
    commercial_opted_in: Option<NaiveDateTime>,
    transactional_opted_in: Option<NaiveDateTime>,
}

impl RegisterEmailChannelBuilder {
    pub fn address(mut self, value: impl Into<String>) -> Self {
        self.address = Some(value.into());
        self
    }

    pub fn commercial_opted_in(mut self, value: NaiveDateTime) -> Self {
        self.commercial_opted_in = Some(value);
        self
    }

    pub fn transactional_opted_in(mut self, value: NaiveDateTime) -> Self {
        self.transactional_opted_in = Some(value);
        self
    }

    pub fn build(self) -> Result<RegisterEmailChannel, ValidationError> {
        let address = self.address.ok_or(ValidationError::Missing { field: "address" })?;
        if address.trim().is_empty() {
            return Err(ValidationError::Empty { field: "address" });
        }
        Ok(RegisterEmailChannel {
            address,
            commercial_opted_in: self.commercial_opted_in,
            transactional_opted_in: self.transactional_opted_in,
        })
    }
}
