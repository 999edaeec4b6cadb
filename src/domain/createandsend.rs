use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::domain::validation::ValidationError;

/// Inline audience for create-and-send: the channels are registered and
/// addressed in the same request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateAndSendAudience {
    email_channels: Vec<EmailChannel>,
    sms_channels: Vec<SmsChannel>,
}

impl CreateAndSendAudience {
    pub fn builder() -> CreateAndSendAudienceBuilder {
        CreateAndSendAudienceBuilder::default()
    }

    pub fn email_channels(&self) -> &[EmailChannel] {
        &self.email_channels
    }

    pub fn sms_channels(&self) -> &[SmsChannel] {
        &self.sms_channels
    }
}

#[derive(Debug, Clone, Default)]
pub struct CreateAndSendAudienceBuilder {
    email_channels: Vec<EmailChannel>,
    sms_channels: Vec<SmsChannel>,
}

impl CreateAndSendAudienceBuilder {
    pub fn email_channel(mut self, value: EmailChannel) -> Self {
        self.email_channels.push(value);
        self
    }

    pub fn sms_channel(mut self, value: SmsChannel) -> Self {
        self.sms_channels.push(value);
        self
    }

    pub fn build(self) -> Result<CreateAndSendAudience, ValidationError> {
        if self.email_channels.is_empty() && self.sms_channels.is_empty() {
            return Err(ValidationError::Empty {
                field: "create_and_send audience",
            });
        }
        Ok(CreateAndSendAudience {
            email_channels: self.email_channels,
            sms_channels: self.sms_channels,
        })
    }
}

/// An inline email recipient.
///
/// Substitution keys share the object with the reserved `ua_`-prefixed
/// address fields, so user keys must not start with `ua_`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailChannel {
    address: String,
    commercial_opted_in: Option<NaiveDateTime>,
    transactional_opted_in: Option<NaiveDateTime>,
    substitutions: BTreeMap<String, String>,
}

impl EmailChannel {
    pub fn builder() -> EmailChannelBuilder {
        EmailChannelBuilder::default()
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

    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }
}

#[derive(Debug, Clone, Default)]
pub struct EmailChannelBuilder {
    address: Option<String>,
    commercial_opted_in: Option<NaiveDateTime>,
    transactional_opted_in: Option<NaiveDateTime>,
    substitutions: BTreeMap<String, String>,
}

impl EmailChannelBuilder {
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

    pub fn substitution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<EmailChannel, ValidationError> {
        let address = self.address.ok_or(ValidationError::Missing {
            field: "ua_address",
        })?;
        if address.trim().is_empty() {
            return Err(ValidationError::Empty { field: "ua_address" });
        }
        for key in self.substitutions.keys() {
            if key.starts_with("ua_") {
                return Err(ValidationError::ReservedSubstitutionKey { key: key.clone() });
            }
        }
        Ok(EmailChannel {
            address,
            commercial_opted_in: self.commercial_opted_in,
            transactional_opted_in: self.transactional_opted_in,
            substitutions: self.substitutions,
        })
    }
}

/// An inline SMS recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsChannel {
    msisdn: String,
    sender: String,
    opted_in: Option<NaiveDateTime>,
    substitutions: BTreeMap<String, String>,
}

impl SmsChannel {
    pub fn builder() -> SmsChannelBuilder {
        SmsChannelBuilder::default()
    }

    /// Subscriber number in international format, digits only.
    pub fn msisdn(&self) -> &str {
        &self.msisdn
    }

    /// Sender identifier the message is delivered from.
    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn opted_in(&self) -> Option<NaiveDateTime> {
        self.opted_in
    }

    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }
}

fn valid_msisdn(input: &str) -> bool {
    (1..=15).contains(&input.len())
        && !input.starts_with('0')
        && input.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, Default)]
pub struct SmsChannelBuilder {
    msisdn: Option<String>,
    sender: Option<String>,
    opted_in: Option<NaiveDateTime>,
    substitutions: BTreeMap<String, String>,
}

impl SmsChannelBuilder {
    pub fn msisdn(mut self, value: impl Into<String>) -> Self {
        self.msisdn = Some(value.into());
        self
    }

    pub fn sender(mut self, value: impl Into<String>) -> Self {
        self.sender = Some(value.into());
        self
    }

    pub fn opted_in(mut self, value: NaiveDateTime) -> Self {
        self.opted_in = Some(value);
        self
    }

    pub fn substitution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<SmsChannel, ValidationError> {
        let msisdn = self.msisdn.ok_or(ValidationError::Missing {
            field: "ua_msisdn",
        })?;
        if !valid_msisdn(&msisdn) {
            return Err(ValidationError::InvalidMsisdn { input: msisdn });
        }
        let sender = self.sender.ok_or(ValidationError::Missing { field: "ua_sender" })?;
        if sender.is_empty() || !sender.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::InvalidSender { input: sender });
        }
        for key in self.substitutions.keys() {
            if key.starts_with("ua_") {
                return Err(ValidationError::ReservedSubstitutionKey { key: key.clone() });
            }
        }
        Ok(SmsChannel {
            msisdn,
            sender,
            opted_in: self.opted_in,
            substitutions: self.substitutions,
        })
    }
}
