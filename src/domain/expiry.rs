use chrono::NaiveDateTime;

use crate::domain::validation::ValidationError;

/// Optional expiry for a push payload.
///
/// Exactly one representation is populated: a relative offset in seconds, an
/// absolute timestamp, or a `{{field}}` personalization string used with
/// templates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expiry {
    seconds: Option<i64>,
    timestamp: Option<NaiveDateTime>,
    personalization: Option<String>,
}

impl Expiry {
    /// Wire field name (`expiry`).
    pub const FIELD: &'static str = "expiry";

    pub fn builder() -> ExpiryBuilder {
        ExpiryBuilder::default()
    }

    /// Relative expiry offset in seconds, when that variant is set.
    pub fn seconds(&self) -> Option<i64> {
        self.seconds
    }

    /// Absolute expiry timestamp, when that variant is set.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.timestamp
    }

    /// Personalization template string, when that variant is set.
    pub fn personalization(&self) -> Option<&str> {
        self.personalization.as_deref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExpiryBuilder {
    seconds: Option<i64>,
    timestamp: Option<NaiveDateTime>,
    personalization: Option<String>,
}

impl ExpiryBuilder {
    /// Set the expiry as a relative offset in seconds.
    pub fn seconds(mut self, value: i64) -> Self {
        self.seconds = Some(value);
        self
    }

    /// Set the expiry as an absolute timestamp.
    pub fn timestamp(mut self, value: NaiveDateTime) -> Self {
        self.timestamp = Some(value);
        self
    }

    /// Set the expiry as a personalization template string (`{{field}}`).
    pub fn personalization(mut self, value: impl Into<String>) -> Self {
        self.personalization = Some(value.into());
        self
    }

    pub fn build(self) -> Result<Expiry, ValidationError> {
        if self.seconds.is_none() && self.timestamp.is_none() && self.personalization.is_none() {
            return Err(ValidationError::Missing {
                field: Expiry::FIELD,
            });
        }
        if self.seconds.is_some() && self.timestamp.is_some() {
            return Err(ValidationError::MutuallyExclusive {
                first: "expiry_seconds",
                second: "expiry_timestamp",
            });
        }
        if let Some(seconds) = self.seconds
            && seconds < 0
        {
            return Err(ValidationError::NegativeExpiry { actual: seconds });
        }
        if let Some(personalization) = &self.personalization
            && !(personalization.starts_with("{{") && personalization.ends_with("}}"))
        {
            return Err(ValidationError::NotATemplateField {
                input: personalization.clone(),
            });
        }
        Ok(Expiry {
            seconds: self.seconds,
            timestamp: self.timestamp,
            personalization: self.personalization,
        })
    }
}
