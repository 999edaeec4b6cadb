use std::collections::BTreeSet;

use crate::domain::validation::ValidationError;

/// Platform a push payload can be delivered to.
///
/// Open platforms use the `open::<platform>` wire identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceType {
    Ios,
    Android,
    Amazon,
    Wns,
    Web,
    Sms,
    Email,
    Open(String),
}

impl DeviceType {
    /// Open-platform device type (`open::<platform>` on the wire).
    pub fn open(platform: impl Into<String>) -> Self {
        Self::Open(platform.into())
    }

    /// The wire identifier for this device type.
    pub fn identifier(&self) -> String {
        match self {
            Self::Ios => "ios".to_owned(),
            Self::Android => "android".to_owned(),
            Self::Amazon => "amazon".to_owned(),
            Self::Wns => "wns".to_owned(),
            Self::Web => "web".to_owned(),
            Self::Sms => "sms".to_owned(),
            Self::Email => "email".to_owned(),
            Self::Open(platform) => format!("open::{platform}"),
        }
    }

    /// Parse a wire identifier. Unknown identifiers are rejected, `all` is
    /// not a device type.
    pub fn from_identifier(input: &str) -> Result<Self, ValidationError> {
        if let Some(platform) = input.strip_prefix("open::") {
            return Ok(Self::Open(platform.to_owned()));
        }
        Ok(match input {
            "ios" => Self::Ios,
            "android" => Self::Android,
            "amazon" => Self::Amazon,
            "wns" => Self::Wns,
            "web" => Self::Web,
            "sms" => Self::Sms,
            "email" => Self::Email,
            _ => {
                return Err(ValidationError::UnknownDeviceType {
                    input: input.to_owned(),
                });
            }
        })
    }
}

/// The `device_types` selection of a push payload: a non-empty set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceTypeData {
    device_types: BTreeSet<DeviceType>,
}

impl DeviceTypeData {
    /// Wire field name (`device_types`).
    pub const FIELD: &'static str = "device_types";

    pub fn builder() -> DeviceTypeDataBuilder {
        DeviceTypeDataBuilder::default()
    }

    /// Convenience constructor from a fixed selection.
    pub fn of(device_types: impl IntoIterator<Item = DeviceType>) -> Result<Self, ValidationError> {
        let mut builder = Self::builder();
        for device_type in device_types {
            builder = builder.device_type(device_type);
        }
        builder.build()
    }

    pub fn device_types(&self) -> &BTreeSet<DeviceType> {
        &self.device_types
    }

    pub fn contains(&self, device_type: &DeviceType) -> bool {
        self.device_types.contains(device_type)
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceTypeDataBuilder {
    device_types: BTreeSet<DeviceType>,
}

impl DeviceTypeDataBuilder {
    pub fn device_type(mut self, value: DeviceType) -> Self {
        self.device_types.insert(value);
        self
    }

    pub fn build(self) -> Result<DeviceTypeData, ValidationError> {
        if self.device_types.is_empty() {
            return Err(ValidationError::Empty {
                field: DeviceTypeData::FIELD,
            });
        }
        Ok(DeviceTypeData {
            device_types: self.device_types,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_round_trip() {
        for input in ["ios", "android", "amazon", "wns", "web", "sms", "email"] {
            let device_type = DeviceType::from_identifier(input).unwrap();
            assert_eq!(device_type.identifier(), input);
        }

        let open = DeviceType::from_identifier("open::sms").unwrap();
        assert_eq!(open, DeviceType::open("sms"));
        assert_eq!(open.identifier(), "open::sms");
    }

    #[test]
    fn unknown_identifiers_are_rejected() {
        assert!(matches!(
            DeviceType::from_identifier("all"),
            Err(ValidationError::UnknownDeviceType { .. })
        ));
        assert!(DeviceType::from_identifier("blackberry").is_err());
    }

    #[test]
    fn empty_selection_is_rejected() {
        assert!(matches!(
            DeviceTypeData::builder().build(),
            Err(ValidationError::Empty {
                field: "device_types"
            })
        ));
    }

    #[test]
    fn selection_deduplicates() {
        let data = DeviceTypeData::of([DeviceType::Ios, DeviceType::Ios, DeviceType::Web]).unwrap();
        assert_eq!(data.device_types().len(), 2);
        assert!(data.contains(&DeviceType::Web));
    }
}
