use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Missing { field: &'static str },
    Empty { field: &'static str },
    MutuallyExclusive { first: &'static str, second: &'static str },
    NegativeExpiry { actual: i64 },
    NotATemplateField { input: String },
    InvalidUrl { input: String },
    UnsupportedUrlScheme { scheme: String },
    ContentTypeNotAllowed { content_type: String },
    InvalidBase64Body,
    BodyTooLarge { max: usize, actual: usize },
    InvalidUuid { field: &'static str, input: String },
    UnknownDeviceType { input: String },
    ControlOutOfRange { actual: f64 },
    InvalidMsisdn { input: String },
    InvalidSender { input: String },
    ReservedSubstitutionKey { key: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { field } => write!(f, "{field} must be set"),
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MutuallyExclusive { first, second } => {
                write!(f, "{first} and {second} may not both be set")
            }
            Self::NegativeExpiry { actual } => {
                write!(f, "expiry may not be negative: {actual}")
            }
            Self::NotATemplateField { input } => {
                write!(f, "expiry string must be a personalized field: {input}")
            }
            Self::InvalidUrl { input } => write!(f, "invalid url: {input}"),
            Self::UnsupportedUrlScheme { scheme } => {
                write!(
                    f,
                    "the url for a url action must use 'http' or 'https', got '{scheme}'"
                )
            }
            Self::ContentTypeNotAllowed { content_type } => {
                write!(f, "the content type '{content_type}' is not allowed")
            }
            Self::InvalidBase64Body => {
                write!(f, "content is not valid base64 data")
            }
            Self::BodyTooLarge { max, actual } => {
                write!(f, "maximum body size exceeded: {actual} (max {max})")
            }
            Self::InvalidUuid { field, input } => {
                write!(f, "{field} must be a UUID: {input}")
            }
            Self::UnknownDeviceType { input } => {
                write!(f, "unrecognized device type: {input}")
            }
            Self::ControlOutOfRange { actual } => {
                write!(f, "control must be between 0 and 1: {actual}")
            }
            Self::InvalidMsisdn { input } => {
                write!(
                    f,
                    "msisdn must be 1 to 15 digits with no leading zero: {input}"
                )
            }
            Self::InvalidSender { input } => {
                write!(f, "sender must contain only digits: {input}")
            }
            Self::ReservedSubstitutionKey { key } => {
                write!(f, "substitution keys must not start with 'ua_': {key}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
