use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::Map;
use url::Url;

use crate::domain::validation::ValidationError;

/// Notification actions: tag mutations, a share, app-defined actions and at
/// most one open action.
#[derive(Debug, Clone, PartialEq)]
pub struct Actions {
    add_tag: Option<TagActionData>,
    remove_tag: Option<TagActionData>,
    open: Option<OpenAction>,
    share: Option<String>,
    app_defined: Option<Map<String, serde_json::Value>>,
}

impl Actions {
    /// Wire field name (`actions`).
    pub const FIELD: &'static str = "actions";

    pub fn builder() -> ActionsBuilder {
        ActionsBuilder::default()
    }

    pub fn add_tag(&self) -> Option<&TagActionData> {
        self.add_tag.as_ref()
    }

    pub fn remove_tag(&self) -> Option<&TagActionData> {
        self.remove_tag.as_ref()
    }

    pub fn open(&self) -> Option<&OpenAction> {
        self.open.as_ref()
    }

    pub fn share(&self) -> Option<&str> {
        self.share.as_deref()
    }

    pub fn app_defined(&self) -> Option<&Map<String, serde_json::Value>> {
        self.app_defined.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionsBuilder {
    add_tag: Option<TagActionData>,
    remove_tag: Option<TagActionData>,
    open: Option<OpenAction>,
    share: Option<String>,
    app_defined: Option<Map<String, serde_json::Value>>,
}

impl ActionsBuilder {
    pub fn add_tag(mut self, value: TagActionData) -> Self {
        self.add_tag = Some(value);
        self
    }

    pub fn remove_tag(mut self, value: TagActionData) -> Self {
        self.remove_tag = Some(value);
        self
    }

    pub fn open(mut self, value: OpenAction) -> Self {
        self.open = Some(value);
        self
    }

    pub fn share(mut self, value: impl Into<String>) -> Self {
        self.share = Some(value.into());
        self
    }

    pub fn app_defined(mut self, value: Map<String, serde_json::Value>) -> Self {
        self.app_defined = Some(value);
        self
    }

    pub fn build(self) -> Result<Actions, ValidationError> {
        if self.add_tag.is_none()
            && self.remove_tag.is_none()
            && self.open.is_none()
            && self.share.is_none()
            && self.app_defined.is_none()
        {
            return Err(ValidationError::Empty {
                field: Actions::FIELD,
            });
        }
        if let Some(share) = &self.share
            && share.is_empty()
        {
            return Err(ValidationError::Empty { field: "share" });
        }
        if let Some(app_defined) = &self.app_defined
            && app_defined.is_empty()
        {
            return Err(ValidationError::Empty {
                field: "app_defined",
            });
        }
        Ok(Actions {
            add_tag: self.add_tag,
            remove_tag: self.remove_tag,
            open: self.open,
            share: self.share,
            app_defined: self.app_defined,
        })
    }
}

/// Argument of a tag action: one tag or a list of tags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagActionData {
    Single(String),
    List(Vec<String>),
}

impl TagActionData {
    pub fn single(tag: impl Into<String>) -> Result<Self, ValidationError> {
        let tag = tag.into();
        if tag.is_empty() {
            return Err(ValidationError::Empty { field: "tag" });
        }
        Ok(Self::Single(tag))
    }

    pub fn list(tags: Vec<String>) -> Result<Self, ValidationError> {
        if tags.is_empty() {
            return Err(ValidationError::Empty { field: "tags" });
        }
        Ok(Self::List(tags))
    }
}

/// The at-most-one open action, discriminated by `type` on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum OpenAction {
    Url(Url),
    LandingPage(LandingPageContent),
    DeepLink(String),
}

impl OpenAction {
    /// Open an external URL. The URL must be absolute http or https.
    pub fn url(input: &str) -> Result<Self, ValidationError> {
        let url = Url::parse(input).map_err(|_| ValidationError::InvalidUrl {
            input: input.to_owned(),
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ValidationError::UnsupportedUrlScheme {
                scheme: url.scheme().to_owned(),
            });
        }
        Ok(Self::Url(url))
    }

    pub fn deep_link(content: impl Into<String>) -> Self {
        Self::DeepLink(content.into())
    }
}

/// Body encoding declared for landing page content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    Base64,
}

impl Encoding {
    /// The wire identifier (`utf-8` or `base64`).
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Base64 => "base64",
        }
    }
}

/// Inline content of an open-landing-page action.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LandingPageContent {
    body: String,
    content_type: String,
    encoding: Option<Encoding>,
}

impl LandingPageContent {
    /// Content types the API accepts for landing page bodies.
    pub const ALLOWED_CONTENT_TYPES: [&'static str; 5] = [
        "text/html",
        "text/plain",
        "image/jpeg",
        "image/png",
        "image/gif",
    ];

    /// Maximum body size for utf-8 (or undeclared) bodies, in bytes.
    pub const MAX_BODY_SIZE_BYTES: usize = 512 * 1024;

    /// Maximum body size for declared-base64 bodies, accounting for the 4/3
    /// expansion of the encoding.
    pub const MAX_BODY_SIZE_BASE64: usize = (Self::MAX_BODY_SIZE_BYTES / 3) * 4;

    pub fn builder() -> LandingPageContentBuilder {
        LandingPageContentBuilder::default()
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn encoding(&self) -> Option<Encoding> {
        self.encoding
    }
}

#[derive(Debug, Clone, Default)]
pub struct LandingPageContentBuilder {
    body: Option<String>,
    content_type: Option<String>,
    encoding: Option<Encoding>,
}

impl LandingPageContentBuilder {
    pub fn body(mut self, value: impl Into<String>) -> Self {
        self.body = Some(value.into());
        self
    }

    pub fn content_type(mut self, value: impl Into<String>) -> Self {
        self.content_type = Some(value.into());
        self
    }

    pub fn encoding(mut self, value: Encoding) -> Self {
        self.encoding = Some(value);
        self
    }

    pub fn build(self) -> Result<LandingPageContent, ValidationError> {
        let body = self.body.ok_or(ValidationError::Missing { field: "body" })?;
        let content_type = self.content_type.ok_or(ValidationError::Missing {
            field: "content_type",
        })?;

        // The allow-list matches on type/subtype only; parameters such as
        // charset are ignored.
        let type_subtype = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !LandingPageContent::ALLOWED_CONTENT_TYPES.contains(&type_subtype.as_str()) {
            return Err(ValidationError::ContentTypeNotAllowed {
                content_type: type_subtype,
            });
        }

        if self.encoding == Some(Encoding::Base64) && BASE64.decode(&body).is_err() {
            return Err(ValidationError::InvalidBase64Body);
        }

        let max = if self.encoding == Some(Encoding::Base64) {
            LandingPageContent::MAX_BODY_SIZE_BASE64
        } else {
            LandingPageContent::MAX_BODY_SIZE_BYTES
        };
        if body.len() > max {
            return Err(ValidationError::BodyTooLarge {
                max,
                actual: body.len(),
            });
        }

        Ok(LandingPageContent {
            body,
            content_type,
            encoding: self.encoding,
        })
    }
}
