use std::collections::BTreeMap;

use uuid::Uuid;

use crate::domain::validation::ValidationError;

/// Reference to a stored template plus the substitutions to merge into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSelection {
    template_id: String,
    substitutions: BTreeMap<String, String>,
}

impl TemplateSelection {
    /// Wire field name (`template`).
    pub const FIELD: &'static str = "template";

    pub fn builder() -> TemplateSelectionBuilder {
        TemplateSelectionBuilder::default()
    }

    pub fn template_id(&self) -> &str {
        &self.template_id
    }

    /// Substitution values; empty when none were added.
    pub fn substitutions(&self) -> &BTreeMap<String, String> {
        &self.substitutions
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateSelectionBuilder {
    template_id: Option<String>,
    substitutions: BTreeMap<String, String>,
}

impl TemplateSelectionBuilder {
    pub fn template_id(mut self, value: impl Into<String>) -> Self {
        self.template_id = Some(value.into());
        self
    }

    pub fn substitution(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.substitutions.insert(key.into(), value.into());
        self
    }

    pub fn build(self) -> Result<TemplateSelection, ValidationError> {
        let template_id = self.template_id.ok_or(ValidationError::Missing {
            field: "template_id",
        })?;
        if Uuid::parse_str(&template_id).is_err() {
            return Err(ValidationError::InvalidUuid {
                field: "template_id",
                input: template_id,
            });
        }
        Ok(TemplateSelection {
            template_id,
            substitutions: self.substitutions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_id_must_be_a_uuid() {
        assert!(matches!(
            TemplateSelection::builder().build(),
            Err(ValidationError::Missing {
                field: "template_id"
            })
        ));
        assert!(matches!(
            TemplateSelection::builder()
                .template_id("not-a-uuid")
                .build(),
            Err(ValidationError::InvalidUuid { .. })
        ));

        let selection = TemplateSelection::builder()
            .template_id("ef34a8d9-0ad7-491c-86b0-aea74da15161")
            .substitution("FIRST_NAME", "Ada")
            .build()
            .unwrap();
        assert_eq!(selection.substitutions()["FIRST_NAME"], "Ada");
    }
}
