use crate::domain::audience::Selector;
use crate::domain::validation::ValidationError;

/// A saved segment: a display name plus the audience criteria it selects.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentView {
    display_name: String,
    criteria: Selector,
}

impl SegmentView {
    pub fn builder() -> SegmentViewBuilder {
        SegmentViewBuilder::default()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn criteria(&self) -> &Selector {
        &self.criteria
    }
}

#[derive(Debug, Clone, Default)]
pub struct SegmentViewBuilder {
    display_name: Option<String>,
    criteria: Option<Selector>,
}

impl SegmentViewBuilder {
    pub fn display_name(mut self, value: impl Into<String>) -> Self {
        self.display_name = Some(value.into());
        self
    }

    pub fn criteria(mut self, value: Selector) -> Self {
        self.criteria = Some(value);
        self
    }

    pub fn build(self) -> Result<SegmentView, ValidationError> {
        Ok(SegmentView {
            display_name: self.display_name.ok_or(ValidationError::Missing {
                field: "display_name",
            })?,
            criteria: self.criteria.ok_or(ValidationError::Missing { field: "criteria" })?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_fields_are_required() {
        assert!(SegmentView::builder().display_name("VIPs").build().is_err());
        assert!(SegmentView::builder().criteria(Selector::All).build().is_err());

        let segment = SegmentView::builder()
            .display_name("VIPs")
            .criteria(Selector::tag("vip"))
            .build()
            .unwrap();
        assert_eq!(segment.display_name(), "VIPs");
        assert_eq!(segment.criteria(), &Selector::tag("vip"));
    }
}
