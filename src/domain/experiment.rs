use crate::domain::audience::Selector;
use crate::domain::device_types::DeviceTypeData;
use crate::domain::message::InApp;
use crate::domain::notification::Notification;
use crate::domain::push::PushOptions;
use crate::domain::response::ErrorDetails;
use crate::domain::schedule::Schedule;
use crate::domain::validation::ValidationError;

/// An A/B test: an audience split across one or more variants, optionally
/// holding back a control fraction that receives nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    name: Option<String>,
    description: Option<String>,
    control: Option<f64>,
    audience: Selector,
    device_types: DeviceTypeData,
    variants: Vec<Variant>,
}

impl Experiment {
    pub fn builder() -> ExperimentBuilder {
        ExperimentBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Fraction of the audience held back as a control group.
    pub fn control(&self) -> Option<f64> {
        self.control
    }

    pub fn audience(&self) -> &Selector {
        &self.audience
    }

    pub fn device_types(&self) -> &DeviceTypeData {
        &self.device_types
    }

    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExperimentBuilder {
    name: Option<String>,
    description: Option<String>,
    control: Option<f64>,
    audience: Option<Selector>,
    device_types: Option<DeviceTypeData>,
    variants: Vec<Variant>,
}

impl ExperimentBuilder {
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn control(mut self, value: f64) -> Self {
        self.control = Some(value);
        self
    }

    pub fn audience(mut self, value: Selector) -> Self {
        self.audience = Some(value);
        self
    }

    pub fn device_types(mut self, value: DeviceTypeData) -> Self {
        self.device_types = Some(value);
        self
    }

    pub fn variant(mut self, value: Variant) -> Self {
        self.variants.push(value);
        self
    }

    pub fn build(self) -> Result<Experiment, ValidationError> {
        if let Some(control) = self.control
            && !(0.0..=1.0).contains(&control)
        {
            return Err(ValidationError::ControlOutOfRange { actual: control });
        }
        let audience = self.audience.ok_or(ValidationError::Missing {
            field: Selector::FIELD,
        })?;
        let device_types = self.device_types.ok_or(ValidationError::Missing {
            field: DeviceTypeData::FIELD,
        })?;
        if self.variants.is_empty() {
            return Err(ValidationError::Empty { field: "variants" });
        }
        Ok(Experiment {
            name: self.name,
            description: self.description,
            control: self.control,
            audience,
            device_types,
            variants: self.variants,
        })
    }
}

/// One arm of an experiment.
#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    name: Option<String>,
    description: Option<String>,
    schedule: Option<Schedule>,
    weight: Option<i64>,
    push: VariantPushPayload,
}

impl Variant {
    pub fn builder() -> VariantBuilder {
        VariantBuilder::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    pub fn weight(&self) -> Option<i64> {
        self.weight
    }

    pub fn push(&self) -> &VariantPushPayload {
        &self.push
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariantBuilder {
    name: Option<String>,
    description: Option<String>,
    schedule: Option<Schedule>,
    weight: Option<i64>,
    push: Option<VariantPushPayload>,
}

impl VariantBuilder {
    pub fn name(mut self, value: impl Into<String>) -> Self {
        self.name = Some(value.into());
        self
    }

    pub fn description(mut self, value: impl Into<String>) -> Self {
        self.description = Some(value.into());
        self
    }

    pub fn schedule(mut self, value: Schedule) -> Self {
        self.schedule = Some(value);
        self
    }

    pub fn weight(mut self, value: i64) -> Self {
        self.weight = Some(value);
        self
    }

    pub fn push(mut self, value: VariantPushPayload) -> Self {
        self.push = Some(value);
        self
    }

    pub fn build(self) -> Result<Variant, ValidationError> {
        Ok(Variant {
            name: self.name,
            description: self.description,
            schedule: self.schedule,
            weight: self.weight,
            push: self.push.ok_or(ValidationError::Missing { field: "push" })?,
        })
    }
}

/// Reduced push payload allowed inside a variant. Audience and device types
/// live on the experiment, so a variant carries only the content.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantPushPayload {
    notification: Notification,
    options: Option<PushOptions>,
    in_app: Option<InApp>,
}

impl VariantPushPayload {
    pub fn builder() -> VariantPushPayloadBuilder {
        VariantPushPayloadBuilder::default()
    }

    pub fn notification(&self) -> &Notification {
        &self.notification
    }

    pub fn options(&self) -> Option<&PushOptions> {
        self.options.as_ref()
    }

    pub fn in_app(&self) -> Option<&InApp> {
        self.in_app.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct VariantPushPayloadBuilder {
    notification: Option<Notification>,
    options: Option<PushOptions>,
    in_app: Option<InApp>,
}

impl VariantPushPayloadBuilder {
    pub fn notification(mut self, value: Notification) -> Self {
        self.notification = Some(value);
        self
    }

    pub fn options(mut self, value: PushOptions) -> Self {
        self.options = Some(value);
        self
    }

    pub fn in_app(mut self, value: InApp) -> Self {
        self.in_app = Some(value);
        self
    }

    pub fn build(self) -> Result<VariantPushPayload, ValidationError> {
        Ok(VariantPushPayload {
            notification: self.notification.ok_or(ValidationError::Missing {
                field: Notification::FIELD,
            })?,
            options: self.options,
            in_app: self.in_app,
        })
    }
}

/// Response to an experiment creation request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExperimentResponse {
    pub ok: bool,
    pub operation_id: Option<String>,
    pub experiment_id: Option<String>,
    pub push_id: Option<String>,
    pub error: Option<String>,
    pub error_details: Option<ErrorDetails>,
}

#[cfg(test)]
mod tests {
    use crate::domain::device_types::DeviceType;

    use super::*;

    fn variant(alert: &str) -> Variant {
        Variant::builder()
            .push(
                VariantPushPayload::builder()
                    .notification(Notification::alert_only(alert))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn variants_are_required() {
        let err = Experiment::builder()
            .audience(Selector::All)
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "variants" });
    }

    #[test]
    fn control_must_be_a_fraction() {
        let err = Experiment::builder()
            .control(1.5)
            .audience(Selector::All)
            .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
            .variant(variant("A"))
            .build()
            .unwrap_err();
        assert_eq!(err, ValidationError::ControlOutOfRange { actual: 1.5 });

        assert!(
            Experiment::builder()
                .control(0.25)
                .audience(Selector::All)
                .device_types(DeviceTypeData::of([DeviceType::Ios]).unwrap())
                .variant(variant("A"))
                .build()
                .is_ok()
        );
    }

    #[test]
    fn variant_push_requires_a_notification() {
        assert!(matches!(
            VariantPushPayload::builder().build(),
            Err(ValidationError::Missing {
                field: "notification"
            })
        ));
    }

    #[test]
    fn full_experiment_builds() {
        let experiment = Experiment::builder()
            .name("Campaign A/B")
            .description("Testing two alerts")
            .audience(Selector::tag("subscribed"))
            .device_types(DeviceTypeData::of([DeviceType::Ios, DeviceType::Android]).unwrap())
            .variant(variant("Short alert"))
            .variant(variant("A much longer alert with detail"))
            .build()
            .unwrap();
        assert_eq!(experiment.variants().len(), 2);
        assert!(experiment.control().is_none());
    }
}
