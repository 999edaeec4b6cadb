//! Domain layer: strong types with validation and invariants (no I/O).

mod actions;
mod audience;
mod channel;
mod createandsend;
mod device_types;
mod experiment;
mod expiry;
mod message;
mod nameduser;
mod notification;
mod push;
mod reports;
mod response;
mod schedule;
mod segment;
mod template;
mod validation;

pub use actions::{
    Actions, ActionsBuilder, Encoding, LandingPageContent, LandingPageContentBuilder, OpenAction,
    TagActionData,
};
pub use audience::{LocationAlias, LocationIdentifier, LocationSelector, Selector};
pub use channel::{
    ChannelResponse, ChannelView, ChannelViewBuilder, RegisterEmailChannel,
    RegisterEmailChannelBuilder,
};
pub use createandsend::{
    CreateAndSendAudience, CreateAndSendAudienceBuilder, EmailChannel, EmailChannelBuilder,
    SmsChannel, SmsChannelBuilder,
};
pub use device_types::{DeviceType, DeviceTypeData, DeviceTypeDataBuilder};
pub use experiment::{
    Experiment, ExperimentBuilder, ExperimentResponse, Variant, VariantBuilder, VariantPushPayload,
    VariantPushPayloadBuilder,
};
pub use expiry::{Expiry, ExpiryBuilder};
pub use message::{InApp, InAppBuilder, Position, RichPushMessage, RichPushMessageBuilder};
pub use nameduser::{NamedUserListingResponse, NamedUserView, NamedUserViewBuilder};
pub use notification::{
    Notification, NotificationBuilder, PlatformOverride, PlatformOverrideBuilder,
};
pub use push::{
    PushOptions, PushOptionsBuilder, PushPayload, PushPayloadBuilder, PushResponse,
};
pub use reports::{PushInfoResponse, PushType};
pub use response::{ErrorDetails, ErrorLocation};
pub use schedule::{
    Schedule, ScheduleBuilder, SchedulePayload, SchedulePayloadBuilder, ScheduleResponse,
};
pub use segment::{SegmentView, SegmentViewBuilder};
pub use template::{TemplateSelection, TemplateSelectionBuilder};
pub use validation::ValidationError;
