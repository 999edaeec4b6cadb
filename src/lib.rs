//! Typed Rust client for the Urban Airship push API.
//!
//! The design follows three layers: a domain layer of immutable, validated
//! models built through fluent builders; a wire layer of custom JSON
//! serializers and deserializers driven by per-entity field registries; and a
//! small client layer orchestrating authenticated HTTP requests.
//!
//! ```rust,no_run
//! use airship::{
//!     AirshipClient, Auth, DeviceType, DeviceTypeData, Notification, PushPayload, Selector,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AirshipClient::new(Auth::basic("app key", "app secret")?);
//!     let payload = PushPayload::builder()
//!         .audience(Selector::tag("subscribed"))
//!         .device_types(DeviceTypeData::of([DeviceType::Ios, DeviceType::Android])?)
//!         .notification(Notification::alert_only("Hello from the API"))
//!         .build()?;
//!     let response = client.send_push(&payload).await?;
//!     println!("operation id: {:?}", response.operation_id);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod codec;
pub mod domain;
pub mod wire;

pub use client::{AirshipClient, AirshipClientBuilder, AirshipError, Auth};
pub use codec::ParseError;
pub use domain::{
    Actions, ChannelResponse, ChannelView, DeviceType, DeviceTypeData, EmailChannel, Experiment,
    ExperimentResponse, Expiry, InApp, NamedUserListingResponse, NamedUserView, Notification,
    PushOptions, PushPayload, PushResponse, RichPushMessage, Schedule, SchedulePayload,
    ScheduleResponse, Selector, SmsChannel, ValidationError,
};
