//! JSON mapping machinery shared by every wire subdomain: a positioned
//! cursor over parsed documents, per-entity field registries with a generic
//! object-reading driver, and an ordered object writer for the custom
//! serializers.

mod cursor;
mod error;
mod registry;
mod writer;

pub use cursor::Json;
pub use error::ParseError;
pub use registry::{FieldParser, FieldRegistry, ObjectReader, parse_json, read_object};
pub use writer::ObjectWriter;

/// Timestamp format used by the API (`2018-02-17T11:48:00`).
pub(crate) const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Date format used by best-time schedules and opt-in dates (`2018-02-17`).
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
