use std::sync::LazyLock;

use serde_json::Value;

use crate::codec::{FieldRegistry, Json, ObjectReader, ObjectWriter, ParseError, parse_json};
use crate::domain::{SegmentView, Selector};
use crate::wire::audience::{read_selector, write_selector};

/// Serialize a segment definition request body.
pub fn encode_segment(segment: &SegmentView) -> Value {
    let mut writer = ObjectWriter::new();
    writer
        .string("display_name", segment.display_name())
        .field("criteria", write_selector(segment.criteria()));
    writer.finish()
}

#[derive(Debug, Default)]
pub(crate) struct SegmentViewReader {
    display_name: Option<String>,
    criteria: Option<Selector>,
}

impl ObjectReader for SegmentViewReader {
    type Output = SegmentView;

    fn validate_and_build(self, json: &Json<'_>) -> Result<SegmentView, ParseError> {
        let mut builder = SegmentView::builder();
        if let Some(display_name) = self.display_name {
            builder = builder.display_name(display_name);
        }
        if let Some(criteria) = self.criteria {
            builder = builder.criteria(criteria);
        }
        builder.build().map_err(|err| json.invalid(err))
    }
}

static SEGMENT_FIELDS: LazyLock<FieldRegistry<SegmentViewReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("display_name", |reader, json| {
            reader.display_name = Some(json.string()?);
            Ok(())
        }),
        ("criteria", |reader, json| {
            reader.criteria = Some(read_selector(json)?);
            Ok(())
        }),
    ])
});

/// Deserialize a segment lookup response body.
pub fn decode_segment_json(input: &str) -> Result<SegmentView, ParseError> {
    parse_json(&SEGMENT_FIELDS, input)
}
