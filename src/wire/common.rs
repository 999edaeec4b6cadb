use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};

use crate::codec::{
    DATE_FORMAT, DATE_TIME_FORMAT, FieldRegistry, Json, ObjectReader, ParseError, read_object,
};
use crate::domain::{ErrorDetails, ErrorLocation};

pub(crate) fn timestamp_string(value: NaiveDateTime) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

pub(crate) fn date_string(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub(crate) fn date(json: &Json<'_>) -> Result<NaiveDate, ParseError> {
    let text = json.str_value()?;
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| json.error(format!("expected a date, got '{text}'")))
}

pub(crate) fn unsigned(json: &Json<'_>) -> Result<u64, ParseError> {
    u64::try_from(json.integer()?).map_err(|_| json.error("expected a non-negative integer"))
}

/// At most one of two spellings of the same member.
pub(crate) fn exclusive_member<'a>(
    json: &Json<'a>,
    primary: &str,
    alternate: &str,
) -> Result<Option<Json<'a>>, ParseError> {
    match (json.member(primary), json.member(alternate)) {
        (Some(_), Some(_)) => Err(json.error(format!(
            "only one of {primary} or {alternate} may be present"
        ))),
        (first, second) => Ok(first.or(second)),
    }
}

#[derive(Debug, Default)]
pub(crate) struct ErrorDetailsReader {
    error: Option<String>,
    path: Option<String>,
    location: Option<ErrorLocation>,
}

impl ObjectReader for ErrorDetailsReader {
    type Output = ErrorDetails;

    fn validate_and_build(self, _json: &Json<'_>) -> Result<ErrorDetails, ParseError> {
        Ok(ErrorDetails {
            error: self.error,
            path: self.path,
            location: self.location,
        })
    }
}

static ERROR_DETAILS_FIELDS: LazyLock<FieldRegistry<ErrorDetailsReader>> = LazyLock::new(|| {
    FieldRegistry::new(&[
        ("error", |reader, json| {
            reader.error = Some(json.string()?);
            Ok(())
        }),
        ("path", |reader, json| {
            reader.path = Some(json.string()?);
            Ok(())
        }),
        ("location", |reader, json| {
            reader.location = Some(ErrorLocation {
                line: unsigned(&json.require("line")?)?,
                column: unsigned(&json.require("column")?)?,
            });
            Ok(())
        }),
    ])
});

pub(crate) fn read_error_details(json: &Json<'_>) -> Result<ErrorDetails, ParseError> {
    read_object(&ERROR_DETAILS_FIELDS, json)
}
