use serde_json::Value;

use crate::codec::{Json, ParseError};
use crate::domain::{DeviceType, DeviceTypeData};

pub(crate) fn write_device_types(data: &DeviceTypeData) -> Value {
    Value::Array(
        data.device_types()
            .iter()
            .map(|device_type| Value::String(device_type.identifier()))
            .collect(),
    )
}

pub(crate) fn read_device_types(json: &Json<'_>) -> Result<DeviceTypeData, ParseError> {
    let mut builder = DeviceTypeData::builder();
    for element in json.elements()? {
        let device_type = DeviceType::from_identifier(element.str_value()?)
            .map_err(|err| element.invalid(err))?;
        builder = builder.device_type(device_type);
    }
    builder.build().map_err(|err| json.invalid(err))
}

pub(crate) fn read_device_type(json: &Json<'_>) -> Result<DeviceType, ParseError> {
    DeviceType::from_identifier(json.str_value()?).map_err(|err| json.invalid(err))
}
