//! Custom Tera filters available to every template

use std::collections::HashMap;

use tera::{Tera, Value};

use crate::core::utils::{to_camel_case, to_kebab_case, to_pascal_case, to_snake_case};
use crate::generation::{FALLBACK_TYPE, map_type};

/// Register every custom filter on `tera`
pub fn register_filters(tera: &mut Tera) {
    tera.register_filter("to_ts_type", to_ts_type);
    tera.register_filter("snake_case", snake_case);
    tera.register_filter("pascal_case", pascal_case);
    tera.register_filter("camel_case", camel_case);
    tera.register_filter("kebab_case", kebab_case);
}

/// `{{ field.type | to_ts_type }}`; anything that is not a known tag is `any`
pub fn to_ts_type(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let ts_type = value.as_str().map(map_type).unwrap_or(FALLBACK_TYPE);
    Ok(Value::String(ts_type.to_string()))
}

fn convert_case(
    filter: &str,
    value: &Value,
    convert: fn(&str) -> String,
) -> tera::Result<Value> {
    match value.as_str() {
        Some(s) => Ok(Value::String(convert(s))),
        None => Err(tera::Error::msg(format!(
            "Filter `{filter}` expects a string, got {value}"
        ))),
    }
}

pub fn snake_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    convert_case("snake_case", value, to_snake_case)
}

pub fn pascal_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    convert_case("pascal_case", value, to_pascal_case)
}

pub fn camel_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    convert_case("camel_case", value, to_camel_case)
}

pub fn kebab_case(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    convert_case("kebab_case", value, to_kebab_case)
}
