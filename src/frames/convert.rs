//! Conversions from polars frames into JSON values for the rendered dashboard.

use crate::utils::date_from_epoch_days;
use polars::prelude::{AnyValue, DataFrame, PolarsError};
use serde_json::{Map, Number, Value};

/// Column names in frame order.
pub(crate) fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Rows as positional JSON arrays, in frame order.
pub(crate) fn frame_rows(df: &DataFrame) -> Result<Vec<Vec<Value>>, PolarsError> {
    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for column in df.get_columns() {
        let series = column.as_materialized_series();
        for (idx, row) in rows.iter_mut().enumerate() {
            row.push(any_value_to_json(series.get(idx)?));
        }
    }
    Ok(rows)
}

/// Rows as `{column: value}` objects, the shape Vega-Lite expects for inline data.
pub(crate) fn frame_records(df: &DataFrame) -> Result<Vec<Value>, PolarsError> {
    let names = column_names(df);
    Ok(frame_rows(df)?
        .into_iter()
        .map(|row| {
            let object: Map<String, Value> = names.iter().cloned().zip(row).collect();
            Value::Object(object)
        })
        .collect())
}

fn any_value_to_json(value: AnyValue<'_>) -> Value {
    match value {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(b),
        AnyValue::Int8(v) => Value::from(v),
        AnyValue::Int16(v) => Value::from(v),
        AnyValue::Int32(v) => Value::from(v),
        AnyValue::Int64(v) => Value::from(v),
        AnyValue::UInt8(v) => Value::from(v),
        AnyValue::UInt16(v) => Value::from(v),
        AnyValue::UInt32(v) => Value::from(v),
        AnyValue::UInt64(v) => Value::from(v),
        AnyValue::Float32(v) => float_to_json(f64::from(v)),
        AnyValue::Float64(v) => float_to_json(v),
        AnyValue::String(s) => Value::String(s.to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Date(days) => match date_from_epoch_days(days) {
            Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
            None => Value::Null,
        },
        other => Value::String(other.to_string()),
    }
}

// NaN and infinities have no JSON representation
fn float_to_json(v: f64) -> Value {
    Number::from_f64(v).map(Value::Number).unwrap_or(Value::Null)
}
