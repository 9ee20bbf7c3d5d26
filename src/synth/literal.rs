// SQL Literal Rendering
//
// Type-aware conversion of fetched values into literals for INSERT text.

use chrono::SecondsFormat;

use crate::engine::result::DataValue;

/// Single-quote `s`, doubling every embedded quote
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Render a value as a SQL literal
pub fn sql_literal(value: &DataValue) -> String {
    match value {
        DataValue::Null => "NULL".to_string(),
        DataValue::Integer(i) => i.to_string(),
        DataValue::Float(f) if f.is_nan() => "'NaN'".to_string(),
        DataValue::Float(f) if f.is_infinite() && *f > 0.0 => "'Infinity'".to_string(),
        DataValue::Float(f) if f.is_infinite() => "'-Infinity'".to_string(),
        DataValue::Float(f) => f.to_string(),
        DataValue::Numeric(n) => n.clone(),
        DataValue::Text(s) => quote_string(s),
        DataValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        DataValue::Date(d) => format!("'{}'", d.format("%Y-%m-%d")),
        DataValue::Time(t) => format!("'{}'", t.format("%H:%M:%S%.f")),
        DataValue::Timestamp(ts) => format!("'{}'", ts.format("%Y-%m-%dT%H:%M:%S%.f")),
        DataValue::TimestampTz(ts) => format!("'{}'", ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        DataValue::Json(v) => quote_string(&v.to_string()),
        DataValue::Blob(b) => format!("'\\x{}'", hex::encode(b)),
    }
}
