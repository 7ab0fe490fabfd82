//! PostgreSQL type mapping to JSON values.

use crate::database::executor::Row;
use crate::error::ServerError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

/// Convert a tokio-postgres row into a JSON object keyed by column name.
pub fn row_to_json(row: &tokio_postgres::Row) -> Result<Row, ServerError> {
    let mut map = Row::new();
    for (idx, column) in row.columns().iter().enumerate() {
        map.insert(column.name().to_string(), cell_to_json(row, idx)?);
    }
    Ok(map)
}

/// Convert a single cell to a JSON value based on its declared type.
fn cell_to_json(row: &tokio_postgres::Row, idx: usize) -> Result<Value, ServerError> {
    let ty = row.columns()[idx].type_();

    let value = match ty.name() {
        "bool" => json_opt(row.try_get::<_, Option<bool>>(idx)?),
        "int2" => json_opt(row.try_get::<_, Option<i16>>(idx)?),
        "int4" => json_opt(row.try_get::<_, Option<i32>>(idx)?),
        "int8" => json_opt(row.try_get::<_, Option<i64>>(idx)?),
        "float4" => json_opt(row.try_get::<_, Option<f32>>(idx)?),
        "float8" => json_opt(row.try_get::<_, Option<f64>>(idx)?),
        "numeric" => row
            .try_get::<_, Option<Decimal>>(idx)?
            .map(|d| Value::String(d.to_string()))
            .unwrap_or(Value::Null),
        "text" | "varchar" | "bpchar" | "name" | "unknown" => {
            json_opt(row.try_get::<_, Option<String>>(idx)?)
        }
        "uuid" => row
            .try_get::<_, Option<Uuid>>(idx)?
            .map(|u| Value::String(u.to_string()))
            .unwrap_or(Value::Null),
        "timestamp" => row
            .try_get::<_, Option<NaiveDateTime>>(idx)?
            .map(|t| Value::String(t.to_string()))
            .unwrap_or(Value::Null),
        "timestamptz" => row
            .try_get::<_, Option<DateTime<Utc>>>(idx)?
            .map(|t| Value::String(t.to_rfc3339()))
            .unwrap_or(Value::Null),
        "date" => row
            .try_get::<_, Option<NaiveDate>>(idx)?
            .map(|d| Value::String(d.to_string()))
            .unwrap_or(Value::Null),
        "time" => row
            .try_get::<_, Option<NaiveTime>>(idx)?
            .map(|t| Value::String(t.to_string()))
            .unwrap_or(Value::Null),
        "json" | "jsonb" => row
            .try_get::<_, Option<Value>>(idx)?
            .unwrap_or(Value::Null),
        "bytea" => row
            .try_get::<_, Option<Vec<u8>>>(idx)?
            .map(|bytes| Value::String(encode_bytea(&bytes)))
            .unwrap_or(Value::Null),
        other => {
            // Unknown types surface as null rather than failing the row.
            debug!("Unmapped column type '{}', emitting null", other);
            Value::Null
        }
    };

    Ok(value)
}

/// Lift an optional scalar into a JSON value.
fn json_opt<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}

/// Format bytea contents in PostgreSQL hex notation.
fn encode_bytea(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("\\x");
    for b in bytes {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
