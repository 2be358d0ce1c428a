//! Row conversion helpers

use crate::error::{Error, Result};
use crate::lead::Lead;
use crate::result_set::{ResultSet, Row, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Column, Row as _, TypeInfo, ValueRef};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub(crate) fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|e| Error::Decode(format!("invalid date '{text}': {e}")))
}

fn parse_timestamp(text: &str) -> Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|e| Error::Decode(format!("invalid timestamp '{text}': {e}")))
}

/// Convert engine rows into a `ResultSet`, keeping column order.
///
/// SQLite only reports columns alongside rows, so an empty result has no
/// columns.
pub(crate) fn rows_to_result_set(rows: &[SqliteRow]) -> Result<ResultSet> {
    let columns: Vec<String> = rows
        .first()
        .map(|row| {
            row.columns()
                .iter()
                .map(|c| c.name().to_string())
                .collect()
        })
        .unwrap_or_default();

    let rows = rows
        .iter()
        .map(|row| (0..columns.len()).map(|i| decode_value(row, i)).collect())
        .collect::<Result<Vec<Row>>>()?;

    Ok(ResultSet::new(columns, rows))
}

/// Decode by the value's storage class rather than the declared column type;
/// expressions such as `COUNT(*)` have no declared type at all.
fn decode_value(row: &SqliteRow, idx: usize) -> Result<Value> {
    let raw = row
        .try_get_raw(idx)
        .map_err(|e| Error::Decode(e.to_string()))?;
    if raw.is_null() {
        return Ok(Value::Null);
    }
    let type_name = raw.type_info().name().to_ascii_uppercase();

    let decode_err = |e: sqlx::Error| Error::Decode(format!("column {idx}: {e}"));
    let value = match type_name.as_str() {
        "INTEGER" | "BOOLEAN" => {
            Value::Integer(row.try_get_unchecked::<i64, _>(idx).map_err(decode_err)?)
        }
        "REAL" | "NUMERIC" => {
            Value::Real(row.try_get_unchecked::<f64, _>(idx).map_err(decode_err)?)
        }
        "BLOB" => {
            let bytes = row
                .try_get_unchecked::<Vec<u8>, _>(idx)
                .map_err(decode_err)?;
            Value::Text(format!("<{} bytes>", bytes.len()))
        }
        _ => Value::Text(
            row.try_get_unchecked::<String, _>(idx)
                .map_err(decode_err)?,
        ),
    };
    Ok(value)
}

pub(crate) fn row_to_lead(row: SqliteRow) -> Result<Lead> {
    let get_text = |name: &str| -> Result<String> {
        row.try_get_unchecked::<Option<String>, _>(name)
            .map(Option::unwrap_or_default)
            .map_err(|e| Error::Decode(format!("{name}: {e}")))
    };

    let id = row
        .try_get_unchecked::<i64, _>("id")
        .map_err(|e| Error::Decode(format!("id: {e}")))?;
    let budget = row
        .try_get_unchecked::<f64, _>("budget")
        .map_err(|e| Error::Decode(format!("budget: {e}")))?;

    Ok(Lead {
        id,
        customer_name: get_text("customer_name")?,
        company: get_text("company")?,
        needs: get_text("needs")?,
        budget,
        timeline_start: parse_date(&get_text("timeline_start")?)?,
        timeline_end: parse_date(&get_text("timeline_end")?)?,
        created_at: parse_timestamp(&get_text("created_at")?)?,
    })
}
