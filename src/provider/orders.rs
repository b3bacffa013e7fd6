use crate::sales::{Appointment, AppointmentItem, AppointmentStatus, CommissionRecord};
use crate::utils::time::{parse_local_datetime, parse_time_string};
use anyhow::{Context, Result};
use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

#[derive(Debug, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    data: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct RawOrder {
    #[serde(default)]
    order_id: Option<Value>,
    #[serde(default)]
    appointment_date: Option<Value>,
    #[serde(default)]
    commission: Option<Value>,
    #[serde(default, alias = "cart_total", alias = "grandTotal")]
    total: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAppointment {
    #[serde(rename = "appointment_id", default)]
    appointment_id: Option<Value>,
    #[serde(rename = "order_id", default)]
    order_id: Option<Value>,
    #[serde(default)]
    appointment_date: Option<Value>,
    #[serde(default)]
    appointment_time: Option<String>,
    #[serde(default)]
    items_selected: Option<Vec<RawAppointmentItem>>,
    #[serde(rename = "user_name", default)]
    user_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    grand_total: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct RawAppointmentItem {
    #[serde(default)]
    service_type_name: Option<String>,
    #[serde(default)]
    duration: Option<String>,
    #[serde(default)]
    service_price: Option<Value>,
}

/// Reads a monetary JSON value without passing through `f64`.
/// Numbers and numeric strings are accepted; `null` or a missing value is zero.
fn decimal_from_value(value: Option<&Value>) -> Result<BigDecimal> {
    match value {
        None | Some(Value::Null) => Ok(BigDecimal::from(0)),
        Some(Value::Number(n)) => BigDecimal::from_str(&n.to_string())
            .map_err(|e| anyhow::anyhow!("Invalid amount {}: {}", n, e)),
        Some(Value::String(s)) => BigDecimal::from_str(s.trim())
            .map_err(|e| anyhow::anyhow!("Invalid amount '{}': {}", s, e)),
        Some(other) => Err(anyhow::anyhow!("Unexpected amount value: {}", other)),
    }
}

fn id_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn date_from_value(value: Option<&Value>) -> Result<NaiveDateTime> {
    let text = value
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow::anyhow!("missing appointment_date"))?;
    parse_local_datetime(text)
}

/// Maps the completed-orders response into commission records.
/// A row with an unreadable id, date or amount is skipped with a warning;
/// the rest of the page is kept.
pub fn parse_completed_orders(body: &str) -> Result<Vec<CommissionRecord>> {
    let envelope: DataEnvelope =
        serde_json::from_str(body).context("Failed to parse completed orders response")?;

    let mut records = Vec::with_capacity(envelope.data.len());
    for row in envelope.data {
        match order_to_record(row) {
            Ok(record) => records.push(record),
            Err(e) => tracing::warn!("Skipping order: {}", e),
        }
    }

    Ok(records)
}

fn order_to_record(row: Value) -> Result<CommissionRecord> {
    let raw: RawOrder = serde_json::from_value(row)?;
    let order_id = raw.order_id.as_ref().and_then(id_to_string);
    let context = || format!("order {:?}", order_id);

    let date = date_from_value(raw.appointment_date.as_ref()).with_context(context)?;
    let amount = decimal_from_value(raw.commission.as_ref()).with_context(context)?;
    let total = decimal_from_value(raw.total.as_ref()).with_context(context)?;

    Ok(CommissionRecord {
        order_id,
        date,
        amount,
        total,
    })
}

/// Maps the staff appointments response used by the dashboard.
/// Rows without a usable id or date are skipped with a warning.
pub fn parse_appointments(body: &str) -> Result<Vec<Appointment>> {
    let envelope: DataEnvelope =
        serde_json::from_str(body).context("Failed to parse appointments response")?;

    let mut appointments = Vec::with_capacity(envelope.data.len());
    for row in envelope.data {
        match appointment_from_row(row) {
            Ok(appointment) => appointments.push(appointment),
            Err(e) => tracing::warn!("Skipping appointment: {}", e),
        }
    }

    Ok(appointments)
}

fn appointment_id(value: Option<&Value>) -> Result<i64> {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or_else(|| anyhow::anyhow!("Invalid appointment id {}", n)),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid appointment id '{}': {}", s, e)),
        _ => Err(anyhow::anyhow!("missing appointment_id")),
    }
}

fn appointment_from_row(row: Value) -> Result<Appointment> {
    let raw: RawAppointment = serde_json::from_value(row)?;
    let appointment_id = appointment_id(raw.appointment_id.as_ref())?;

    let date = date_from_value(raw.appointment_date.as_ref())
        .with_context(|| format!("appointment {}", appointment_id))?
        .date();

    // the backend sends HH:MM:SS; some rows carry an empty string
    let time = raw
        .appointment_time
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .map(parse_time_string)
        .transpose()?;

    let items = raw
        .items_selected
        .unwrap_or_default()
        .into_iter()
        .map(|item| -> Result<AppointmentItem> {
            let price = match item.service_price {
                Some(ref value) if !value.is_null() => Some(decimal_from_value(Some(value))?),
                _ => None,
            };
            Ok(AppointmentItem {
                service_name: item.service_type_name.unwrap_or_default(),
                duration: item.duration.unwrap_or_default(),
                price,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Appointment {
        appointment_id,
        order_id: raw
            .order_id
            .as_ref()
            .and_then(id_to_string)
            .unwrap_or_default(),
        date,
        time,
        status: AppointmentStatus::from(raw.status.as_deref().unwrap_or_default()),
        grand_total: decimal_from_value(raw.grand_total.as_ref())?,
        customer_name: raw.user_name.unwrap_or_default(),
        items,
    })
}
