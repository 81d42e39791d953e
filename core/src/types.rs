//! Domain DTOs for the employee API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates. The wire
//! format is camelCase JSON; optional fields are omitted when absent.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier assigned by the remote service. `0` means "not yet persisted".
pub type EmployeeId = i64;

/// A single employee record as exchanged with the API.
///
/// The same shape is used for create and update payloads: the service ignores
/// `id` on create and replaces every other field on update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(default)]
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    /// Stored rows may carry `null` here; it reads as blank.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hire_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Employee {
    /// Build an unsaved record from the three required fields.
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            ..Self::default()
        }
    }

    /// Whether the service has assigned an id to this record.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }

    /// JSON names of required fields that are blank, in declaration order.
    ///
    /// A record is valid for submission when this is empty.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        [
            ("firstName", &self.first_name),
            ("lastName", &self.last_name),
            ("email", &self.email),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Year component of `hire_date`, if it parses.
    pub fn hire_year(&self) -> Option<i32> {
        let normalized = normalize_hire_date(self.hire_date.as_deref()?);
        NaiveDate::parse_from_str(&normalized, "%Y-%m-%d")
            .ok()
            .map(|date| date.year())
    }
}

/// Reduce an ISO-8601 date or date-time to a plain `YYYY-MM-DD` string.
///
/// Offset date-times are converted to UTC before truncation. Input that does
/// not parse as any of the accepted forms is returned unchanged.
pub fn normalize_hire_date(raw: &str) -> String {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return datetime
            .with_timezone(&Utc)
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return datetime.date().format("%Y-%m-%d").to_string();
    }
    raw.to_string()
}
