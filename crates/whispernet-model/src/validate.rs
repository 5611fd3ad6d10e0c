//! Field checks shared by the record types

use chrono::{DateTime, NaiveDate, NaiveTime};

use crate::error::ModelError;
use crate::Result;

pub(crate) fn non_empty(field: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ModelError::invalid(field, "must not be empty"));
    }
    Ok(())
}

pub(crate) fn uri(field: &'static str, value: &str) -> Result<()> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|e| ModelError::invalid(field, format!("not a URI ({})", e)))
}

pub(crate) fn date(field: &'static str, value: &str, format: &str) -> Result<()> {
    NaiveDate::parse_from_str(value, format)
        .map(|_| ())
        .map_err(|e| ModelError::invalid(field, format!("{:?} ({})", value, e)))
}

pub(crate) fn time(field: &'static str, value: &str, format: &str) -> Result<()> {
    NaiveTime::parse_from_str(value, format)
        .map(|_| ())
        .map_err(|e| ModelError::invalid(field, format!("{:?} ({})", value, e)))
}

pub(crate) fn timestamp(field: &'static str, value: &str) -> Result<()> {
    DateTime::parse_from_rfc3339(value)
        .map(|_| ())
        .map_err(|e| ModelError::invalid(field, format!("{:?} ({})", value, e)))
}

pub(crate) fn in_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(ModelError::invalid(
            field,
            format!("{} is outside {}..={}", value, min, max),
        ));
    }
    Ok(())
}
