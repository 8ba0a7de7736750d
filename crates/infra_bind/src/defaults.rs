//! Default adapters for date and time values
//!
//! Dates bind as ISO-8601 text (`YYYY-MM-DD`) and timestamps as
//! `YYYY-MM-DD HH:MM:SS`, with microseconds appended only when present.

use adapt_kernel::Adapted;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};
use tracing::debug;

use crate::binder::BindContext;
use crate::error::BindError;
use crate::value::SqlValue;

/// Registers the date and time adapters on `context`
pub fn register_default_adapters(context: &BindContext) -> Result<(), BindError> {
    context.register_adapter(|date: &NaiveDate| Ok(Adapted::new(SqlValue::Text(adapt_date(date)))))?;
    context.register_adapter(|timestamp: &NaiveDateTime| {
        Ok(Adapted::new(SqlValue::Text(adapt_datetime(timestamp))))
    })?;
    context.register_adapter(|timestamp: &DateTime<Utc>| {
        Ok(Adapted::new(SqlValue::Text(format!(
            "{}+00:00",
            adapt_datetime(&timestamp.naive_utc())
        ))))
    })?;

    debug!(protocol = %context.prepare_protocol(), "Default date/time adapters registered");
    Ok(())
}

/// Formats a date as `YYYY-MM-DD`
pub fn adapt_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Formats a timestamp as `YYYY-MM-DD HH:MM:SS[.ffffff]`
pub fn adapt_datetime(timestamp: &NaiveDateTime) -> String {
    if timestamp.nanosecond() / 1_000 == 0 {
        timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    } else {
        timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn timestamp(micros: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_micro_opt(13, 5, 9, micros)
            .unwrap()
    }

    #[test]
    fn test_adapt_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(adapt_date(&date), "2024-02-29");
    }

    #[test]
    fn test_adapt_datetime_whole_seconds() {
        assert_eq!(adapt_datetime(&timestamp(0)), "2024-01-31 13:05:09");
    }

    #[test]
    fn test_adapt_datetime_with_micros() {
        assert_eq!(adapt_datetime(&timestamp(42)), "2024-01-31 13:05:09.000042");
    }

    #[test]
    fn test_defaults_bind_dates() {
        let context = BindContext::initialize(&crate::BindConfig::default()).unwrap();
        register_default_adapters(&context).unwrap();

        let date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let utc = Utc.with_ymd_and_hms(2024, 6, 15, 8, 30, 0).unwrap();
        let values = context.bind_parameters(2, &[&date, &utc]).unwrap();

        assert_eq!(
            values,
            vec![
                SqlValue::Text("2024-06-15".into()),
                SqlValue::Text("2024-06-15 08:30:00+00:00".into()),
            ]
        );
        assert!(!context.base_type_adapted());
    }
}
