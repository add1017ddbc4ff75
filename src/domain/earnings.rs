//! Next-earnings extraction and proximity test.

use crate::domain::datetime_parse::parse_date_flexible;
use crate::domain::extract::at_path;
use crate::domain::tristate::Tristate;
use chrono::NaiveDate;
use serde_json::Value;

/// Locations of the next earnings date, in priority order.
pub const EARNINGS_DATE_PATHS: &[&[&str]] = &[&["Earnings", "Date"], &["General", "EarningsDate"]];

/// Next earnings date from a fundamentals document.
///
/// The first path that exists and holds a string decides; a later path is not
/// consulted when an earlier one holds an unparseable value.
pub fn extract_earnings_date(fundamentals: &Value) -> Option<NaiveDate> {
    let raw = EARNINGS_DATE_PATHS
        .iter()
        .find_map(|path| at_path(fundamentals, path))?;
    match raw.as_str() {
        Some(s) => {
            let parsed = parse_date_flexible(s);
            if parsed.is_none() {
                tracing::debug!(value = s, "unparseable earnings date");
            }
            parsed
        }
        None => None,
    }
}

/// Is the next earnings date within `days` of `today`?
///
/// `Yes` when `0 <= earnings - today <= days`. Dates already in the past are
/// `No`. Missing documents, missing fields and unparseable dates are `Unknown`.
pub fn earnings_proximity(fundamentals: Option<&Value>, today: NaiveDate, days: i64) -> Tristate {
    let Some(date) = fundamentals.and_then(extract_earnings_date) else {
        return Tristate::Unknown;
    };
    let diff = (date - today).num_days();
    Tristate::from(diff >= 0 && diff <= days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn earnings_section_takes_priority() {
        let doc = json!({
            "Earnings": {"Date": "2024-03-16"},
            "General": {"EarningsDate": "2024-06-01"}
        });
        assert_eq!(
            extract_earnings_date(&doc),
            NaiveDate::from_ymd_opt(2024, 3, 16)
        );
    }

    #[test]
    fn general_section_is_the_fallback() {
        let doc = json!({"General": {"EarningsDate": "2024-03-17"}});
        assert_eq!(earnings_proximity(Some(&doc), today(), 2), Tristate::Yes);
    }

    #[test]
    fn boundary_day_is_soon() {
        let doc = json!({"Earnings": {"Date": "2024-03-17"}});
        assert_eq!(earnings_proximity(Some(&doc), today(), 2), Tristate::Yes);
        let doc = json!({"Earnings": {"Date": "2024-03-18"}});
        assert_eq!(earnings_proximity(Some(&doc), today(), 2), Tristate::No);
    }

    #[test]
    fn same_day_is_soon() {
        let doc = json!({"Earnings": {"Date": "2024-03-15"}});
        assert_eq!(earnings_proximity(Some(&doc), today(), 2), Tristate::Yes);
    }

    #[test]
    fn past_earnings_are_not_soon() {
        let doc = json!({"Earnings": {"Date": "2024-03-01"}});
        assert_eq!(earnings_proximity(Some(&doc), today(), 2), Tristate::No);
    }

    #[test]
    fn unparseable_date_is_unknown() {
        let doc = json!({"Earnings": {"Date": "sometime in Q2"}});
        assert_eq!(earnings_proximity(Some(&doc), today(), 2), Tristate::Unknown);
    }

    #[test]
    fn non_string_date_is_unknown() {
        let doc = json!({"Earnings": {"Date": 20240316}});
        assert_eq!(earnings_proximity(Some(&doc), today(), 2), Tristate::Unknown);
    }

    #[test]
    fn missing_document_or_field_is_unknown() {
        assert_eq!(earnings_proximity(None, today(), 2), Tristate::Unknown);
        assert_eq!(
            earnings_proximity(Some(&json!({"General": {"Name": "X"}})), today(), 2),
            Tristate::Unknown
        );
        assert_eq!(
            earnings_proximity(Some(&json!([1, 2, 3])), today(), 2),
            Tristate::Unknown
        );
    }
}
