use chrono::{DateTime, NaiveDate, Utc};

pub const NO_DUE_DATE: &str = "No due date";
pub const INVALID_DATE: &str = "Invalid date";

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 3_600;
const DAY_SECS: i64 = 86_400;
const WEEK_SECS: i64 = 604_800;

/// Accepts the two timestamp shapes the backend emits: RFC 3339
/// date-times and bare ISO dates.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Relative age of a timestamp: "Just now" under a minute, then
/// minutes, hours and days, and the absolute date beyond a week.
pub fn format_time_ago(raw: &str, now: DateTime<Utc>) -> String {
    let Some(ts) = parse_timestamp(raw) else {
        return INVALID_DATE.to_string();
    };

    let secs = (now - ts).num_seconds();
    if secs < MINUTE_SECS {
        "Just now".to_string()
    } else if secs < HOUR_SECS {
        format!("{}m ago", secs / MINUTE_SECS)
    } else if secs < DAY_SECS {
        format!("{}h ago", secs / HOUR_SECS)
    } else if secs < WEEK_SECS {
        format!("{}d ago", secs / DAY_SECS)
    } else {
        format_date(raw)
    }
}

pub fn format_date(raw: &str) -> String {
    match parse_timestamp(raw) {
        Some(ts) => ts.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

pub fn format_due_date(due: Option<&str>) -> String {
    match due {
        Some(raw) => format_date(raw),
        None => NO_DUE_DATE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{format_date, format_due_date, format_time_ago};

    fn now() -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 23, 12, 0, 0)
            .single()
            .expect("valid now")
    }

    #[test]
    fn current_instant_renders_just_now() {
        assert_eq!(format_time_ago("2026-08-23T12:00:00Z", now()), "Just now");
    }

    #[test]
    fn five_minutes_ago_renders_minutes() {
        let rendered = format_time_ago("2026-08-23T11:55:00Z", now());
        assert_eq!(rendered, "5m ago");
        assert!(rendered.contains("m ago"));
    }

    #[test]
    fn hour_and_day_thresholds() {
        assert_eq!(format_time_ago("2026-08-23T09:00:00Z", now()), "3h ago");
        assert_eq!(format_time_ago("2026-08-21T12:00:00Z", now()), "2d ago");
    }

    #[test]
    fn older_than_a_week_renders_absolute_date() {
        assert_eq!(format_time_ago("2026-08-01T12:00:00Z", now()), "Aug 1, 2026");
    }

    #[test]
    fn unparseable_input_renders_invalid_date() {
        assert_eq!(format_time_ago("not-a-date", now()), "Invalid date");
        assert_eq!(format_date("yesterday-ish"), "Invalid date");
    }

    #[test]
    fn due_dates_handle_absence_and_bare_dates() {
        assert_eq!(format_due_date(None), "No due date");
        assert_eq!(format_due_date(Some("2026-09-01")), "Sep 1, 2026");
    }
}
