use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

/// Parses the timestamp shapes the server sends, in local time.
///
/// Accepts RFC 3339, naive ISO date-times (taken as local), bare dates and
/// the `Sun Oct 18 2026 14:03:00 GMT+0200 (Zone Name)` form browsers produce.
pub fn parse_timestamp(ts: &str) -> Option<DateTime<Local>> {
    let ts = ts.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(&Local));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S%.f") {
        return Local.from_local_datetime(&naive).earliest();
    }
    if let Ok(date) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        return Local.from_local_datetime(&date.and_hms_opt(0, 0, 0)?).earliest();
    }
    let head = ts.split(" (").next().unwrap_or(ts);
    DateTime::parse_from_str(head, "%a %b %d %Y %H:%M:%S GMT%z")
        .ok()
        .map(|dt| dt.with_timezone(&Local))
}

/// Clock time shown under each bubble, e.g. `2:05 PM`. Unparseable input is shown as-is.
pub fn format_timestamp(ts: &str) -> String {
    match parse_timestamp(ts) {
        Some(dt) => dt.format("%-I:%M %p").to_string(),
        None => ts.to_string(),
    }
}

/// Header for days other than today and yesterday, e.g. `October 16, 2026`.
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

pub fn now_timestamp() -> String {
    Local::now().to_rfc3339()
}
