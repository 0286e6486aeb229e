// ABOUTME: Broadcast date and time parsing for video metadata.
// ABOUTME: Combines a yyyy-MM-dd date with an HH:MM time into a local timestamp.

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone};

/// Combines `broadcast_date` (`%Y-%m-%d`) and `broadcast_time` (`%H:%M`)
/// into a local timestamp with seconds set to zero.
/// Returns None if either part fails to parse or the local time does not exist.
pub fn parse_broadcast(date: &str, time: &str) -> Option<DateTime<Local>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").ok()?;
    Local.from_local_datetime(&date.and_time(time)).earliest()
}
