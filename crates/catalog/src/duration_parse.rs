// ABOUTME: Duration string parsing for video lengths from the metadata endpoint.
// ABOUTME: Reads minutes and seconds from the first two colon-separated fields.

/// Parses an `MM:SS` duration into seconds.
///
/// Only the first two fields count: `01:02:03` is 62 seconds. Seconds are not
/// range-checked, so `1:75` is 135. Returns None when either field is missing
/// or not a number, or when the total doesn't fit in i32.
pub fn parse_duration_seconds(s: &str) -> Option<i32> {
    let mut fields = s.trim().split(':');
    let mins: u32 = fields.next()?.trim().parse().ok()?;
    let secs: u32 = fields.next()?.trim().parse().ok()?;

    let total = u64::from(mins) * 60 + u64::from(secs);
    i32::try_from(total).ok()
}
