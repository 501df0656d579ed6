use {
    crate::ProposalStatus,
    chrono::{DateTime, TimeZone, Utc},
    std::fmt::Display,
};

/// Long-form calendar date with a 24-hour clock, e.g.
/// `Thursday, January 1, 1970, 00:00:00`.
pub const DATE_FORMAT: &str = "%A, %B %-d, %Y, %H:%M:%S";

/// Render a UNIX timestamp in seconds as a calendar string in timezone `tz`.
///
/// Timestamps too large to be represented as a date are rendered verbatim.
pub fn date_formatter<Tz>(timestamp: u64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    i64::try_from(timestamp)
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .map(|datetime| datetime.with_timezone(tz).format(DATE_FORMAT).to_string())
        .unwrap_or_else(|| format!("timestamp {timestamp}"))
}

/// Wall-clock UNIX time in seconds, as compared against end dates.
pub fn now_seconds() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// `Open` or `Closed`, judged from the end date alone.
pub fn status_label(end_date: u64, now: u64) -> ProposalStatus {
    if end_date > now {
        ProposalStatus::Open
    } else {
        ProposalStatus::Closed
    }
}

pub fn votes_label(votes: u64) -> String {
    format!("{votes} Vote(s)")
}

// ----------------------------------- tests -----------------------------------
