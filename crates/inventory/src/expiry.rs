//! Day-offset arithmetic between "today" and an item's expiry date.

use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use larder_core::{DomainError, DomainResult};

/// Calendar format used for expiry dates on the wire and in user input.
pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Items this many days out (or fewer) are flagged as "expiring soon".
pub const SOON_WINDOW_DAYS: i64 = 2;

/// Whole days from `today` to `expiry`.
///
/// Negative if the date is past, zero if it is today, positive if in the future.
/// Both operands are calendar dates, so there is no partial-day component to
/// round away.
pub fn days_until_expiry(expiry: NaiveDate, today: NaiveDate) -> i64 {
    expiry.signed_duration_since(today).num_days()
}

/// Parse a `YYYY-MM-DD` expiry date.
pub fn parse_expiry_date(input: &str) -> DomainResult<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation("expiry date is required"));
    }
    NaiveDate::parse_from_str(trimmed, EXPIRY_DATE_FORMAT).map_err(|e| {
        DomainError::validation(format!(
            "invalid expiry date {trimmed:?} (expected YYYY-MM-DD): {e}"
        ))
    })
}

/// `today` shifted by `days`, saturating at the calendar bounds.
pub fn offset_date(today: NaiveDate, days: i64) -> NaiveDate {
    TimeDelta::try_days(days)
        .and_then(|delta| today.checked_add_signed(delta))
        .unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Freshness classification shown next to each inventory row.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired { days_ago: i64 },
    ExpiresToday,
    ExpiringSoon { days: i64 },
    Fresh { days: i64 },
}

impl ExpiryStatus {
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d < 0 => Self::Expired { days_ago: -d },
            0 => Self::ExpiresToday,
            d if d <= SOON_WINDOW_DAYS => Self::ExpiringSoon { days: d },
            d => Self::Fresh { days: d },
        }
    }

    pub fn for_date(expiry: NaiveDate, today: NaiveDate) -> Self {
        Self::from_days(days_until_expiry(expiry, today))
    }

    /// Whether the row deserves a warning marker.
    pub fn is_warning(&self) -> bool {
        !matches!(self, Self::Fresh { .. })
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired { .. })
    }
}

impl core::fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Expired { days_ago } => write!(f, "Expired {days_ago} day(s) ago"),
            Self::ExpiresToday => f.write_str("Expires today"),
            Self::ExpiringSoon { days } | Self::Fresh { days } => {
                write!(f, "Expires in {days} day(s)")
            }
        }
    }
}
