use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Time span a sparkline is currently showing.
///
/// Governs how the hover date is rendered while scrubbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoverPeriod {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl HoverPeriod {
    /// Parses the period identifiers hosts pass along with scrub params.
    ///
    /// Accepts the long names and the short `1h`/`1d`/`1w`/`1m`/`1y` forms.
    #[must_use]
    pub fn parse(period: &str) -> Option<Self> {
        match period.trim().to_ascii_lowercase().as_str() {
            "hour" | "1h" => Some(Self::Hour),
            "day" | "1d" => Some(Self::Day),
            "week" | "1w" => Some(Self::Week),
            "month" | "1m" => Some(Self::Month),
            "year" | "1y" => Some(Self::Year),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::All => "all",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Self::Hour | Self::Day => "%-I:%M %p",
            Self::Week => "%b %-d, %-I:%M %p",
            Self::Month | Self::Year => "%b %-d, %Y",
            Self::All => "%b %Y",
        }
    }
}

/// Default hover-date formatter.
///
/// Returns `None` for unknown periods; callers skip the text update in that case.
#[must_use]
pub fn format_hover_date(date: DateTime<Utc>, period: &str) -> Option<String> {
    let period = HoverPeriod::parse(period)?;
    Some(date.format(period.pattern()).to_string())
}
