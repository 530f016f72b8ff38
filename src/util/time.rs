//! Locale-aware date rendering for search matching and display.
//!
//! Month names and the locale date string depend on two choices that must
//! be pinned explicitly: the locale whose month tables are used and the time
//! zone in which an instant is rendered. [`DateLabeler`] carries both.

use crate::error::{DeskError, Result};
use chrono::{DateTime, FixedOffset, Local, Locale, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Default locale for month names.
pub const DEFAULT_LOCALE: &str = "en_US";

/// Time zone used when rendering an instant into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayZone {
    #[default]
    Utc,
    Local,
    Fixed(FixedOffset),
}

impl FromStr for DisplayZone {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "utc" | "z" | "" => return Ok(Self::Utc),
            "local" => return Ok(Self::Local),
            _ => {}
        }

        parse_offset(trimmed).map(Self::Fixed).ok_or_else(|| {
            DeskError::Config(format!(
                "invalid timezone '{trimmed}' (use utc, local, or an offset like +02:00)"
            ))
        })
    }
}

impl fmt::Display for DisplayZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Utc => f.write_str("utc"),
            Self::Local => f.write_str("local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };
    let (hours, minutes) = rest.split_once(':').unwrap_or((rest, "0"));
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if !(0..=23).contains(&hours) || !(0..=59).contains(&minutes) {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Parse a POSIX locale name (`en_US`, `de_DE`, `fr_FR`, ...).
///
/// # Errors
///
/// Returns `InvalidLocale` if chrono's locale tables do not know the name.
pub fn parse_locale(name: &str) -> Result<Locale> {
    let trimmed = name.trim();
    // Accept "en-US" and "en_US.UTF-8" spellings.
    let base = trimmed.split('.').next().unwrap_or(trimmed).replace('-', "_");
    Locale::try_from(base.as_str()).map_err(|_| DeskError::InvalidLocale {
        locale: name.to_string(),
    })
}

/// Renders instants into the month names and date string used by search.
#[derive(Debug, Clone, Copy)]
pub struct DateLabeler {
    locale: Locale,
    zone: DisplayZone,
}

impl Default for DateLabeler {
    fn default() -> Self {
        Self {
            locale: Locale::en_US,
            zone: DisplayZone::Utc,
        }
    }
}

impl DateLabeler {
    #[must_use]
    pub const fn new(locale: Locale, zone: DisplayZone) -> Self {
        Self { locale, zone }
    }

    /// Build a labeler from configuration strings.
    ///
    /// # Errors
    ///
    /// Returns an error if the locale or time zone is not recognized.
    pub fn from_names(locale: &str, zone: &str) -> Result<Self> {
        Ok(Self::new(parse_locale(locale)?, zone.parse()?))
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    #[must_use]
    pub const fn zone(&self) -> DisplayZone {
        self.zone
    }

    /// Long month name, short month name, locale date string and the same
    /// date string without zero padding (`1/5/2025`), in that order.
    #[must_use]
    pub fn labels(&self, at: DateTime<Utc>) -> [String; 4] {
        match self.zone {
            DisplayZone::Utc => self.labels_in(&at),
            DisplayZone::Local => self.labels_in(&at.with_timezone(&Local)),
            DisplayZone::Fixed(offset) => self.labels_in(&at.with_timezone(&offset)),
        }
    }

    fn labels_in<Tz>(&self, at: &DateTime<Tz>) -> [String; 4]
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let date = at.format_localized("%x", self.locale).to_string();
        let unpadded = strip_zero_padding(&date);
        [
            at.format_localized("%B", self.locale).to_string(),
            at.format_localized("%b", self.locale).to_string(),
            date,
            unpadded,
        ]
    }

    /// Human-facing timestamp for detail views.
    #[must_use]
    pub fn display(&self, at: DateTime<Utc>) -> String {
        const FORMAT: &str = "%x %H:%M";
        match self.zone {
            DisplayZone::Utc => at.format_localized(FORMAT, self.locale).to_string(),
            DisplayZone::Local => at
                .with_timezone(&Local)
                .format_localized(FORMAT, self.locale)
                .to_string(),
            DisplayZone::Fixed(offset) => at
                .with_timezone(&offset)
                .format_localized(FORMAT, self.locale)
                .to_string(),
        }
    }
}

/// Drop leading zeros from every run of digits: `01/05/2025` becomes
/// `1/5/2025` and `05.01.2025` becomes `5.1.2025`.
fn strip_zero_padding(date: &str) -> String {
    let mut out = String::with_capacity(date.len());
    let mut chars = date.chars().peekable();
    let mut at_run_start = true;
    while let Some(ch) = chars.next() {
        if ch.is_ascii_digit() {
            let next_is_digit = chars.peek().is_some_and(char::is_ascii_digit);
            if !(at_run_start && ch == '0' && next_is_digit) {
                at_run_start = false;
                out.push(ch);
            }
        } else {
            at_run_start = true;
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan_15() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn english_labels() {
        let labels = DateLabeler::default().labels(jan_15());
        assert_eq!(labels[0], "January");
        assert_eq!(labels[1], "Jan");
        assert_eq!(labels[2], "01/15/2025");
        assert_eq!(labels[3], "1/15/2025");
    }

    #[test]
    fn zero_padding_is_stripped_per_number() {
        assert_eq!(strip_zero_padding("01/05/2025"), "1/5/2025");
        assert_eq!(strip_zero_padding("05.01.2025"), "5.1.2025");
        assert_eq!(strip_zero_padding("10/20/2030"), "10/20/2030");
        assert_eq!(strip_zero_padding("00/00"), "0/0");
    }

    #[test]
    fn german_month_names() {
        let labeler = DateLabeler::from_names("de_DE", "utc").unwrap();
        let labels = labeler.labels(jan_15());
        assert_eq!(labels[0], "Januar");
    }

    #[test]
    fn offset_can_move_the_month() {
        let new_year = Utc.with_ymd_and_hms(2025, 1, 31, 23, 30, 0).unwrap();
        let utc = DateLabeler::default().labels(new_year);
        assert_eq!(utc[0], "January");

        let ahead = DateLabeler::from_names("en_US", "+02:00").unwrap();
        assert_eq!(ahead.labels(new_year)[0], "February");
    }

    #[test]
    fn parse_locale_accepts_variants() {
        assert_eq!(parse_locale("en_US").unwrap(), Locale::en_US);
        assert_eq!(parse_locale("en-US").unwrap(), Locale::en_US);
        assert_eq!(parse_locale("de_DE.UTF-8").unwrap(), Locale::de_DE);
        assert!(matches!(
            parse_locale("xx_YY"),
            Err(DeskError::InvalidLocale { .. })
        ));
    }

    #[test]
    fn parse_display_zone() {
        assert_eq!("UTC".parse::<DisplayZone>().unwrap(), DisplayZone::Utc);
        assert_eq!("local".parse::<DisplayZone>().unwrap(), DisplayZone::Local);
        assert_eq!(
            "-05:30".parse::<DisplayZone>().unwrap(),
            DisplayZone::Fixed(FixedOffset::west_opt(5 * 3600 + 30 * 60).unwrap())
        );
        assert_eq!(
            "+3".parse::<DisplayZone>().unwrap(),
            DisplayZone::Fixed(FixedOffset::east_opt(3 * 3600).unwrap())
        );
        assert!("mars".parse::<DisplayZone>().is_err());
        assert!("+25:00".parse::<DisplayZone>().is_err());
    }
}
