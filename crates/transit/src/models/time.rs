//! Service-day clock times.
//!
//! Stored as seconds since midnight of the service day. Hours may exceed
//! 23 for trips running past midnight (e.g. `25:30:00`), so parsing does
//! not go through `chrono::NaiveTime`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveTime, Timelike};

use crate::models::types::{Result, TransitError};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceTime(u32);

impl ServiceTime {
    pub fn from_seconds(seconds: u32) -> Self {
        Self(seconds)
    }

    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self(hours * 3600 + minutes * 60 + seconds)
    }

    pub fn seconds(&self) -> u32 {
        self.0
    }

    pub fn hours(&self) -> u32 {
        self.0 / 3600
    }

    pub fn minutes(&self) -> u32 {
        (self.0 / 60) % 60
    }

    /// Signed difference in whole minutes from `self` to `later`.
    ///
    /// Seconds are ignored on both sides, so `08:00:59 -> 08:01:00` is one
    /// minute.
    pub fn minutes_until(&self, later: ServiceTime) -> i64 {
        let from = i64::from(self.0 / 60);
        let to = i64::from(later.0 / 60);
        to - from
    }

    /// Adds (or subtracts) minutes, wrapping around the 24h clock.
    pub fn add_minutes(&self, minutes: i64) -> Self {
        let shifted = i64::from(self.0) + minutes * 60;
        Self(shifted.rem_euclid(SECONDS_PER_DAY) as u32)
    }

    /// `HH:MM:SS` form.
    pub fn format_with_seconds(&self) -> String {
        format!(
            "{:02}:{:02}:{:02}",
            self.hours(),
            self.minutes(),
            self.0 % 60
        )
    }

    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        NaiveTime::from_num_seconds_from_midnight_opt(self.0, 0)
    }

    /// Local wall-clock time, for "departing after now" displays.
    pub fn now() -> Self {
        Self::from(Local::now().time())
    }
}

impl From<NaiveTime> for ServiceTime {
    fn from(time: NaiveTime) -> Self {
        Self(time.num_seconds_from_midnight())
    }
}

impl FromStr for ServiceTime {
    type Err = TransitError;

    /// Accepts `H:MM` and `H:MM:SS`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TransitError::InvalidTime(s.to_owned());

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(2..=3).contains(&parts.len()) {
            return Err(invalid());
        }

        let mut fields = [0u32; 3];
        for (field, part) in fields.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *field = part.parse().map_err(|_| invalid())?;
        }

        let [hours, minutes, seconds] = fields;
        if minutes > 59 || seconds > 59 || hours > 99 {
            return Err(invalid());
        }

        Ok(Self::from_hms(hours, minutes, seconds))
    }
}

/// `HH:MM`, the form shown next to departures.
impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hours(), self.minutes())
    }
}

/// Orders two optional time strings the way departures are ranked.
///
/// Both parseable: by time. Both present but not both parseable: as text.
/// Both absent: equal. One absent: no ordering.
pub fn compare_time_strings(a: Option<&str>, b: Option<&str>) -> Option<Ordering> {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<ServiceTime>(), b.parse::<ServiceTime>()) {
            (Ok(ta), Ok(tb)) => Some(ta.cmp(&tb)),
            _ => Some(a.cmp(b)),
        },
        (None, None) => Some(Ordering::Equal),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_is_within_the_day() {
        let now = ServiceTime::now();
        assert!(now.seconds() < 24 * 60 * 60);
        assert_eq!(now.to_string().len(), 5);
        assert_eq!(now.to_naive_time().map(ServiceTime::from), Some(now));
    }

    #[test]
    fn test_parse_service_time() {
        let t: ServiceTime = "08:05".parse().unwrap();
        assert_eq!(t.seconds(), 8 * 3600 + 5 * 60);

        let t: ServiceTime = "7:45:30".parse().unwrap();
        assert_eq!(t, ServiceTime::from_hms(7, 45, 30));

        // Past midnight on the same service day
        let t: ServiceTime = "25:30:00".parse().unwrap();
        assert_eq!(t.seconds(), 91_800);

        assert!("".parse::<ServiceTime>().is_err());
        assert!("8".parse::<ServiceTime>().is_err());
        assert!("08:75".parse::<ServiceTime>().is_err());
        assert!("ab:cd".parse::<ServiceTime>().is_err());
        assert!("08:-5".parse::<ServiceTime>().is_err());
    }

    #[test]
    fn test_minutes_until() {
        let dep: ServiceTime = "08:15".parse().unwrap();
        let arr: ServiceTime = "09:02:45".parse().unwrap();
        assert_eq!(dep.minutes_until(arr), 47);
        assert_eq!(arr.minutes_until(dep), -47);
    }

    #[test]
    fn test_add_minutes_wraps() {
        let t: ServiceTime = "23:50".parse().unwrap();
        assert_eq!(t.add_minutes(15).to_string(), "00:05");
        assert_eq!(t.add_minutes(-60 * 24).to_string(), "23:50");

        let t: ServiceTime = "00:10:30".parse().unwrap();
        assert_eq!(t.add_minutes(-20).format_with_seconds(), "23:50:30");
    }

    #[test]
    fn test_naive_time_conversion() {
        let naive = NaiveTime::from_hms_opt(14, 3, 9).unwrap();
        let t = ServiceTime::from(naive);
        assert_eq!(t.format_with_seconds(), "14:03:09");
        assert_eq!(t.to_naive_time(), Some(naive));
        assert_eq!(ServiceTime::from_hms(26, 0, 0).to_naive_time(), None);
    }

    #[test]
    fn test_compare_time_strings() {
        assert_eq!(compare_time_strings(Some("07:45"), Some("08:00")), Some(Ordering::Less));
        // Unpadded hours still compare by time
        assert_eq!(compare_time_strings(Some("9:00"), Some("10:00")), Some(Ordering::Less));
        // Unparseable falls back to text
        assert_eq!(compare_time_strings(Some("soon"), Some("later")), Some(Ordering::Greater));
        assert_eq!(compare_time_strings(None, None), Some(Ordering::Equal));
        assert_eq!(compare_time_strings(Some("08:00"), None), None);
        assert_eq!(compare_time_strings(None, Some("08:00")), None);
    }
}
