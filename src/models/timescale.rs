//! Time axis model.
//!
//! Maps calendar dates to horizontal pixels. `x = 0` is the anchor date and
//! one day spans `px_per_day` pixels.
//!
//! # Precision
//! Dates resolve to whole days. Fractional pixels appear only through the
//! factor; the engine absorbs the resulting rounding with its pixel
//! tolerance.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::BarPosition;
use crate::config::ConfigError;

/// Calendar anchor plus time-to-pixel factor.
///
/// Deserializing runs the same check as [`TimeScale::new`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawTimeScale")]
pub struct TimeScale {
    /// Date at `x = 0`.
    pub anchor: NaiveDate,
    /// Pixels per day.
    pub px_per_day: f64,
}

#[derive(Deserialize)]
struct RawTimeScale {
    anchor: NaiveDate,
    px_per_day: f64,
}

impl TryFrom<RawTimeScale> for TimeScale {
    type Error = ConfigError;

    fn try_from(raw: RawTimeScale) -> Result<Self, Self::Error> {
        Self::new(raw.anchor, raw.px_per_day)
    }
}

impl TimeScale {
    /// Creates a time scale.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidScale`] if `px_per_day` is not a
    /// finite positive number.
    pub fn new(anchor: NaiveDate, px_per_day: f64) -> Result<Self, ConfigError> {
        if !px_per_day.is_finite() || px_per_day <= 0.0 {
            return Err(ConfigError::InvalidScale(px_per_day));
        }
        Ok(Self { anchor, px_per_day })
    }

    /// Pixel position of a date.
    #[inline]
    pub fn date_to_x(&self, date: NaiveDate) -> f64 {
        (date - self.anchor).num_days() as f64 * self.px_per_day
    }

    /// Date containing pixel `x` (floored to the day).
    pub fn x_to_date(&self, x: f64) -> NaiveDate {
        let days = (x / self.px_per_day).floor() as i64;
        self.anchor + Duration::days(days)
    }

    /// Pixel length of a day count.
    #[inline]
    pub fn days_to_px(&self, days: f64) -> f64 {
        days * self.px_per_day
    }

    /// Day count of a pixel length.
    #[inline]
    pub fn px_to_days(&self, px: f64) -> f64 {
        px / self.px_per_day
    }

    /// Bar for a task starting on `start` and lasting `duration_days`.
    pub fn bar_for(&self, start: NaiveDate, duration_days: f64) -> BarPosition {
        BarPosition::new(self.date_to_x(start), self.days_to_px(duration_days))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_date_to_x() {
        let scale = TimeScale::new(day(1), 20.0).unwrap();
        assert_eq!(scale.date_to_x(day(1)), 0.0);
        assert_eq!(scale.date_to_x(day(6)), 100.0);
        assert_eq!(
            scale.date_to_x(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
            -20.0
        );
    }

    #[test]
    fn test_x_to_date_floors() {
        let scale = TimeScale::new(day(1), 20.0).unwrap();
        assert_eq!(scale.x_to_date(0.0), day(1));
        assert_eq!(scale.x_to_date(39.9), day(2));
        assert_eq!(scale.x_to_date(40.0), day(3));
    }

    #[test]
    fn test_bar_for() {
        let scale = TimeScale::new(day(1), 10.0).unwrap();
        let bar = scale.bar_for(day(3), 4.0);
        assert_eq!(bar.x, 20.0);
        assert_eq!(bar.width, 40.0);
        assert_eq!(scale.px_to_days(bar.width), 4.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let scale: TimeScale =
            serde_json::from_str(r#"{"anchor":"2024-01-01","px_per_day":12.5}"#).unwrap();
        assert_eq!(scale, TimeScale::new(day(1), 12.5).unwrap());

        let err = serde_json::from_str::<TimeScale>(r#"{"anchor":"2024-01-01","px_per_day":0.0}"#)
            .unwrap_err();
        assert!(err.to_string().contains("pixels per day"), "{err}");
    }

    #[test]
    fn test_invalid_scale() {
        assert!(TimeScale::new(day(1), 0.0).is_err());
        assert!(TimeScale::new(day(1), -3.0).is_err());
        assert!(TimeScale::new(day(1), f64::NAN).is_err());
        assert!(TimeScale::new(day(1), f64::INFINITY).is_err());
    }
}
