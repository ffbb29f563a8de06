mod clock;
mod duration;
mod locale;

use std::fmt::Display;
use std::sync::Arc;

use chrono::{DateTime, TimeZone};
use log::debug;

use crate::i18n::{translate_or_key, Catalog, Translate, TIME_RECENTLY};

pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::FixedClock;
pub use duration::{duration_as_number, split_duration, DurationBreakdown};
pub use locale::{DateLocale, RelativeUnit};

/// Locale-aware formatter for timestamps and durations.
///
/// Owns the active locale together with the clock used for "time ago"
/// calculations and the provider of translated phrases. Switching the
/// locale rebuilds the narrow relative-time and duration patterns.
#[derive(Clone)]
pub struct DateFormatter {
    locale: DateLocale,
    clock: Arc<dyn Clock>,
    translator: Arc<dyn Translate>,
}

impl DateFormatter {
    /// Creates a formatter for the default `en` locale on the wall clock.
    pub fn new() -> Self {
        Self {
            locale: DateLocale::default(),
            clock: Arc::new(SystemClock),
            translator: Arc::new(Catalog::new()),
        }
    }

    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    #[cfg(test)]
    pub fn with_translator(mut self, translator: impl Translate + 'static) -> Self {
        self.translator = Arc::new(translator);
        self
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.set_locale(locale);
        self
    }

    /// Switches the active locale.
    pub fn set_locale(&mut self, locale: &str) {
        self.locale = DateLocale::resolve(locale);
        debug!(
            "Date locale set to '{}' (patterns: {})",
            self.locale.tag(),
            self.locale.language()
        );
    }

    pub fn locale(&self) -> &DateLocale {
        &self.locale
    }

    pub fn now_millis(&self) -> i64 {
        self.clock.now_millis()
    }

    /// Formats an absolute date/time in the short date + short time style.
    pub fn to_locale_string<Tz>(&self, date: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        date.format_localized(
            self.locale.short_datetime_pattern(),
            self.locale.chrono_locale(),
        )
        .to_string()
    }

    /// Describes how long ago `epoch_ms` was, using the coarsest unit that
    /// fits: years (over 365 days), months (over 30 days), days, hours, then
    /// minutes. Anything under a minute reads as "recently".
    #[allow(clippy::cast_possible_truncation)]
    pub fn time_ago(&self, epoch_ms: i64) -> String {
        let d = split_duration(self.now_millis().saturating_sub(epoch_ms));

        let (magnitude, unit) = if d.total_days > 365.0 {
            ((d.total_days / 365.0).floor(), RelativeUnit::Year)
        } else if d.total_days > 30.0 {
            ((d.total_days / 30.0).floor(), RelativeUnit::Month)
        } else if d.total_days > 1.0 {
            (d.total_days.floor(), RelativeUnit::Day)
        } else if d.total_hours > 1.0 {
            (d.total_hours.floor(), RelativeUnit::Hour)
        } else if d.total_minutes > 1.0 {
            (d.total_minutes.floor(), RelativeUnit::Minute)
        } else {
            return translate_or_key(
                self.translator.as_ref(),
                self.locale.language(),
                TIME_RECENTLY,
            );
        };

        self.locale.format_relative(-(magnitude as i64), unit)
    }

    /// Narrow rendering of the days/hours/minutes/seconds breakdown.
    pub fn pretty_duration(&self, duration_ms: i64) -> String {
        let d = split_duration(duration_ms);
        self.locale
            .format_duration(d.days, d.hours, d.minutes, d.seconds)
    }

    /// Clock-style rendering, see [`duration_as_number`].
    pub fn duration_as_number(&self, duration_ms: i64) -> String {
        duration_as_number(duration_ms)
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for DateFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateFormatter")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}
