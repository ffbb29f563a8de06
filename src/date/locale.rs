use chrono::Locale;
use log::warn;

/// Unit used by the relative-time formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
}

impl RelativeUnit {
    const fn index(self) -> usize {
        match self {
            Self::Year => 0,
            Self::Month => 1,
            Self::Day => 2,
            Self::Hour => 3,
            Self::Minute => 4,
        }
    }
}

/// Narrow-style patterns for one language. `{0}` is replaced by the magnitude.
struct LocaleData {
    language: &'static str,
    chrono_locale: Locale,
    past: [&'static str; 5],
    future: [&'static str; 5],
    /// Duration units in order: days, hours, minutes, seconds
    duration_units: [&'static str; 4],
    duration_separator: &'static str,
    short_datetime: &'static str,
}

const DEFAULT_LANGUAGE: &str = "en";

static LOCALES: &[LocaleData] = &[
    LocaleData {
        language: "en",
        chrono_locale: Locale::en_US,
        past: ["{0}y ago", "{0}mo ago", "{0}d ago", "{0}h ago", "{0}m ago"],
        future: ["in {0}y", "in {0}mo", "in {0}d", "in {0}h", "in {0}m"],
        duration_units: ["{0}d", "{0}h", "{0}m", "{0}s"],
        duration_separator: " ",
        short_datetime: "%-m/%-d/%y, %-I:%M %p",
    },
    LocaleData {
        language: "de",
        chrono_locale: Locale::de_DE,
        past: ["vor {0} J.", "vor {0} M.", "vor {0} T.", "vor {0} Std.", "vor {0} Min."],
        future: ["in {0} J.", "in {0} M.", "in {0} T.", "in {0} Std.", "in {0} Min."],
        duration_units: ["{0} T", "{0} Std.", "{0} Min.", "{0} Sek."],
        duration_separator: ", ",
        short_datetime: "%d.%m.%y, %H:%M",
    },
    LocaleData {
        language: "fr",
        chrono_locale: Locale::fr_FR,
        past: ["il y a {0} a", "il y a {0} m.", "il y a {0} j", "il y a {0} h", "il y a {0} min"],
        future: ["dans {0} a", "dans {0} m.", "dans {0} j", "dans {0} h", "dans {0} min"],
        duration_units: ["{0}j", "{0}h", "{0}min", "{0}s"],
        duration_separator: " ",
        short_datetime: "%d/%m/%Y %H:%M",
    },
    LocaleData {
        language: "es",
        chrono_locale: Locale::es_ES,
        past: ["hace {0} a", "hace {0} m", "hace {0} d", "hace {0} h", "hace {0} min"],
        future: ["dentro de {0} a", "dentro de {0} m", "dentro de {0} d", "dentro de {0} h", "dentro de {0} min"],
        duration_units: ["{0}d", "{0}h", "{0}min", "{0}s"],
        duration_separator: " ",
        short_datetime: "%-d/%-m/%y, %-H:%M",
    },
    LocaleData {
        language: "nl",
        chrono_locale: Locale::nl_NL,
        past: ["{0} jr geleden", "{0} mnd geleden", "{0} dag geleden", "{0} uur geleden", "{0} min geleden"],
        future: ["over {0} jr", "over {0} mnd", "over {0} dag", "over {0} uur", "over {0} min"],
        duration_units: ["{0}d", "{0}u", "{0}m", "{0}s"],
        duration_separator: " ",
        short_datetime: "%d-%m-%Y %H:%M",
    },
    LocaleData {
        language: "pt",
        chrono_locale: Locale::pt_BR,
        past: ["há {0} a", "há {0} m", "há {0} d", "há {0} h", "há {0} min"],
        future: ["em {0} a", "em {0} m", "em {0} d", "em {0} h", "em {0} min"],
        duration_units: ["{0}d", "{0}h", "{0}min", "{0}s"],
        duration_separator: " ",
        short_datetime: "%d/%m/%Y, %H:%M",
    },
    LocaleData {
        language: "it",
        chrono_locale: Locale::it_IT,
        past: ["{0} a fa", "{0} mesi fa", "{0} g fa", "{0} h fa", "{0} min fa"],
        future: ["tra {0} a", "tra {0} mesi", "tra {0} g", "tra {0} h", "tra {0} min"],
        duration_units: ["{0}g", "{0}h", "{0}min", "{0}s"],
        duration_separator: " ",
        short_datetime: "%d/%m/%y, %H:%M",
    },
];

/// Resolved locale: the requested tag plus the narrow patterns used for it.
#[derive(Clone)]
pub struct DateLocale {
    tag: String,
    data: &'static LocaleData,
    chrono_locale: Locale,
}

impl std::fmt::Debug for DateLocale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DateLocale")
            .field("tag", &self.tag)
            .field("language", &self.data.language)
            .field("chrono_locale", &self.chrono_locale)
            .finish()
    }
}

impl DateLocale {
    /// Resolves a tag such as `en`, `de-AT` or `pt_PT`.
    ///
    /// Falls back to the base language and then to English. A region that
    /// chrono knows about (e.g. `pt_PT`) refines the date/time names.
    pub fn resolve(tag: &str) -> Self {
        let normalized = tag.trim().replace('-', "_");
        let mut parts = normalized.split('_');
        let language = parts.next().unwrap_or_default().to_lowercase();
        let region = parts.next().map(str::to_uppercase);

        let data = LOCALES
            .iter()
            .find(|l| l.language == language)
            .unwrap_or_else(|| {
                warn!(
                    "Unsupported locale '{}', falling back to '{}' (supported: {})",
                    tag,
                    DEFAULT_LANGUAGE,
                    supported_languages().collect::<Vec<_>>().join(", ")
                );
                default_data()
            });

        let chrono_locale = region
            .and_then(|region| {
                Locale::try_from(format!("{}_{region}", data.language).as_str()).ok()
            })
            .unwrap_or(data.chrono_locale);

        Self {
            tag: tag.trim().to_string(),
            data,
            chrono_locale,
        }
    }

    /// The tag this locale was requested with.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The language whose patterns are in use after fallback.
    pub fn language(&self) -> &'static str {
        self.data.language
    }

    pub fn chrono_locale(&self) -> Locale {
        self.chrono_locale
    }

    pub fn short_datetime_pattern(&self) -> &'static str {
        self.data.short_datetime
    }

    /// Formats a signed magnitude; negative values are in the past.
    pub fn format_relative(&self, value: i64, unit: RelativeUnit) -> String {
        let patterns = if value < 0 {
            &self.data.past
        } else {
            &self.data.future
        };
        apply(patterns[unit.index()], value.unsigned_abs())
    }

    /// Formats days/hours/minutes/seconds, skipping zero units.
    pub fn format_duration(&self, days: u64, hours: u64, minutes: u64, seconds: u64) -> String {
        let parts: Vec<String> = [days, hours, minutes, seconds]
            .into_iter()
            .zip(self.data.duration_units)
            .filter(|(value, _)| *value > 0)
            .map(|(value, pattern)| apply(pattern, value))
            .collect();

        if parts.is_empty() {
            return apply(self.data.duration_units[3], 0);
        }

        parts.join(self.data.duration_separator)
    }
}

impl Default for DateLocale {
    fn default() -> Self {
        Self::resolve(DEFAULT_LANGUAGE)
    }
}

impl PartialEq for DateLocale {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && self.data.language == other.data.language
    }
}

fn default_data() -> &'static LocaleData {
    &LOCALES[0]
}

fn apply(pattern: &str, value: u64) -> String {
    pattern.replace("{0}", &value.to_string())
}

/// Languages with built-in patterns.
pub fn supported_languages() -> impl Iterator<Item = &'static str> {
    LOCALES.iter().map(|l| l.language)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_exact_language() {
        let locale = DateLocale::resolve("de");
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.tag(), "de");
        assert_eq!(locale.chrono_locale(), Locale::de_DE);
    }

    #[test]
    fn test_resolve_region_falls_back_to_language() {
        let locale = DateLocale::resolve("de-AT");
        assert_eq!(locale.language(), "de");
        assert_eq!(locale.chrono_locale(), Locale::de_AT);
    }

    #[test]
    fn test_resolve_region_refines_chrono_locale() {
        let locale = DateLocale::resolve("pt_PT");
        assert_eq!(locale.language(), "pt");
        assert_eq!(locale.chrono_locale(), Locale::pt_PT);
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_english() {
        let locale = DateLocale::resolve("xx-YY");
        assert_eq!(locale.language(), "en");
        assert_eq!(locale.tag(), "xx-YY");
        assert_eq!(locale.chrono_locale(), Locale::en_US);
    }

    #[test]
    fn test_format_relative_past_and_future() {
        let en = DateLocale::resolve("en");
        assert_eq!(en.format_relative(-2, RelativeUnit::Year), "2y ago");
        assert_eq!(en.format_relative(-5, RelativeUnit::Minute), "5m ago");
        assert_eq!(en.format_relative(3, RelativeUnit::Day), "in 3d");

        let de = DateLocale::resolve("de");
        assert_eq!(de.format_relative(-4, RelativeUnit::Hour), "vor 4 Std.");
    }

    #[test]
    fn test_format_duration_skips_zero_units() {
        let en = DateLocale::resolve("en");
        assert_eq!(en.format_duration(37, 7, 1, 51), "37d 7h 1m 51s");
        assert_eq!(en.format_duration(0, 2, 0, 5), "2h 5s");
        assert_eq!(en.format_duration(0, 0, 0, 0), "0s");

        let de = DateLocale::resolve("de");
        assert_eq!(de.format_duration(1, 0, 3, 0), "1 T, 3 Min.");
    }

    #[test]
    fn test_supported_languages_are_unique() {
        let mut languages: Vec<_> = supported_languages().collect();
        let total = languages.len();
        languages.sort_unstable();
        languages.dedup();
        assert_eq!(languages.len(), total);
        assert!(languages.contains(&"en"));
    }
}
