//! Date helper functions
//!
//! Every date shown on a page goes through [`DateFormatter`], whichever code
//! path produced the post (seed page, accumulated page or detail view).

use chrono::{DateTime, Datelike, FixedOffset, TimeZone};
use chrono_tz::Tz;

use crate::error::{BlogError, Result};

const MONTHS_PT: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parse an upstream timestamp such as `2021-03-15T19:25:28+0000`
pub fn parse_publication_date(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%z")
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .map_err(|_| BlogError::InvalidDate(raw.to_string()))
}

/// Month abbreviations for a display language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLocale {
    PtBr,
    En,
}

impl DateLocale {
    /// Pick a locale from a language tag; anything not Portuguese falls back to English
    pub fn from_language(language: &str) -> Self {
        let lang = language.to_ascii_lowercase();
        if lang == "pt" || lang.starts_with("pt-") || lang.starts_with("pt_") {
            DateLocale::PtBr
        } else {
            DateLocale::En
        }
    }

    fn month_abbrev(self, month0: u32) -> &'static str {
        let table = match self {
            DateLocale::PtBr => &MONTHS_PT,
            DateLocale::En => &MONTHS_EN,
        };
        table[month0 as usize % 12]
    }
}

/// Formats publication dates as `DD mon YYYY` in the site's timezone
#[derive(Debug, Clone, Copy)]
pub struct DateFormatter {
    locale: DateLocale,
    tz: Tz,
}

impl DateFormatter {
    pub fn new(locale: DateLocale, tz: Tz) -> Self {
        Self { locale, tz }
    }

    /// Day, abbreviated month, year: `15 mar 2021`
    pub fn date<T: TimeZone>(&self, date: &DateTime<T>) -> String {
        let local = date.with_timezone(&self.tz);
        format!(
            "{:02} {} {}",
            local.day(),
            self.locale.month_abbrev(local.month0()),
            local.year()
        )
    }

    /// Hour and minute: `15:00`
    pub fn time<T: TimeZone>(&self, date: &DateTime<T>) -> String {
        date.with_timezone(&self.tz).format("%H:%M").to_string()
    }
}

impl Default for DateFormatter {
    fn default() -> Self {
        Self::new(DateLocale::PtBr, chrono_tz::America::Sao_Paulo)
    }
}
