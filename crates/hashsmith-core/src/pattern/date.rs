use std::ops::RangeInclusive;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::generate::Candidates;

/// Birth years used when a date pattern does not name its own.
pub const COMMON_BIRTH_YEARS: RangeInclusive<i32> = 1980..=2004;

/// Years a date node can render; anything else contributes nothing.
pub const SUPPORTED_YEARS: RangeInclusive<i32> = 1..=9999;

/// Formats used when a date pattern does not name its own.
pub const DEFAULT_DATE_FORMATS: [DateFormat; 4] = [
    DateFormat::MonthDay,
    DateFormat::ShortYearMonthDay,
    DateFormat::YearMonthDay,
    DateFormat::DayMonth,
];

/// Output layout for a calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DateFormat {
    #[serde(rename = "MMDD")]
    MonthDay,
    #[serde(rename = "YYMMDD")]
    ShortYearMonthDay,
    #[serde(rename = "YYYYMMDD")]
    YearMonthDay,
    #[serde(rename = "DDMM")]
    DayMonth,
}

impl DateFormat {
    /// Strict lookup by template name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "MMDD" => Some(DateFormat::MonthDay),
            "YYMMDD" => Some(DateFormat::ShortYearMonthDay),
            "YYYYMMDD" => Some(DateFormat::YearMonthDay),
            "DDMM" => Some(DateFormat::DayMonth),
            _ => None,
        }
    }

    /// Lookup that falls back to `YYYYMMDD` for unknown names.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(DateFormat::YearMonthDay)
    }

    pub fn name(&self) -> &'static str {
        match self {
            DateFormat::MonthDay => "MMDD",
            DateFormat::ShortYearMonthDay => "YYMMDD",
            DateFormat::YearMonthDay => "YYYYMMDD",
            DateFormat::DayMonth => "DDMM",
        }
    }

    pub fn format(&self, date: NaiveDate) -> String {
        let layout = match self {
            DateFormat::MonthDay => "%m%d",
            DateFormat::ShortYearMonthDay => "%y%m%d",
            DateFormat::YearMonthDay => "%Y%m%d",
            DateFormat::DayMonth => "%d%m",
        };
        date.format(layout).to_string()
    }
}

/// Calendar dates across a list of years, rendered in each format.
#[derive(Debug, Clone)]
pub struct DatePattern {
    years: Vec<i32>,
    formats: Vec<DateFormat>,
    name: Option<String>,
}

impl DatePattern {
    pub fn new<Y, F>(years: Y, formats: F) -> Self
    where
        Y: IntoIterator<Item = i32>,
        F: IntoIterator<Item = DateFormat>,
    {
        Self {
            years: years.into_iter().collect(),
            formats: formats.into_iter().collect(),
            name: None,
        }
    }

    pub fn common() -> Self {
        Self::new(COMMON_BIRTH_YEARS, DEFAULT_DATE_FORMATS)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Years in order, then months, then days; invalid dates are skipped,
    /// as are years outside [`SUPPORTED_YEARS`].
    pub fn raw_sequence(&self) -> Candidates<'_> {
        let years = self
            .years
            .iter()
            .copied()
            .filter(|year| SUPPORTED_YEARS.contains(year));
        let dates = years.flat_map(|year| {
            (1..=12u32).flat_map(move |month| {
                (1..=31u32).filter_map(move |day| NaiveDate::from_ymd_opt(year, month, day))
            })
        });
        Box::new(dates.flat_map(move |date| self.formats.iter().map(move |format| format.format(date))))
    }

    /// `years × 366 × formats`, independent of how many dates are valid.
    pub fn estimate_count(&self) -> u128 {
        (self.years.len() as u128)
            .saturating_mul(366)
            .saturating_mul(self.formats.len() as u128)
    }
}
