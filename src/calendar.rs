//! Holiday lookup collaborator
//!
//! The engine consumes holidays through the [`HolidayProvider`] trait; the
//! built-in calendar covers Russian national holidays on their fixed dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Category of a holiday, mapped to an impact magnitude by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HolidayKind {
    /// Peak shopping holidays (New Year period, Women's Day)
    Major,
    /// Ordinary public holidays
    Public,
    /// Patriotic observances
    Patriotic,
}

/// A holiday falling on a specific date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub kind: HolidayKind,
    pub name: &'static str,
}

/// Source of holiday information for forecast dates
pub trait HolidayProvider {
    /// The holiday falling on `date`, if any
    fn holiday(&self, date: NaiveDate) -> Option<Holiday>;

    /// Whether the day after `date` is a major holiday
    fn precedes_major_holiday(&self, date: NaiveDate) -> bool {
        date.succ_opt()
            .and_then(|next| self.holiday(next))
            .map(|h| h.kind == HolidayKind::Major)
            .unwrap_or(false)
    }
}

/// Fixed-date Russian national holiday calendar
#[derive(Debug, Clone, Default)]
pub struct RussianHolidayCalendar;

/// (month, day, kind, name)
const HOLIDAYS: &[(u32, u32, HolidayKind, &str)] = &[
    (1, 1, HolidayKind::Major, "New Year's Day"),
    (1, 2, HolidayKind::Major, "New Year Holidays"),
    (1, 3, HolidayKind::Major, "New Year Holidays"),
    (1, 4, HolidayKind::Major, "New Year Holidays"),
    (1, 5, HolidayKind::Major, "New Year Holidays"),
    (1, 6, HolidayKind::Major, "New Year Holidays"),
    (1, 7, HolidayKind::Major, "Orthodox Christmas"),
    (1, 8, HolidayKind::Major, "New Year Holidays"),
    (2, 23, HolidayKind::Patriotic, "Defender of the Fatherland Day"),
    (3, 8, HolidayKind::Major, "International Women's Day"),
    (5, 1, HolidayKind::Public, "Spring and Labour Day"),
    (5, 9, HolidayKind::Patriotic, "Victory Day"),
    (6, 12, HolidayKind::Public, "Russia Day"),
    (11, 4, HolidayKind::Public, "Unity Day"),
];

impl HolidayProvider for RussianHolidayCalendar {
    fn holiday(&self, date: NaiveDate) -> Option<Holiday> {
        HOLIDAYS
            .iter()
            .find(|(month, day, _, _)| *month == date.month() && *day == date.day())
            .map(|(_, _, kind, name)| Holiday { kind: *kind, name })
    }
}
