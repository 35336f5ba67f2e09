//! Week-window computation for the medication calendar.
//!
//! A window is the 7 consecutive dates starting from the Monday of the
//! current real-world week, shifted by a signed number of whole weeks.
//! The window is derived, never stored; callers recompute it on every
//! offset change.
//!
//! The calendar is Monday-first (column 0 = Monday .. 6 = Sunday),
//! which does NOT coincide with Sunday-first day-of-week numbering.
//! Always go through [`calendar_column`] / [`column_weekday`] instead
//! of assuming the two agree.

use crate::types::{DayCell, Locale};
use chrono::{Datelike, Duration, Local, NaiveDate, Weekday};

/// The 7 dates of the current week shifted by `offset` whole weeks
/// (positive = future, negative = past). Offset 0 always contains
/// today.
pub fn week_dates(offset: i64, locale: Locale) -> Vec<DayCell> {
    week_dates_from(Local::now().date_naive(), offset, locale)
}

/// Pure form of [`week_dates`] for a given "today", so tests can pin
/// month and year boundaries.
pub fn week_dates_from(today: NaiveDate, offset: i64, locale: Locale) -> Vec<DayCell> {
    let monday = week_start(today, offset);

    (0..7)
        .map(|i| {
            let date = monday + Duration::days(i);
            DayCell {
                day_number: date.day(),
                month_label: month_abbrev(locale, date.month()),
            }
        })
        .collect()
}

/// Monday of the week containing `today`, shifted by `offset` weeks.
fn week_start(today: NaiveDate, offset: i64) -> NaiveDate {
    let back = i64::from(calendar_column(today.weekday()));
    today - Duration::days(back) + Duration::weeks(offset)
}

/// Calendar column (0 = Monday .. 6 = Sunday) for a real-world weekday.
pub fn calendar_column(day: Weekday) -> u8 {
    day.num_days_from_monday() as u8
}

/// Real-world weekday for a calendar column; `None` past column 6.
pub fn column_weekday(column: u8) -> Option<Weekday> {
    Some(match column {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        6 => Weekday::Sun,
        _ => return None,
    })
}

/// Abbreviated month label for `month` (1-12) in the given locale.
pub fn month_abbrev(locale: Locale, month: u32) -> &'static str {
    const EN: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    const AR: [&str; 12] = [
        "يناير",
        "فبراير",
        "مارس",
        "أبريل",
        "مايو",
        "يونيو",
        "يوليو",
        "أغسطس",
        "سبتمبر",
        "أكتوبر",
        "نوفمبر",
        "ديسمبر",
    ];

    let idx = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::En => EN[idx],
        Locale::Ar => AR[idx],
    }
}
