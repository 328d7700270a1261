//! # Birth Date / Sex Segment Encoder
//!
//! Produces the 5-character middle of the code (positions 7–11): two year
//! digits, one month letter, two day digits.
//!
//! The month table is a national-standard fixed mapping and is
//! deliberately irregular — it skips F, G, I, N, O and Q so a month
//! letter can never be confused with other segments. It must never be
//! re-derived alphabetically.

use chrono::{Datelike, NaiveDate};

use crate::person::Sex;

/// Month letters indexed by `month - 1`. January is `A`, December is `T`.
pub const MONTH_CODES: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];

/// Last two digits of the birth year, zero-padded (`2005` → `"05"`).
pub fn year_code(date: NaiveDate) -> String {
    format!("{:02}", date.year().rem_euclid(100))
}

/// The fixed letter for the birth month.
pub fn month_code(date: NaiveDate) -> char {
    MONTH_CODES[date.month0() as usize]
}

/// Day-of-month with the sex offset applied, zero-padded to two digits.
///
/// Female days are offset by +40, so the two encodings can never collide:
/// male days span 01–31, female days 41–71.
pub fn day_sex_code(date: NaiveDate, sex: Sex) -> String {
    format!("{:02}", date.day() + sex.day_offset())
}

/// The full 5-character date segment: year + month + day/sex.
pub fn birth_date_segment(date: NaiveDate, sex: Sex) -> String {
    let mut segment = String::with_capacity(5);
    segment.push_str(&year_code(date));
    segment.push(month_code(date));
    segment.push_str(&day_sex_code(date, sex));
    segment
}
