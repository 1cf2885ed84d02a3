// src/normalize/period.rs
use super::NormalizeError;
use chrono::NaiveDate;

/// A parsed LAUS reporting period. `month_name` keeps the abbreviation
/// exactly as printed; `date` pins the period to the first of the month.
#[derive(Debug, Clone, PartialEq)]
pub struct Period {
    pub month_name: String,
    pub month: u32,
    pub year: i32,
    pub date: NaiveDate,
}

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Suffix marking preliminary figures, e.g. `"Dec-23(p)"`. Stripped before
/// parsing and absent from all output.
const PROVISIONAL_MARKER: &str = "(p)";

/// Parse a period like `"Jan-24"` or `"Dec-23(p)"`.
pub fn parse_period(raw: &str) -> Result<Period, NormalizeError> {
    let err = || NormalizeError::UnparsablePeriod {
        raw: raw.trim().to_string(),
    };

    let cleaned = raw.trim().replace(PROVISIONAL_MARKER, "");
    let (name, year_part) = cleaned.split_once('-').ok_or_else(err)?;
    let name = name.trim();

    let month = MONTH_ABBREVS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))
        .ok_or_else(err)? as u32
        + 1;

    let two_digit: i32 = year_part.trim().parse().map_err(|_| err())?;
    if !(0..=99).contains(&two_digit) {
        return Err(err());
    }
    // strptime's %y pivot: 00-68 lands in the 2000s, 69-99 in the 1900s.
    let year = if two_digit <= 68 {
        2000 + two_digit
    } else {
        1900 + two_digit
    };

    let date = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(err)?;

    Ok(Period {
        month_name: name.to_string(),
        month,
        year,
        date,
    })
}
