//! Calendar readout for simulated time, measured from the J2000 epoch.

use orrery_engine::core::constants::DAY;

pub fn seconds_to_days(seconds: f64) -> f64 {
    seconds / DAY
}

/// Days from 1970-01-01 to 2000-01-01.
const UNIX_DAYS_AT_J2000: i64 = 10_957;

/// Convert days from J2000 to (year, month, day) in the proleptic
/// Gregorian calendar. Days roll over at midnight, half a day after the
/// noon epoch.
pub fn days_to_date(days_from_j2000: f64) -> (i32, u32, u32) {
    let civil = (days_from_j2000 + 0.5).floor() as i64 + UNIX_DAYS_AT_J2000 + 719_468;
    let era = civil.div_euclid(146_097);
    let day_of_era = civil.rem_euclid(146_097);
    let year_of_era = (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    // March-based month index: 0 = March, 11 = February.
    let mp = (5 * day_of_year + 2) / 153;

    let day = (day_of_year - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = (year_of_era + era * 400 + i64::from(month <= 2)) as i32;

    (year, month, day)
}

/// `YYYY-MM-DD` for the UI.
pub fn format_date(days_from_j2000: f64) -> String {
    let (year, month, day) = days_to_date(days_from_j2000);
    format!("{:04}-{:02}-{:02}", year, month, day)
}
