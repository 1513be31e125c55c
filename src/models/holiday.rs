//! Static statutory-holiday table.
//!
//! The generator's only holiday awareness: the seven Chinese statutory
//! holidays for 2023–2026 as fixed date ranges. Nothing is fetched
//! dynamically; years outside the table simply have no holidays.

use chrono::{Datelike, NaiveDate};

/// Names of the statutory holidays staff may choose to avoid.
pub const HOLIDAY_NAMES: [&str; 7] = [
    "元旦",
    "春节",
    "清明节",
    "劳动节",
    "端午节",
    "中秋节",
    "国庆节",
];

/// (name, first day, last day) — both ends inclusive, as (y, m, d).
const HOLIDAY_TABLE: &[(&str, (i32, u32, u32), (i32, u32, u32))] = &[
    // 2023
    ("元旦", (2023, 1, 1), (2023, 1, 2)),
    ("春节", (2023, 1, 21), (2023, 1, 27)),
    ("清明节", (2023, 4, 5), (2023, 4, 5)),
    ("劳动节", (2023, 4, 29), (2023, 5, 3)),
    ("端午节", (2023, 6, 22), (2023, 6, 24)),
    ("中秋节", (2023, 9, 29), (2023, 9, 30)),
    ("国庆节", (2023, 10, 1), (2023, 10, 6)),
    // 2024
    ("元旦", (2024, 1, 1), (2024, 1, 1)),
    ("春节", (2024, 2, 10), (2024, 2, 17)),
    ("清明节", (2024, 4, 4), (2024, 4, 6)),
    ("劳动节", (2024, 5, 1), (2024, 5, 5)),
    ("端午节", (2024, 6, 10), (2024, 6, 10)),
    ("中秋节", (2024, 9, 15), (2024, 9, 17)),
    ("国庆节", (2024, 10, 1), (2024, 10, 7)),
    // 2025
    ("元旦", (2025, 1, 1), (2025, 1, 1)),
    ("春节", (2025, 1, 28), (2025, 2, 4)),
    ("清明节", (2025, 4, 4), (2025, 4, 6)),
    ("劳动节", (2025, 5, 1), (2025, 5, 5)),
    ("端午节", (2025, 5, 31), (2025, 6, 2)),
    ("国庆节", (2025, 10, 1), (2025, 10, 8)),
    ("中秋节", (2025, 10, 6), (2025, 10, 6)),
    // 2026
    ("元旦", (2026, 1, 1), (2026, 1, 1)),
    ("春节", (2026, 2, 16), (2026, 2, 22)),
    ("清明节", (2026, 4, 4), (2026, 4, 6)),
    ("劳动节", (2026, 5, 1), (2026, 5, 5)),
    ("端午节", (2026, 6, 19), (2026, 6, 19)),
    ("中秋节", (2026, 9, 25), (2026, 9, 25)),
    ("国庆节", (2026, 10, 1), (2026, 10, 7)),
];

/// Returns the statutory holiday a date falls on, if any.
pub fn holiday_on(date: NaiveDate) -> Option<&'static str> {
    let key = (date.year(), date.month(), date.day());
    HOLIDAY_TABLE
        .iter()
        .find(|&&(_, start, end)| start <= key && key <= end)
        .map(|&(name, _, _)| name)
}
