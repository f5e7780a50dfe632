//! Trading calendar date arithmetic.
//!
//! Weekends are the only non-trading days; exchange holidays are treated as
//! tradable (a deliberate simplification).

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// The next tradable day strictly after `date`: advance one day, then keep
/// advancing while the result lands on a Saturday or Sunday.
pub fn next_trading_day(date: NaiveDate) -> NaiveDate {
    let mut next = date + Days::new(1);
    while is_weekend(next) {
        next = next + Days::new(1);
    }
    next
}

/// Collapse weekend dates onto the preceding Friday; weekdays pass through.
pub fn adjust_weekend_to_friday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date - Days::new(1),
        Weekday::Sun => date - Days::new(2),
        _ => date,
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
