use chrono::{Months, NaiveDate};

/// Premier jour du mois et nombre de jours, ou `None` si le mois est invalide.
pub(crate) fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, u32)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    let days = u32::try_from(next.signed_duration_since(first).num_days()).ok()?;
    Some((first, days))
}
