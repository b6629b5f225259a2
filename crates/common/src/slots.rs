//! Slot candidacy for the booking form.
//!
//! The clinic takes walk-in services on Wednesdays; staff can open extra
//! days by adding schedule entries. Everything here is pure over a base
//! date so the 56-day window is re-derivable and testable.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;

/// Number of calendar days offered on the booking form.
pub const BOOKING_WINDOW_DAYS: u64 = 56;

/// Times offered on a selectable day with no admin-defined entries.
pub const DEFAULT_TIMES: &[&str] = &[
    "09:00 AM", "10:00 AM", "11:00 AM", "01:00 PM", "02:00 PM", "03:00 PM", "04:00 PM",
];

/// An admin-defined (date, time) opening, as stored in `schedules`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSlot {
    pub date: String,
    pub time: String,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DayOption {
    /// `YYYY-MM-DD`
    pub date: String,
    /// e.g. `"Wednesday, Mar 19"`
    pub label: String,
    pub selectable: bool,
    /// Open because staff added it, not because it is a Wednesday.
    pub admin_added: bool,
}

/// The candidate days starting at `from`, one entry per calendar day.
/// A day is selectable iff it is a Wednesday or an admin slot exists for it.
pub fn candidate_days(from: NaiveDate, admin_slots: &[AdminSlot]) -> Vec<DayOption> {
    (0..BOOKING_WINDOW_DAYS)
        .filter_map(|i| from.checked_add_days(Days::new(i)))
        .map(|date| {
            let date_str = date.format("%Y-%m-%d").to_string();
            let is_wednesday = date.weekday() == Weekday::Wed;
            let has_admin_slot = admin_slots.iter().any(|s| s.date == date_str);
            DayOption {
                label: format!("{}, {}", date.format("%A"), date.format("%b %-d")),
                date: date_str,
                selectable: is_wednesday || has_admin_slot,
                admin_added: has_admin_slot && !is_wednesday,
            }
        })
        .collect()
}

/// Times offered for one selected date. Admin-defined times fully override
/// the defaults; they are never merged.
pub fn times_for_date(date: &str, admin_slots: &[AdminSlot]) -> Vec<String> {
    let admin_times: Vec<String> = admin_slots
        .iter()
        .filter(|s| s.date == date)
        .map(|s| s.time.clone())
        .collect();
    if !admin_times.is_empty() {
        return admin_times;
    }
    DEFAULT_TIMES.iter().map(|t| t.to_string()).collect()
}

/// Whether a (date, time) pair is actually offered: the date parses, is a
/// Wednesday or has an admin entry, and the time is one listed for that
/// date. Booking and reschedule refuse anything else.
pub fn slot_is_open(date: &str, time: &str, admin_slots: &[AdminSlot]) -> bool {
    let Ok(parsed) = NaiveDate::parse_from_str(date, "%Y-%m-%d") else {
        return false;
    };
    let selectable =
        parsed.weekday() == Weekday::Wed || admin_slots.iter().any(|s| s.date == date);
    selectable && times_for_date(date, admin_slots).iter().any(|t| t == time)
}

/// The combined display/uniqueness key for an appointment.
pub fn date_time_key(date: &str, time: &str) -> String {
    format!("{date} {time}")
}

/// The next Wednesday strictly after `today`, used to prefill the admin
/// schedule form.
pub fn next_wednesday(today: NaiveDate) -> NaiveDate {
    let days_ahead = (Weekday::Wed.num_days_from_sunday() + 7
        - today.weekday().num_days_from_sunday())
        % 7;
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    today + Days::new(days_ahead as u64)
}
