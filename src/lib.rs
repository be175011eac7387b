#![forbid(unsafe_code)]
//! Caregiver roster — planning mensuel des aidants, sans base de données.
//!
//! - Disponibilités par clé de jour (1..=7) et créneau (matin / après-midi).
//! - Génération gloutonne : préférés d'abord, tirage aléatoire injectable.
//! - Cumul des heures et clôture de période de paie.
//! - Calendrier dim..sam et export HTML ; stockage JSON/CSV.

pub mod availability;
pub mod calendar;
pub mod html;
pub mod io;
pub mod model;
pub mod pay;
pub mod scheduler;
pub mod storage;

#[cfg(test)]
mod testing;

pub use availability::{Availability, AvailabilityError, AvailabilityStatus, WeekdayKey};
pub use calendar::{CalendarCell, CalendarGrid};
pub use html::{render_html, write_html};
pub use model::{Caregiver, CaregiverId, Roster, Shift, DEFAULT_PAY_RATE, SHIFT_HOURS};
pub use pay::{PayLine, PayPeriod, PayReport};
pub use scheduler::{
    DaySchedule, FirstPicker, GenerateOptions, Picker, RandomPicker, SchedError, Schedule,
    Scheduler,
};
pub use storage::{JsonStorage, Storage};
