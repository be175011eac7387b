mod generate;
mod picker;
mod types;
pub(crate) mod util;

pub use picker::{FirstPicker, Picker, RandomPicker};
pub use types::{DaySchedule, GenerateOptions, SchedError, Schedule};

use crate::availability::{AvailabilityStatus, WeekdayKey};
use crate::model::{Caregiver, CaregiverId, Roster, Shift};
use crate::pay::{self, PayReport};

/// Scheduler : possède le roster (disponibilités et heures cumulées)
#[derive(Debug, Default)]
pub struct Scheduler {
    roster: Roster,
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            roster: Roster::default(),
        }
    }

    pub fn from_roster(roster: Roster) -> Self {
        Self { roster }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
    pub fn roster_mut(&mut self) -> &mut Roster {
        &mut self.roster
    }
    pub fn into_roster(self) -> Roster {
        self.roster
    }

    pub fn add_caregivers(&mut self, caregivers: Vec<Caregiver>) {
        self.roster.caregivers.extend(caregivers);
    }

    /// Fixe la disponibilité d'un aidant pour une clé de jour (1..=7) et un créneau.
    pub fn set_status(
        &mut self,
        caregiver: &CaregiverId,
        day: u32,
        shift: Shift,
        status: AvailabilityStatus,
    ) -> Result<(), SchedError> {
        let key = WeekdayKey::new(day)?;
        let c = self
            .roster
            .find_mut_by_id(caregiver)
            .ok_or_else(|| SchedError::UnknownCaregiver(caregiver.as_str().to_string()))?;
        c.availability.set(key, shift, status);
        Ok(())
    }

    pub fn get_status(
        &self,
        caregiver: &CaregiverId,
        day: u32,
        shift: Shift,
    ) -> Result<AvailabilityStatus, SchedError> {
        let key = WeekdayKey::new(day)?;
        let c = self
            .roster
            .find_by_id(caregiver)
            .ok_or_else(|| SchedError::UnknownCaregiver(caregiver.as_str().to_string()))?;
        Ok(c.availability.get(key, shift))
    }

    /// Génère le planning du mois et crédite les heures des aidants retenus.
    pub fn generate<P: Picker + ?Sized>(
        &mut self,
        year: i32,
        month: u32,
        picker: &mut P,
    ) -> Result<Schedule, SchedError> {
        self.generate_with(year, month, picker, GenerateOptions::default())
    }

    pub fn generate_with<P: Picker + ?Sized>(
        &mut self,
        year: i32,
        month: u32,
        picker: &mut P,
        opts: GenerateOptions,
    ) -> Result<Schedule, SchedError> {
        generate::generate(self, year, month, picker, opts)
    }

    /// Aperçu de la paie sans toucher aux heures.
    pub fn pending_pay(&self) -> PayReport {
        pay::pending(&self.roster)
    }

    /// Clôt la période de paie : renvoie le relevé puis remet les heures à zéro.
    pub fn close_period(&mut self) -> PayReport {
        pay::close_period(&mut self.roster)
    }
}
