use crate::availability::AvailabilityError;
use crate::model::{CaregiverId, Shift, SHIFT_HOURS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy)]
pub struct GenerateOptions {
    /// Heures créditées par créneau attribué.
    pub shift_hours: u32,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            shift_hours: SHIFT_HOURS,
        }
    }
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },
    #[error("unknown caregiver: {0}")]
    UnknownCaregiver(String),
    #[error("day {day} is outside of {year}-{month}")]
    DayOutOfRange { year: i32, month: u32, day: u32 },
    #[error("picker returned index {index} for a pool of {len}")]
    PickOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Availability(#[from] AvailabilityError),
}

/// Attributions d'un jour : au plus un aidant par créneau.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub day: u32,
    slots: [Option<CaregiverId>; 2],
}

impl DaySchedule {
    pub(crate) fn new(day: u32) -> Self {
        Self {
            day,
            slots: [None, None],
        }
    }

    pub fn get(&self, shift: Shift) -> Option<&CaregiverId> {
        self.slots[shift.index()].as_ref()
    }

    pub(crate) fn set(&mut self, shift: Shift, caregiver: Option<CaregiverId>) {
        self.slots[shift.index()] = caregiver;
    }

    /// Paires (créneau, attribution) dans l'ordre des créneaux.
    pub fn iter(&self) -> impl Iterator<Item = (Shift, Option<&CaregiverId>)> + '_ {
        Shift::ALL.into_iter().map(move |shift| (shift, self.get(shift)))
    }
}

/// Planning d'un mois : jour (1..=N) → créneau → aidant ou vide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    year: i32,
    month: u32,
    days: Vec<DaySchedule>,
}

impl Schedule {
    /// Planning vierge (toutes les cases vides) pour le mois donné.
    pub fn empty(year: i32, month: u32) -> Result<Self, SchedError> {
        let (_, num_days) =
            super::util::month_bounds(year, month).ok_or(SchedError::InvalidMonth { year, month })?;
        Ok(Self {
            year,
            month,
            days: (1..=num_days).map(DaySchedule::new).collect(),
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    pub fn day(&self, day: u32) -> Option<&DaySchedule> {
        let idx = usize::try_from(day).ok()?.checked_sub(1)?;
        self.days.get(idx)
    }

    pub fn get(&self, day: u32, shift: Shift) -> Option<&CaregiverId> {
        self.day(day).and_then(|d| d.get(shift))
    }

    /// Fixe une case à la main (remplacement ponctuel, tests).
    pub fn assign(
        &mut self,
        day: u32,
        shift: Shift,
        caregiver: Option<CaregiverId>,
    ) -> Result<(), SchedError> {
        let (year, month) = (self.year, self.month);
        let slot = usize::try_from(day)
            .ok()
            .and_then(|d| d.checked_sub(1))
            .and_then(|idx| self.days.get_mut(idx))
            .ok_or(SchedError::DayOutOfRange { year, month, day })?;
        slot.set(shift, caregiver);
        Ok(())
    }

    /// Nombre de cases attribuées.
    pub fn assigned_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.iter())
            .filter(|(_, c)| c.is_some())
            .count()
    }

    pub fn cell_count(&self) -> usize {
        self.days.len() * Shift::ALL.len()
    }
}
