use crate::model::Shift;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AvailabilityError {
    #[error("weekday key must be within 1..=7, got {0}")]
    InvalidWeekday(u32),
    #[error("invalid availability status: {0:?}")]
    InvalidStatus(String),
    #[error("unknown shift: {0:?}")]
    InvalidShift(String),
}

/// Niveau de disponibilité d'un aidant sur un créneau.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Preferred,
    #[default]
    Available,
    Unavailable,
}

impl AvailabilityStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AvailabilityStatus::Preferred => "preferred",
            AvailabilityStatus::Available => "available",
            AvailabilityStatus::Unavailable => "unavailable",
        }
    }

    /// Parsing tolérant : toute valeur inconnue devient `Available` (avec warning).
    pub fn parse_lenient(raw: &str) -> Self {
        raw.parse().unwrap_or_else(|err: AvailabilityError| {
            tracing::warn!(%err, "defaulting to 'available'");
            AvailabilityStatus::Available
        })
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = AvailabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preferred" => Ok(AvailabilityStatus::Preferred),
            "available" => Ok(AvailabilityStatus::Available),
            "unavailable" => Ok(AvailabilityStatus::Unavailable),
            _ => Err(AvailabilityError::InvalidStatus(s.trim().to_string())),
        }
    }
}

/// Clé de jour 1..=7 de la table de disponibilité (1 = lundi).
///
/// Le générateur n'utilise pas le vrai jour de la semaine : le jour `d` du mois
/// est indexé par `(d % 7) + 1`, voir [`WeekdayKey::for_day_of_month`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct WeekdayKey(u8);

impl WeekdayKey {
    const NAMES: [&'static str; 7] = [
        "Monday",
        "Tuesday",
        "Wednesday",
        "Thursday",
        "Friday",
        "Saturday",
        "Sunday",
    ];

    pub fn new(key: u32) -> Result<Self, AvailabilityError> {
        match key {
            1..=7 => Ok(Self(key as u8)),
            _ => Err(AvailabilityError::InvalidWeekday(key)),
        }
    }

    /// Clé cyclique du jour du mois : `(day % 7) + 1`, indépendante du calendrier.
    pub fn for_day_of_month(day: u32) -> Self {
        Self((day % 7) as u8 + 1)
    }

    pub fn all() -> impl Iterator<Item = WeekdayKey> {
        (1..=7u8).map(WeekdayKey)
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    pub fn name(self) -> &'static str {
        Self::NAMES[usize::from(self.0 - 1)]
    }

    fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u32> for WeekdayKey {
    type Error = AvailabilityError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        WeekdayKey::new(value)
    }
}

impl From<WeekdayKey> for u32 {
    fn from(key: WeekdayKey) -> Self {
        key.get()
    }
}

/// Table 7 jours × 2 créneaux ; tout est `Available` tant que rien n'est fixé.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Availability {
    days: [[AvailabilityStatus; 2]; 7],
}

impl Availability {
    pub fn get(&self, day: WeekdayKey, shift: Shift) -> AvailabilityStatus {
        self.days[day.index()][shift.index()]
    }

    pub fn set(&mut self, day: WeekdayKey, shift: Shift, status: AvailabilityStatus) {
        self.days[day.index()][shift.index()] = status;
    }

    /// Remet tous les créneaux à `Available`.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_logs;

    #[test]
    fn default_table_is_available_everywhere() {
        let table = Availability::default();
        for day in WeekdayKey::all() {
            for shift in Shift::ALL {
                assert_eq!(table.get(day, shift), AvailabilityStatus::Available);
            }
        }
    }

    #[test]
    fn set_only_touches_one_cell() {
        let mut table = Availability::default();
        let wed = WeekdayKey::new(3).unwrap();
        table.set(wed, Shift::Morning, AvailabilityStatus::Preferred);
        assert_eq!(table.get(wed, Shift::Morning), AvailabilityStatus::Preferred);
        assert_eq!(table.get(wed, Shift::Afternoon), AvailabilityStatus::Available);
        table.reset();
        assert_eq!(table.get(wed, Shift::Morning), AvailabilityStatus::Available);
    }

    #[test]
    fn status_parsing_is_trimmed_and_case_insensitive() {
        assert_eq!(
            "  PREFERRED ".parse::<AvailabilityStatus>().unwrap(),
            AvailabilityStatus::Preferred
        );
        assert!("maybe".parse::<AvailabilityStatus>().is_err());
        assert_eq!(
            AvailabilityStatus::parse_lenient("maybe"),
            AvailabilityStatus::Available
        );
        assert_eq!(
            AvailabilityStatus::parse_lenient("Unavailable\n"),
            AvailabilityStatus::Unavailable
        );
    }

    #[test]
    fn lenient_parse_warns_only_when_coercing() {
        let (status, logs) = capture_logs(|| AvailabilityStatus::parse_lenient("sometimes"));
        assert_eq!(status, AvailabilityStatus::Available);
        assert!(logs.contains("WARN"), "{logs}");
        assert!(logs.contains("defaulting to 'available'"), "{logs}");
        assert!(logs.contains("sometimes"), "{logs}");

        let (_, quiet) = capture_logs(|| AvailabilityStatus::parse_lenient("preferred"));
        assert!(!quiet.contains("WARN"), "{quiet}");
    }

    #[test]
    fn cyclic_key_wraps_on_seven_days() {
        assert_eq!(WeekdayKey::for_day_of_month(1).get(), 2);
        assert_eq!(WeekdayKey::for_day_of_month(6).get(), 7);
        assert_eq!(WeekdayKey::for_day_of_month(7).get(), 1);
        assert_eq!(WeekdayKey::for_day_of_month(9).get(), 3);
        assert_eq!(WeekdayKey::for_day_of_month(31).get(), 4);
    }

    #[test]
    fn weekday_key_rejects_out_of_range() {
        assert_eq!(WeekdayKey::new(0), Err(AvailabilityError::InvalidWeekday(0)));
        assert_eq!(WeekdayKey::new(8), Err(AvailabilityError::InvalidWeekday(8)));
        assert_eq!(WeekdayKey::new(1).unwrap().name(), "Monday");
        assert_eq!(WeekdayKey::new(7).unwrap().name(), "Sunday");
    }
}
