use crate::availability::{Availability, AvailabilityError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Durée payée d'un créneau, en heures.
pub const SHIFT_HOURS: u32 = 6;

/// Taux horaire par défaut des aidants rémunérés.
pub const DEFAULT_PAY_RATE: f64 = 20.0;

/// Identifiant fort pour Caregiver
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaregiverId(String);

impl CaregiverId {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        Self(s.as_ref().to_owned())
    }
    pub fn random() -> Self {
        Self(Uuid::new_v4().to_string())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Créneau journalier. L'ordre des variantes est l'ordre de génération.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    Morning,
    Afternoon,
}

impl Shift {
    pub const ALL: [Shift; 2] = [Shift::Morning, Shift::Afternoon];

    /// Plage horaire affichée.
    pub fn label(self) -> &'static str {
        match self {
            Shift::Morning => "7:00AM - 1:00PM",
            Shift::Afternoon => "1:00PM - 7:00PM",
        }
    }

    pub fn short(self) -> &'static str {
        match self {
            Shift::Morning => "AM",
            Shift::Afternoon => "PM",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Shift::Morning => 0,
            Shift::Afternoon => 1,
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short())
    }
}

impl FromStr for Shift {
    type Err = AvailabilityError;

    /// Accepte `AM`/`PM`, `morning`/`afternoon` ou la plage complète.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        match raw.to_ascii_lowercase().as_str() {
            "am" | "morning" => return Ok(Shift::Morning),
            "pm" | "afternoon" => return Ok(Shift::Afternoon),
            _ => {}
        }
        Shift::ALL
            .into_iter()
            .find(|shift| shift.label().eq_ignore_ascii_case(raw))
            .ok_or_else(|| AvailabilityError::InvalidShift(raw.to_string()))
    }
}

/// Aidant (membre du planning)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caregiver {
    pub id: CaregiverId,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub pay_rate: f64,
    /// Heures cumulées depuis la dernière clôture de période.
    #[serde(default)]
    pub hours: u32,
    #[serde(default)]
    pub availability: Availability,
}

impl Caregiver {
    /// Crée un aidant disponible sur tous les créneaux, au taux par défaut.
    pub fn new<N, P, E>(name: N, phone: P, email: E) -> Self
    where
        N: Into<String>,
        P: Into<String>,
        E: Into<String>,
    {
        Self {
            id: CaregiverId::random(),
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            pay_rate: DEFAULT_PAY_RATE,
            hours: 0,
            availability: Availability::default(),
        }
    }

    pub fn with_pay_rate(mut self, pay_rate: f64) -> Self {
        self.pay_rate = pay_rate;
        self
    }
}

/// Ensemble des aidants, dans l'ordre d'inscription.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Roster {
    pub caregivers: Vec<Caregiver>,
}

impl Roster {
    pub fn find_by_name<'a>(&'a self, name: &str) -> Option<&'a Caregiver> {
        self.caregivers.iter().find(|c| c.name == name)
    }
    pub fn find_mut_by_name(&mut self, name: &str) -> Option<&mut Caregiver> {
        self.caregivers.iter_mut().find(|c| c.name == name)
    }
    pub fn find_by_id<'a>(&'a self, id: &CaregiverId) -> Option<&'a Caregiver> {
        self.caregivers.iter().find(|c| &c.id == id)
    }
    pub fn find_mut_by_id(&mut self, id: &CaregiverId) -> Option<&mut Caregiver> {
        self.caregivers.iter_mut().find(|c| &c.id == id)
    }

    /// Nom affichable pour un identifiant ; retombe sur l'id brut si inconnu.
    pub fn display_name<'a>(&'a self, id: &'a CaregiverId) -> &'a str {
        self.find_by_id(id)
            .map(|c| c.name.as_str())
            .unwrap_or_else(|| id.as_str())
    }
}
