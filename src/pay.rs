use crate::model::{CaregiverId, Roster};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Ligne de paie d'un aidant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayLine {
    pub caregiver: CaregiverId,
    pub name: String,
    pub hours: u32,
    pub pay_rate: f64,
    pub gross: f64,
}

/// Relevé de paie d'une période, dans l'ordre du roster.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PayReport {
    pub lines: Vec<PayLine>,
    pub total: f64,
}

/// Libellé de la période de paie affichée.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PayPeriod {
    #[default]
    Weekly,
    Monthly,
}

impl PayPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            PayPeriod::Weekly => "Weekly",
            PayPeriod::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayPeriod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(PayPeriod::Weekly),
            "monthly" => Ok(PayPeriod::Monthly),
            other => Err(format!("unknown pay period: {other}")),
        }
    }
}

impl PayReport {
    /// Rendu console : une ligne `nom: $montant` par aidant puis le total.
    pub fn render_text(&self, period: PayPeriod) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "{period} Pay Report");
        let _ = writeln!(output, "{}", "=".repeat(20));
        for line in &self.lines {
            let _ = writeln!(output, "{}: ${:.2}", line.name, line.gross);
        }
        let _ = writeln!(output);
        let _ = writeln!(output, "Total {period} Pay: ${:.2}", self.total);
        output
    }
}

/// Calcule le relevé sans modifier les heures.
pub fn pending(roster: &Roster) -> PayReport {
    let lines: Vec<PayLine> = roster
        .caregivers
        .iter()
        .map(|c| PayLine {
            caregiver: c.id.clone(),
            name: c.name.clone(),
            hours: c.hours,
            pay_rate: c.pay_rate,
            gross: f64::from(c.hours) * c.pay_rate,
        })
        .collect();
    let total = lines.iter().map(|l| l.gross).sum();
    PayReport { lines, total }
}

/// Clôt la période : relevé courant puis remise à zéro de toutes les heures.
pub fn close_period(roster: &mut Roster) -> PayReport {
    let report = pending(roster);
    for caregiver in roster.caregivers.iter_mut() {
        caregiver.hours = 0;
    }
    tracing::debug!(total = report.total, "pay period closed");
    report
}
