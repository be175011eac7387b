use crate::model::{Roster, Shift};
use crate::scheduler::{util, DaySchedule, SchedError, Schedule};
use chrono::{Datelike, Month};

/// En-têtes de colonnes, semaine commençant le dimanche.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Texte affiché pour un créneau non attribué.
pub const UNASSIGNED: &str = "N/A";

/// Case remplie de la grille.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub day: u32,
    pub morning: String,
    pub afternoon: String,
}

impl CalendarCell {
    pub fn assignee(&self, shift: Shift) -> &str {
        match shift {
            Shift::Morning => &self.morning,
            Shift::Afternoon => &self.afternoon,
        }
    }
}

/// Planning disposé en semaines de 7 colonnes (dim..sam).
///
/// Le placement suit le vrai jour de la semaine du 1er du mois, alors que le
/// générateur indexe les disponibilités par la clé cyclique `(d % 7) + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarGrid {
    pub year: i32,
    pub month: u32,
    /// Chaque semaine contient exactement 7 entrées ; `None` = case vide.
    pub weeks: Vec<Vec<Option<CalendarCell>>>,
}

impl CalendarGrid {
    pub fn build(schedule: &Schedule, roster: &Roster) -> Result<Self, SchedError> {
        let (year, month) = (schedule.year(), schedule.month());
        let (first, _) =
            util::month_bounds(year, month).ok_or(SchedError::InvalidMonth { year, month })?;
        let offset = first.weekday().num_days_from_sunday() as usize;

        let name_of = |shift: Shift, day: &DaySchedule| {
            day.get(shift)
                .map(|id| roster.display_name(id).to_string())
                .unwrap_or_else(|| UNASSIGNED.to_string())
        };

        let mut cells: Vec<Option<CalendarCell>> = Vec::with_capacity(offset + 31 + 6);
        cells.extend(std::iter::repeat_with(|| None).take(offset));
        for day in schedule.days() {
            cells.push(Some(CalendarCell {
                day: day.day,
                morning: name_of(Shift::Morning, day),
                afternoon: name_of(Shift::Afternoon, day),
            }));
        }
        while cells.len() % 7 != 0 {
            cells.push(None);
        }

        let weeks = cells.chunks(7).map(<[_]>::to_vec).collect();
        Ok(Self { year, month, weeks })
    }

    pub fn month_name(&self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|m| Month::try_from(m).ok())
            .map(|m| m.name())
            .unwrap_or("")
    }

    /// Case d'un jour donné, si présent dans la grille.
    pub fn cell(&self, day: u32) -> Option<&CalendarCell> {
        self.weeks
            .iter()
            .flatten()
            .flatten()
            .find(|cell| cell.day == day)
    }
}
