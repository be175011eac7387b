use super::{GenerateOptions, Picker, SchedError, Schedule, Scheduler};
use crate::availability::{AvailabilityStatus, WeekdayKey};
use crate::model::{Caregiver, Shift};

pub(super) fn generate<P: Picker + ?Sized>(
    scheduler: &mut Scheduler,
    year: i32,
    month: u32,
    picker: &mut P,
    opts: GenerateOptions,
) -> Result<Schedule, SchedError> {
    let mut schedule = Schedule::empty(year, month)?;
    let num_days = schedule.days().len() as u32;
    // index roster des aidants retenus ; les heures ne sont créditées qu'une fois le mois complet
    let mut credited: Vec<usize> = Vec::with_capacity(schedule.cell_count());

    for day in 1..=num_days {
        let key = WeekdayKey::for_day_of_month(day);

        for shift in Shift::ALL {
            let pool = selection_pool(&scheduler.roster.caregivers, key, shift);
            if pool.is_empty() {
                tracing::debug!(day, %shift, "no eligible caregiver");
                continue;
            }

            let index = picker.pick(pool.len());
            let chosen = *pool.get(index).ok_or(SchedError::PickOutOfRange {
                index,
                len: pool.len(),
            })?;

            let id = scheduler.roster.caregivers[chosen].id.clone();
            schedule.assign(day, shift, Some(id))?;
            credited.push(chosen);
        }
    }

    for chosen in credited {
        scheduler.roster.caregivers[chosen].hours += opts.shift_hours;
    }

    tracing::debug!(
        year,
        month,
        assigned = schedule.assigned_count(),
        cells = schedule.cell_count(),
        "schedule generated"
    );
    Ok(schedule)
}

/// Index (dans le roster) des aidants éligibles : les `Preferred` s'il y en a,
/// sinon tous ceux qui ne sont pas `Unavailable`.
pub(super) fn selection_pool(caregivers: &[Caregiver], key: WeekdayKey, shift: Shift) -> Vec<usize> {
    let candidates: Vec<usize> = caregivers
        .iter()
        .enumerate()
        .filter(|(_, c)| c.availability.get(key, shift) != AvailabilityStatus::Unavailable)
        .map(|(idx, _)| idx)
        .collect();

    let preferred: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&idx| caregivers[idx].availability.get(key, shift) == AvailabilityStatus::Preferred)
        .collect();

    if preferred.is_empty() {
        candidates
    } else {
        preferred
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(n: u32) -> WeekdayKey {
        WeekdayKey::new(n).unwrap()
    }

    #[test]
    fn preferred_pool_wins_over_available() {
        let mut people = vec![
            Caregiver::new("a", "", ""),
            Caregiver::new("b", "", ""),
            Caregiver::new("c", "", ""),
        ];
        people[2]
            .availability
            .set(key(3), Shift::Morning, AvailabilityStatus::Preferred);
        people[0]
            .availability
            .set(key(3), Shift::Afternoon, AvailabilityStatus::Unavailable);

        assert_eq!(selection_pool(&people, key(3), Shift::Morning), vec![2]);
        assert_eq!(selection_pool(&people, key(3), Shift::Afternoon), vec![1, 2]);
        assert_eq!(selection_pool(&people, key(4), Shift::Morning), vec![0, 1, 2]);
    }

    #[test]
    fn unavailable_preferred_is_impossible_and_empty_pool_is_empty() {
        let mut people = vec![Caregiver::new("a", "", "")];
        people[0]
            .availability
            .set(key(1), Shift::Morning, AvailabilityStatus::Unavailable);
        assert!(selection_pool(&people, key(1), Shift::Morning).is_empty());
        assert!(selection_pool(&[], key(1), Shift::Morning).is_empty());
    }
}
