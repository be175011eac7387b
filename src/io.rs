use crate::availability::{AvailabilityStatus, WeekdayKey};
use crate::model::{Caregiver, Roster, Shift, DEFAULT_PAY_RATE};
use crate::scheduler::Schedule;
use anyhow::{bail, Context};
use csv::{ReaderBuilder, WriterBuilder};
use std::io::{BufRead, Write};
use std::path::Path;

/// Import d'aidants depuis CSV: header `name,phone,email[,pay_rate]`
pub fn import_caregivers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Caregiver>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        if name.is_empty() {
            bail!("invalid caregiver row (empty name)");
        }
        let phone = rec.get(1).unwrap_or("").trim();
        let email = rec.get(2).unwrap_or("").trim();
        let pay_rate = match rec.get(3).map(str::trim) {
            Some(raw) if !raw.is_empty() => raw
                .parse::<f64>()
                .with_context(|| format!("invalid pay_rate for {name}"))?,
            _ => DEFAULT_PAY_RATE,
        };
        if !pay_rate.is_finite() || pay_rate < 0.0 {
            bail!("pay_rate must be a non-negative number for {name}");
        }
        out.push(Caregiver::new(name, phone, email).with_pay_rate(pay_rate));
    }
    Ok(out)
}

/// Import de disponibilités: header `name,day,shift,status`.
///
/// `day` est la clé 1..=7, `shift` accepte `AM`/`PM` ou la plage complète ;
/// un statut inconnu devient `available`. Renvoie le nombre de lignes appliquées.
pub fn import_availability_csv<P: AsRef<Path>>(
    path: P,
    roster: &mut Roster,
) -> anyhow::Result<usize> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut applied = 0usize;
    for rec in rdr.records() {
        let rec = rec?;
        let name = rec.get(0).context("missing name")?.trim();
        let day = rec.get(1).context("missing day")?.trim();
        let shift = rec.get(2).context("missing shift")?.trim();
        let status = rec.get(3).context("missing status")?;

        let day: u32 = day
            .parse()
            .with_context(|| format!("invalid day for {name}: {day}"))?;
        let key = WeekdayKey::new(day)?;
        let shift: Shift = shift.parse()?;
        let status = AvailabilityStatus::parse_lenient(status);

        let caregiver = roster
            .find_mut_by_name(name)
            .with_context(|| format!("unknown caregiver: {name}"))?;
        caregiver.availability.set(key, shift, status);
        applied += 1;
    }
    Ok(applied)
}

/// Saisie interactive des disponibilités d'un aidant (7 jours × 2 créneaux).
pub fn collect_availability<R: BufRead, W: Write>(
    mut input: R,
    mut output: W,
    caregiver: &mut Caregiver,
) -> anyhow::Result<()> {
    writeln!(output, "Updating availability for {}", caregiver.name)?;
    let mut line = String::new();
    for day in WeekdayKey::all() {
        writeln!(output, "\nDay: {}", day.name())?;
        for shift in Shift::ALL {
            write!(
                output,
                "Enter availability for {} (preferred/available/unavailable): ",
                shift.label()
            )?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                bail!("unexpected end of input while reading availability");
            }
            let status = match line.parse::<AvailabilityStatus>() {
                Ok(status) => status,
                Err(err) => {
                    tracing::warn!(caregiver = %caregiver.name, %err, "defaulting to 'available'");
                    writeln!(output, "Invalid input. Defaulting to 'available'.")?;
                    AvailabilityStatus::Available
                }
            };
            caregiver.availability.set(day, shift, status);
        }
    }
    Ok(())
}

/// Export CSV du planning: header `day,shift,caregiver` (vide si non attribué)
pub fn export_schedule_csv<P: AsRef<Path>>(
    path: P,
    schedule: &Schedule,
    roster: &Roster,
) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["day", "shift", "caregiver"])?;
    let mut day_buf = itoa::Buffer::new();
    for day in schedule.days() {
        for (shift, assigned) in day.iter() {
            let name = assigned.map(|id| roster.display_name(id)).unwrap_or("");
            w.write_record([day_buf.format(day.day), shift.short(), name])?;
        }
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::capture_logs;
    use std::io::Cursor;

    #[test]
    fn availability_csv_coerces_bogus_status_with_warning() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("availability.csv");
        std::fs::write(
            &path,
            "name,day,shift,status\nJack,3,AM,Unavailable\nJack,3,PM,whenever\nJack,5,1:00PM - 7:00PM, preferred \n",
        )
        .unwrap();

        let mut jack = Caregiver::new("Jack", "", "");
        jack.availability.set(
            WeekdayKey::new(3).unwrap(),
            Shift::Afternoon,
            AvailabilityStatus::Unavailable,
        );
        let mut roster = Roster {
            caregivers: vec![jack],
        };

        let (applied, logs) = capture_logs(|| import_availability_csv(&path, &mut roster));
        assert_eq!(applied.unwrap(), 3);
        let table = roster.caregivers[0].availability;
        let wed = WeekdayKey::new(3).unwrap();
        assert_eq!(table.get(wed, Shift::Morning), AvailabilityStatus::Unavailable);
        assert_eq!(table.get(wed, Shift::Afternoon), AvailabilityStatus::Available);
        assert_eq!(
            table.get(WeekdayKey::new(5).unwrap(), Shift::Afternoon),
            AvailabilityStatus::Preferred
        );
        assert_eq!(logs.matches("defaulting to 'available'").count(), 1, "{logs}");
        assert!(logs.contains("whenever"), "{logs}");
    }

    #[test]
    fn availability_csv_rejects_unknown_names_and_days() {
        let dir = tempfile::tempdir().unwrap();
        let mut roster = Roster {
            caregivers: vec![Caregiver::new("Jack", "", "")],
        };

        let ghost = dir.path().join("ghost.csv");
        std::fs::write(&ghost, "name,day,shift,status\nGhost,1,AM,available\n").unwrap();
        let err = import_availability_csv(&ghost, &mut roster).unwrap_err();
        assert!(err.to_string().contains("unknown caregiver: Ghost"));

        let bad_day = dir.path().join("day.csv");
        std::fs::write(&bad_day, "name,day,shift,status\nJack,8,AM,available\n").unwrap();
        assert!(import_availability_csv(&bad_day, &mut roster).is_err());
    }

    #[test]
    fn prompt_reads_fourteen_answers_and_coerces_garbage() {
        let mut answers = String::new();
        for day in 1..=7 {
            let am = if day == 3 { "Preferred" } else { "available" };
            answers.push_str(&format!("{am}\n  UNAVAILABLE \n"));
        }
        answers = answers.replacen("available\n", "whenever\n", 1);

        let mut c = Caregiver::new("Jack", "", "");
        let mut out = Vec::new();
        collect_availability(Cursor::new(answers), &mut out, &mut c).unwrap();

        let mon = WeekdayKey::new(1).unwrap();
        let wed = WeekdayKey::new(3).unwrap();
        assert_eq!(c.availability.get(mon, Shift::Morning), AvailabilityStatus::Available);
        assert_eq!(c.availability.get(wed, Shift::Morning), AvailabilityStatus::Preferred);
        assert_eq!(c.availability.get(wed, Shift::Afternoon), AvailabilityStatus::Unavailable);

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.starts_with("Updating availability for Jack"));
        assert!(printed.contains("Day: Sunday"));
        assert_eq!(printed.matches("Invalid input. Defaulting to 'available'.").count(), 1);
    }

    #[test]
    fn prompt_fails_on_truncated_input() {
        let mut c = Caregiver::new("Jack", "", "");
        let err = collect_availability(Cursor::new("preferred\n"), Vec::new(), &mut c);
        assert!(err.is_err());
    }
}
