#![forbid(unsafe_code)]
use caregiver_roster::{
    html, render_html, write_html, Caregiver, CalendarGrid, FirstPicker, Roster, Schedule,
    Scheduler, Shift,
};
use tempfile::tempdir;

fn roster_with(names: &[&str]) -> Roster {
    Roster {
        caregivers: names.iter().map(|n| Caregiver::new(*n, "", "")).collect(),
    }
}

#[test]
fn html_for_a_short_month() {
    // février 2015 : commence un dimanche, 4 semaines pleines
    let roster = roster_with(&["Jack", "Ann & Co"]);
    let mut schedule = Schedule::empty(2015, 2).unwrap();
    schedule
        .assign(1, Shift::Morning, Some(roster.caregivers[0].id.clone()))
        .unwrap();
    schedule
        .assign(7, Shift::Afternoon, Some(roster.caregivers[1].id.clone()))
        .unwrap();

    let grid = CalendarGrid::build(&schedule, &roster).unwrap();
    let doc = render_html(&grid);

    assert!(doc.contains("<title>Schedule for February 2015</title>"));
    assert!(doc.contains("<tr><th>Sun</th><th>Mon</th><th>Tue</th><th>Wed</th><th>Thu</th><th>Fri</th><th>Sat</th></tr>"));
    assert_eq!(doc.matches("<tr><td>").count(), 4);
    assert!(!doc.contains("<td></td>"));
    assert!(doc.contains("<td>1<br><b>AM:</b> Jack<br><b>PM:</b> N/A</td>"));
    assert!(doc.contains("<td>7<br><b>AM:</b> N/A<br><b>PM:</b> Ann &amp; Co</td>"));
}

#[test]
fn blank_cells_pad_first_and_last_week() {
    let roster = roster_with(&["Jack"]);
    let schedule = Schedule::empty(2025, 1).unwrap();
    let grid = CalendarGrid::build(&schedule, &roster).unwrap();
    let doc = render_html(&grid);

    // 3 cases avant le mercredi 1er, 1 après le vendredi 31
    assert!(doc.contains("<tr><td></td><td></td><td></td><td>1<br>"));
    assert!(doc.contains("<td>31<br><b>AM:</b> N/A<br><b>PM:</b> N/A</td><td></td></tr>"));
    assert_eq!(doc.matches("<td></td>").count(), 4);
}

#[test]
fn write_html_names_file_after_year_and_month() {
    let dir = tempdir().unwrap();
    let mut s = Scheduler::from_roster(roster_with(&["Jack", "John", "Jacob"]));
    let schedule = s.generate(2025, 1, &mut FirstPicker).unwrap();
    let grid = CalendarGrid::build(&schedule, s.roster()).unwrap();

    let path = write_html(dir.path(), &grid).unwrap();
    assert_eq!(path, dir.path().join(html::file_name(2025, 1)));
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, render_html(&grid));
    assert_eq!(written.matches("<b>AM:</b> Jack").count(), 31);
}

#[test]
fn write_html_into_missing_directory_fails() {
    let dir = tempdir().unwrap();
    let roster = roster_with(&["Jack"]);
    let grid = CalendarGrid::build(&Schedule::empty(2025, 5).unwrap(), &roster).unwrap();
    assert!(write_html(dir.path().join("nope"), &grid).is_err());
}
