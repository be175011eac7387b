use crate::calendar::{CalendarGrid, WEEKDAY_HEADERS};
use crate::model::Shift;
use anyhow::Context;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const STYLE: &str = "\
        table {
            border-collapse: collapse;
            width: 100%;
        }
        th, td {
            border: 1px solid black;
            padding: 8px;
            text-align: center;
        }
        th {
            background-color: #f2f2f2;
        }
";

/// Nom du fichier produit pour un mois : `schedule_{year}_{month}.html`.
pub fn file_name(year: i32, month: u32) -> String {
    format!("schedule_{year}_{month}.html")
}

/// Document HTML complet (table dim..sam, une ligne par semaine).
pub fn render_html(grid: &CalendarGrid) -> String {
    let title = format!("Schedule for {} {}", grid.month_name(), grid.year);
    let mut out = String::new();
    let mut day_buf = itoa::Buffer::new();

    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html>");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "    <meta charset=\"utf-8\">");
    let _ = writeln!(out, "    <title>{}</title>", escape(&title));
    let _ = writeln!(out, "    <style>\n{STYLE}    </style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>");
    let _ = writeln!(out, "    <h1>{}</h1>", escape(&title));
    let _ = writeln!(out, "    <table>");

    out.push_str("        <tr>");
    for header in WEEKDAY_HEADERS {
        let _ = write!(out, "<th>{header}</th>");
    }
    out.push_str("</tr>\n");

    for week in &grid.weeks {
        out.push_str("        <tr>");
        for cell in week {
            match cell {
                None => out.push_str("<td></td>"),
                Some(cell) => {
                    out.push_str("<td>");
                    out.push_str(day_buf.format(cell.day));
                    for shift in Shift::ALL {
                        let _ = write!(
                            out,
                            "<br><b>{}:</b> {}",
                            shift.short(),
                            escape(cell.assignee(shift))
                        );
                    }
                    out.push_str("</td>");
                }
            }
        }
        out.push_str("</tr>\n");
    }

    let _ = writeln!(out, "    </table>");
    let _ = writeln!(out, "</body>");
    let _ = writeln!(out, "</html>");
    out
}

/// Écrit le calendrier dans `dir` de manière atomique et renvoie le chemin.
pub fn write_html<P: AsRef<Path>>(dir: P, grid: &CalendarGrid) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    let path = dir.join(file_name(grid.year, grid.month));
    let html = render_html(grid);

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temp file in {}", dir.display()))?;
    tmp.write_all(html.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&path)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "calendar written");
    Ok(path)
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
