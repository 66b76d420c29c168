//! Output renderers and formatting helpers for CLI commands.

use std::fmt::Write as _;

use anyhow::anyhow;
use argip_api_models::projection::range_label;
use argip_api_models::{Nut, Range, ScrewLength, User};
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

fn emit<T>(value: &T, format: OutputFormat, table: impl FnOnce() -> String) -> CliResult<()>
where
    T: Serialize + ?Sized,
{
    match format {
        OutputFormat::Json => {
            let text = serde_json::to_string_pretty(value)
                .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
            println!("{text}");
        }
        OutputFormat::Table => print!("{}", table()),
    }
    Ok(())
}

pub(crate) fn render_user(user: &User, format: OutputFormat) -> CliResult<()> {
    emit(user, format, || {
        format!(
            "id: {}\nusername: {}\nemail: {}\n",
            user.id, user.username, user.email
        )
    })
}

pub(crate) fn render_ranges(ranges: &[Range], format: OutputFormat) -> CliResult<()> {
    emit(ranges, format, || ranges_table(ranges))
}

pub(crate) fn render_range(range: &Range, format: OutputFormat) -> CliResult<()> {
    emit(range, format, || ranges_table(std::slice::from_ref(range)))
}

/// `ranges` is only used to label each nut with its range name.
pub(crate) fn render_nuts(nuts: &[Nut], ranges: &[Range], format: OutputFormat) -> CliResult<()> {
    emit(nuts, format, || nuts_table(nuts, ranges))
}

pub(crate) fn render_nut(nut: &Nut, ranges: &[Range], format: OutputFormat) -> CliResult<()> {
    emit(nut, format, || nuts_table(std::slice::from_ref(nut), ranges))
}

pub(crate) fn render_screws(screws: &[ScrewLength], format: OutputFormat) -> CliResult<()> {
    emit(screws, format, || screws_table(screws))
}

pub(crate) fn render_diameters(diameters: &[f64], format: OutputFormat) -> CliResult<()> {
    emit(diameters, format, || {
        diameters.iter().fold(String::new(), |mut out, diameter| {
            let _ = writeln!(out, "⌀{diameter} mm");
            out
        })
    })
}

#[must_use]
pub(crate) fn ranges_table(ranges: &[Range]) -> String {
    let mut out = format!("{:>6} {:<24} {:>10} {:>10}\n", "ID", "NAME", "FROM", "TO");
    for range in ranges {
        let _ = writeln!(
            out,
            "{:>6} {:<24} {:>10} {:>10}",
            range.id, range.nazwa, range.od, range.do_
        );
    }
    out
}

#[must_use]
pub(crate) fn nuts_table(nuts: &[Nut], ranges: &[Range]) -> String {
    let mut out = format!(
        "{:>6} {:<24} {:<20} {:>10} {:>10}\n",
        "ID", "NAME", "RANGE", "DIAMETER", "PRICE"
    );
    for nut in nuts {
        let _ = writeln!(
            out,
            "{:>6} {:<24} {:<20} {:>10} {:>10.2}",
            nut.id,
            nut.nazwa,
            range_label(ranges, nut.id_zakresu),
            nut.srednica,
            nut.cena
        );
    }
    out
}

#[must_use]
pub(crate) fn screws_table(screws: &[ScrewLength]) -> String {
    let mut out = format!("{:>6} {:>12} {:>12}\n", "ID", "DIAMETER", "LENGTH");
    for screw in screws {
        let diameter = format!("⌀{} mm", screw.srednica);
        let length = format!("{} mm", screw.dlugosc);
        let _ = writeln!(out, "{:>6} {diameter:>12} {length:>12}", screw.id);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(id: i64, nazwa: &str) -> Range {
        Range {
            id,
            nazwa: nazwa.to_string(),
            od: 6.0,
            do_: 10.0,
        }
    }

    fn nut(id: i64, id_zakresu: i64) -> Nut {
        Nut {
            id,
            id_zakresu,
            nazwa: format!("nut-{id}"),
            srednica: 8.0,
            cena: 0.5,
        }
    }

    #[test]
    fn nuts_are_labelled_by_range_name_or_raw_id() {
        let table = nuts_table(&[nut(1, 1), nut(2, 42)], &[range(1, "Metric small")]);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("Metric small"));
        assert!(lines[1].contains("0.50"));
        assert!(lines[2].contains(" 42 "));
    }

    #[test]
    fn ranges_table_lists_bounds() {
        let table = ranges_table(&[range(3, "M6-M10")]);
        assert!(table.starts_with("    ID NAME"));
        let row = table.lines().nth(1).expect("row");
        assert!(row.contains("M6-M10"));
        assert!(row.trim_end().ends_with("10"));
    }

    #[test]
    fn screws_table_shows_units() {
        let table = screws_table(&[ScrewLength {
            id: 1,
            srednica: 8.0,
            dlugosc: 40.0,
        }]);
        assert!(table.contains("⌀8 mm"));
        assert!(table.contains("40 mm"));
    }
}
