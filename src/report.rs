// src/report.rs

use std::fmt::Write;

use crate::dataset::DashboardDataset;
use crate::view::{client_rows, format_hours, monthly_series, summary_totals};

/// Plain-text rendering of the three dashboard views.
pub fn render(ds: &DashboardDataset) -> String {
    let mut out = String::new();
    // writing into a String cannot fail
    let _ = write_report(&mut out, ds);
    out
}

fn write_report(out: &mut String, ds: &DashboardDataset) -> std::fmt::Result {
    let totals = summary_totals(ds);
    writeln!(out, "Horas Totais       {}", format_hours(totals.contracted))?;
    writeln!(out, "Horas Trabalhadas  {}", format_hours(totals.worked))?;
    writeln!(out, "% Trabalhada       {:.2}%", totals.percent_worked())?;
    writeln!(out)?;

    writeln!(out, "{:>3}  {:<24} {:>8} {:>8} {:>9}", "#", "Cliente", "Usadas", "Totais", "Progresso")?;
    for (i, row) in client_rows(ds).iter().enumerate() {
        let flag = if row.is_over_budget() { " !" } else { "" };
        writeln!(
            out,
            "{:>3}  {:<24} {:>8} {:>8} {:>8.2}%{}",
            i + 1,
            row.client,
            format_hours(row.worked),
            format_hours(row.contracted),
            row.percent_used(),
            flag
        )?;
    }
    writeln!(out)?;

    writeln!(out, "Horas Utilizadas por Mês")?;
    for point in monthly_series(ds) {
        writeln!(out, "  {:<10} {:>8.2}", point.data, point.worked)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_fallback() {
        let text = render(&DashboardDataset::fallback());
        assert!(text.contains("Horas Totais       210"));
        assert!(text.contains("Horas Trabalhadas  122.01"));
        assert!(text.contains("% Trabalhada       58.10%"));
        let asr = text.find("ASR6").unwrap();
        let vks = text.find("VKS3").unwrap();
        assert!(asr < vks);
        assert!(text.contains("mai/25       122.01"));
    }

    #[test]
    fn renders_empty() {
        let text = render(&DashboardDataset::empty());
        assert!(text.contains("Horas Totais       0"));
        assert!(text.contains("% Trabalhada       0.00%"));
    }
}
