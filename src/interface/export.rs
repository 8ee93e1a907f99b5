use std::io;
use std::path::Path;

use csv::Writer;

use crate::aggregator::{NutrientTotals, PlanReport};
use crate::error::Result;

/// Header row: location columns followed by every totals column.
pub fn csv_header() -> Vec<String> {
    let mut header = vec!["level".to_string(), "meal".to_string(), "recipe".to_string()];
    header.extend(
        NutrientTotals::zero()
            .columns()
            .into_iter()
            .map(|(key, _)| key.to_string()),
    );
    header
}

fn record(level: &str, meal: &str, recipe: &str, totals: &NutrientTotals) -> Vec<String> {
    let mut row = vec![level.to_string(), meal.to_string(), recipe.to_string()];
    row.extend(totals.columns().into_iter().map(|(_, value)| match value {
        Some(v) => format!("{:.4}", v),
        None => String::new(),
    }));
    row
}

/// Write the report as CSV: one row per recipe, per meal and for the plan.
pub fn write_report_csv<W: io::Write>(report: &PlanReport, writer: W) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(csv_header())?;

    for meal in &report.meals {
        for recipe in &meal.recipes {
            wtr.write_record(record("recipe", &meal.name, &recipe.name, &recipe.totals))?;
        }
        wtr.write_record(record("meal", &meal.name, "", &meal.totals))?;
    }
    wtr.write_record(record("plan", "", "", &report.totals))?;

    wtr.flush()?;
    Ok(())
}

pub fn export_report_csv<P: AsRef<Path>>(report: &PlanReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = std::fs::File::create(path)?;
    write_report_csv(report, file)?;
    tracing::info!("Exported report '{}' to {}", report.name, path.display());
    Ok(())
}
