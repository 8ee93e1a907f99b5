use crate::aggregator::{NutrientTotals, PlanReport, SUMMARY_NUTRIENTS};
use crate::calculators::CalculatorResult;
use crate::models::Ingredient;
use crate::screening::{ScreeningConfig, ScreeningResult};

const VALUE_WIDTH: usize = 11;

fn header_row(label_width: usize) -> String {
    let mut line = format!("{:<width$} {:>9}", "", "Amount", width = label_width);
    for n in SUMMARY_NUTRIENTS {
        line.push_str(&format!(" {:>width$}", n.key(), width = VALUE_WIDTH));
    }
    line.push_str(&format!(" {:>8}", "GI"));
    line
}

fn totals_row(label: &str, totals: &NutrientTotals, label_width: usize) -> String {
    let mut line = format!("{:<width$} {:>7.1} g", label, totals.amount(), width = label_width);
    for &n in SUMMARY_NUTRIENTS {
        line.push_str(&format!(" {:>width$.1}", totals.get(n), width = VALUE_WIDTH));
    }
    match totals.glycemic_index() {
        Some(gi) => line.push_str(&format!(" {:>8.1}", gi)),
        None => line.push_str(&format!(" {:>8}", "-")),
    }
    line
}

/// Display a plan report as a table of meals and recipes.
pub fn display_plan_report(report: &PlanReport) {
    println!();
    println!("=== {} ===", report.name);
    println!();

    if report.meals.is_empty() {
        println!("Plan has no meals.");
        return;
    }

    let label_width = report
        .meals
        .iter()
        .flat_map(|m| {
            std::iter::once(m.name.len()).chain(m.recipes.iter().map(|r| r.name.len() + 4))
        })
        .chain(std::iter::once("Plan total".len()))
        .max()
        .unwrap_or(10);

    println!("{}", header_row(label_width));
    for meal in &report.meals {
        println!("{}", totals_row(&meal.name, &meal.totals, label_width));
        for recipe in &meal.recipes {
            let label = format!("    {}", recipe.name);
            println!("{}", totals_row(&label, &recipe.totals, label_width));
        }
    }
    println!("{}", totals_row("Plan total", &report.totals, label_width));

    println!();
    println!("--- Summary ---");
    let target = &report.target;
    match target.percent_of_target {
        Some(pct) => {
            let sign = if target.difference_kcal >= 0.0 { "+" } else { "" };
            println!(
                "Energy: {:.0} of {:.0} kcal ({:.1}%, {}{:.0} kcal)",
                target.actual_kcal, target.target_kcal, pct, sign, target.difference_kcal
            );
        }
        None => println!("Energy: {:.0} kcal (no target set)", target.actual_kcal),
    }
    println!(
        "Macros: protein {:.1}% | carbohydrate {:.1}% | fat {:.1}%",
        report.macros.protein_pct, report.macros.carbs_pct, report.macros.fat_pct
    );
    match (report.totals.glycemic_index(), report.glycemic_index_category) {
        (Some(gi), Some(cat)) => println!("Glycemic index: {:.1} ({})", gi, cat),
        _ => println!("Glycemic index: undefined"),
    }
    if let (Some(gl), Some(cat)) = (report.totals.glycemic_load(), report.glycemic_load_category) {
        println!("Glycemic load: {:.1} ({})", gl, cat);
    }
    println!();
}

pub fn display_screening_result(config: &ScreeningConfig, result: &ScreeningResult) {
    println!();
    println!("=== {} ===", config.name);
    if result.diagnosis.is_some() {
        println!("Diagnosis: {}", result.risk_level);
    } else {
        println!("Score: {} / {}", result.score, config.max_score());
        println!("Risk level: {}", result.risk_level);
    }
    println!("{}", result.interpretation);
    println!();
}

pub fn display_calculator_result(result: &CalculatorResult) {
    println!();
    println!("{}: {:.2} {}", result.calculator.to_uppercase(), result.value, result.unit);
    if let Some(category) = &result.category {
        println!("Category: {}", category);
    }
    println!("{}", result.interpretation);
    println!();
}

/// List the available screening instruments.
pub fn display_instruments(instruments: &[&ScreeningConfig]) {
    let id_width = instruments.iter().map(|c| c.id.len()).max().unwrap_or(6);
    println!();
    for config in instruments {
        println!(
            "  {:<width$}  {} ({} questions)",
            config.id,
            config.name,
            config.questions.len(),
            width = id_width
        );
    }
    println!();
}

pub fn display_search_results(query: &str, hits: &[(&Ingredient, f64)]) {
    if hits.is_empty() {
        println!("No ingredients match '{}'.", query);
        return;
    }

    println!();
    println!("=== Matches for '{}' ({} items) ===", query, hits.len());
    println!();
    for (ingredient, score) in hits {
        println!("  {:.2}  {}", score, ingredient.debug_string());
    }
    println!();
}
