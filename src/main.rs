use clap::Parser;
use std::fs;
use std::path::Path;
use tracing_subscriber::EnvFilter;

use nutri_assess_rs::aggregator::build_report;
use nutri_assess_rs::calculators::{Calculator, CalculatorInputs};
use nutri_assess_rs::cli::{Cli, Command, PlanTarget};
use nutri_assess_rs::error::Result;
use nutri_assess_rs::interface::{
    display_calculator_result, display_instruments, display_plan_report,
    display_screening_result, display_search_results, export_report_csv,
    prompt_calculator_inputs, prompt_ingredient, prompt_screening_answers,
};
use nutri_assess_rs::models::{Nutrient, Plan};
use nutri_assess_rs::screening::{evaluate_checked, find_instrument, Answers, INSTRUMENTS};
use nutri_assess_rs::state::{load_catalog, load_plan, save_plan, IngredientCatalog, PlanEditor};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the verbosity flag.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("nutri_assess_rs={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Calc { calculator, inputs } => cmd_calc(&calculator, &inputs),
        Command::Instruments => {
            display_instruments(INSTRUMENTS);
            Ok(())
        }
        Command::Screen { instrument, answers } => cmd_screen(&instrument, answers.as_deref()),
        Command::Report { plan, csv } => cmd_report(&plan, csv.as_deref()),
        Command::Search {
            catalog,
            query,
            limit,
        } => cmd_search(&catalog, &query, limit),
        Command::AddIngredient {
            target,
            catalog,
            ingredient,
            grams,
        } => cmd_add_ingredient(&target, &catalog, &ingredient, grams),
        Command::RemoveIngredient { target, ingredient } => {
            edit_plan(&target, |editor| {
                let removed = editor.remove_ingredient(&target.meal, &target.recipe, &ingredient)?;
                println!("Removed {} from {}.", removed.name, target.recipe);
                Ok(())
            })
        }
        Command::SetAmount {
            target,
            ingredient,
            grams,
        } => edit_plan(&target, |editor| {
            editor.set_amount(&target.meal, &target.recipe, &ingredient, grams)?;
            println!("Set {} in {} to {} g.", ingredient, target.recipe, grams);
            Ok(())
        }),
    }
}

/// Run a calculator, prompting for any field not given on the command line.
fn cmd_calc(name: &str, pairs: &[String]) -> Result<()> {
    let calculator: Calculator = name.parse()?;
    let inputs = CalculatorInputs::from_pairs(pairs)?;
    let inputs = prompt_calculator_inputs(calculator, inputs)?;

    let result = calculator.calculate(&inputs)?;
    display_calculator_result(&result);
    Ok(())
}

/// Score an instrument from an answers file or interactively.
fn cmd_screen(instrument: &str, answers_path: Option<&str>) -> Result<()> {
    let config = find_instrument(instrument)?;

    let answers: Answers = match answers_path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => prompt_screening_answers(config)?,
    };

    let result = evaluate_checked(config, &answers)?;
    display_screening_result(config, &result);
    Ok(())
}

fn cmd_report(plan_path: &str, csv_path: Option<&str>) -> Result<()> {
    let path = Path::new(plan_path);

    if !path.exists() {
        eprintln!("Plan file not found: {}", plan_path);
        return Ok(());
    }

    let plan = load_plan(path)?;
    let report = build_report(&plan);
    display_plan_report(&report);

    if let Some(csv_path) = csv_path {
        export_report_csv(&report, csv_path)?;
        println!("Report written to {}", csv_path);
    }

    Ok(())
}

fn cmd_search(catalog_path: &str, query: &str, limit: usize) -> Result<()> {
    let catalog = IngredientCatalog::new(load_catalog(catalog_path)?);
    println!("Loaded {} ingredients", catalog.len());

    let hits = catalog.search(query, limit);
    display_search_results(query, &hits);
    Ok(())
}

/// Add an ingredient from the catalog, creating the plan file if needed.
fn cmd_add_ingredient(target: &PlanTarget, catalog_path: &str, query: &str, grams: f64) -> Result<()> {
    let catalog = IngredientCatalog::new(load_catalog(catalog_path)?);

    let Some(ingredient) = prompt_ingredient(&catalog, query)? else {
        return Ok(());
    };

    let path = Path::new(&target.plan);
    let plan = if path.exists() {
        load_plan(path)?
    } else {
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Plan".to_string());
        tracing::info!("Starting new plan '{}' at {}", name, path.display());
        Plan::new(name, 0.0)
    };

    let mut editor = PlanEditor::new(plan);
    editor.ensure_recipe(&target.meal, &target.recipe);
    let name = ingredient.name.clone();
    editor.add_ingredient(&target.meal, &target.recipe, ingredient, grams)?;

    let kcal = editor.meal_totals(&target.meal)?.get(Nutrient::Kcal);
    save_plan(path, editor.plan())?;
    println!("Added {} g of {} to {}.", grams, name, target.recipe);
    println!("{} now totals {:.0} kcal.", target.meal, kcal);
    Ok(())
}

/// Load a plan, apply one edit and save it back.
fn edit_plan<F>(target: &PlanTarget, edit: F) -> Result<()>
where
    F: FnOnce(&mut PlanEditor) -> Result<()>,
{
    let path = Path::new(&target.plan);

    if !path.exists() {
        eprintln!("Plan file not found: {}", target.plan);
        return Ok(());
    }

    let mut editor = PlanEditor::new(load_plan(path)?);
    edit(&mut editor)?;

    let kcal = editor.meal_totals(&target.meal)?.get(Nutrient::Kcal);
    save_plan(path, editor.plan())?;
    println!("{} now totals {:.0} kcal.", target.meal, kcal);
    Ok(())
}
