pub mod export;
pub mod prompts;
pub mod render;

pub use export::{csv_header, export_report_csv, write_report_csv};
pub use prompts::{
    prompt_calculator_inputs, prompt_field, prompt_ingredient, prompt_question,
    prompt_screening_answers, prompt_yes_no,
};
pub use render::{
    display_calculator_result, display_instruments, display_plan_report,
    display_screening_result, display_search_results,
};
