use crate::cli::commands::{load_inputs, InputArgs};
use crate::cli::formatter::section_header;
use crate::core::validator::run_checks;
use clap::Args;
use colored::*;

#[derive(Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

pub fn run(args: ValidateArgs) -> anyhow::Result<()> {
    let inputs = load_inputs(&args.input)?;
    let report = run_checks(
        &inputs.assignments,
        &inputs.records,
        &inputs.classifier,
        &inputs.table,
    );

    section_header("Data-quality checks");
    for check in &report.checks {
        let status = if check.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!("  [{}] {}: {}", status, check.name, check.details);
    }

    if !report.passed() {
        anyhow::bail!("data-quality checks failed");
    }
    println!("\n{}", "All checks passed".green());
    Ok(())
}
