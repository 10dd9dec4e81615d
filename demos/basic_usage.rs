//! Basic usage example for the taguchi-l25 library.
//!
//! Generates the L25 schedule for the default ad-campaign design, analyzes
//! the seeded KPIs and prints the main effects.
//!
//! Run with `RUST_LOG=taguchi_l25=debug` to see library events.

use taguchi_l25::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taguchi_l25=info")),
        )
        .init();

    println!("Taguchi L25 - Basic Usage Example\n");

    let oa = build_l25();
    println!("Array: {}", oa.params());
    let check = oa.verify()?;
    if check.is_valid {
        println!("✓ Array is a valid strength-2 orthogonal array\n");
    }

    let mut session = Session::default();
    session.generate()?;
    session.add_kpi("ROAS", Objective::Maximize)?;

    if let Some(schedule) = session.schedule() {
        println!("Schedule (first 5 runs):");
        for run in schedule.iter().take(5) {
            println!("  Run {:>2}: {}", run.index, run.labels.join(" | "));
        }
        println!();
    }

    let factors = session.design().factors();
    for (id, analysis) in session.analyze_all()? {
        let Some(kpi) = session.kpi(id) else { continue };
        println!("{} ({})", kpi.name, kpi.objective);
        println!("  Grand mean: {:.4}", analysis.grand_mean);

        for summary in analysis.factors() {
            let factor = &factors[summary.factor_index];
            println!(
                "  {:<20} best: {:<16} contribution: {:>6.2}%",
                factor.name, factor.levels[summary.best_level], summary.contribution_percent
            );
        }
        println!("  Predicted optimum: {:.4}\n", analysis.predicted_optimum());
    }

    let export = session.export()?;
    println!(
        "Export: {} bytes of JSON for {} KPIs",
        export.to_json_pretty()?.len(),
        export.results.len()
    );

    Ok(())
}
