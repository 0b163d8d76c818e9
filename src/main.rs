use anyhow::Result;
use clap::Parser;
use std::time::Instant;

use subscription_cadence::{run, Args, OutputFormat};

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = args.analysis_config()?;

    println!("📂 Reading {}...", args.input.display());
    let analysis = run(&args.input, &config, args.limit)?;
    println!(
        "✓ Identified {} customers, predicted {} revenue: ${}",
        analysis.customers.len(),
        analysis.predicted_year,
        subscription_cadence::report::group_thousands(analysis.predicted_revenue)
    );

    let started = Instant::now();
    println!("📝 Writing to {}", args.output.display());

    let report = analysis.report();
    match args.format {
        OutputFormat::Text => report.write_text(&args.output)?,
        OutputFormat::Json => report.write_json(&args.output)?,
    }

    log::info!("finished writing in {:.3}s", started.elapsed().as_secs_f64());
    println!("✅ Report written");

    Ok(())
}
