use procat_reporter::config::{parse_period, Config};
use procat_reporter::job::run_monthly_report;
use procat_reporter::{build_state, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    let state = build_state(&config).await?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (month, year) = parse_period(&args, state.clock.today())?;

    let outcome = run_monthly_report(&state, month, year, &config.output_dir).await?;
    tracing::info!(
        "Charges report for {}/{} written to {}",
        month,
        year,
        outcome.csv_path.display()
    );
    Ok(())
}
