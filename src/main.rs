use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = dayplan::cli::Cli::parse();
    dayplan::init_tracing(cli.log_filter.clone())?;

    let config = dayplan::AppConfig::discover(cli.data_dir.clone())?;
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    dayplan::commands::execute(
        &config,
        cli.command,
        dayplan::commands::prompt_confirm,
        &mut handle,
    )?;

    Ok(())
}
