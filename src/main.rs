use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schedule_feed::error_helper::{print_error_with_help, ErrorType};
use schedule_feed::reporter::{print_convert_report, print_fetch_report};
use schedule_feed::{run_convert, run_fetch, Config, Credentials};

#[derive(Parser)]
#[command(name = "schedule-feed")]
#[command(about = "Timetable spreadsheet fetcher and JSON feed generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the four timetable spreadsheets from SharePoint
    Fetch,

    /// Convert the downloaded spreadsheets into docs/schedule.json
    Convert,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let today = config.today();

    match cli.command {
        Commands::Fetch => {
            println!("📥 Fetching timetables (as of {})\n", today);

            let credentials = match Credentials::from_env() {
                Ok(credentials) => credentials,
                Err(e) => {
                    print_error_with_help(ErrorType::MissingCredentials(e.to_string()));
                    return Err(e);
                }
            };

            match run_fetch(&config, &credentials, today) {
                Ok(summary) => {
                    print_fetch_report(&summary);
                    Ok(())
                }
                Err(e) => {
                    print_error_with_help(ErrorType::from_fetch_error(&e));
                    Err(e)
                }
            }
        }
        Commands::Convert => {
            println!("🔄 Converting timetables (as of {})\n", today);

            match run_convert(&config, today) {
                Ok(summary) => {
                    print_convert_report(&summary);
                    Ok(())
                }
                Err(e) => {
                    print_error_with_help(ErrorType::OutputNotWritable(config.output_dir.clone()));
                    Err(e)
                }
            }
        }
    }
}
