use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use wayfinder::core::config::{self, CliOverrides};

#[derive(Parser)]
#[command(name = "wayfinder", about = "Browse a multi-floor venue map from the terminal")]
struct Args {
    /// Venue description (JSON) to open
    #[arg(short, long)]
    venue: Option<PathBuf>,

    /// Floor to show first
    #[arg(short, long)]
    floor: Option<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => Some(c),
        Err(e) => {
            eprintln!("Warning: {}, using defaults", e);
            None
        }
    };
    let cli = CliOverrides {
        venue_file: args.venue,
        default_floor: args.floor,
    };
    let resolved = config::resolve(&file_config.unwrap_or_default(), &cli);

    // Initialize file logger - writes to wayfinder.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("wayfinder.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Wayfinder starting up with venue {}",
        resolved.venue_file.display()
    );

    wayfinder::tui::run(resolved)
}
