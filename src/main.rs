use clap::Parser;
use isd_locator::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Create async runtime and run the main command logic
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(commands::run(args));

    match result {
        Ok(_stats) => {
            // Success - the report has already been written by the command
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("ISD Locator - NOAA Weather Station Registry Search");
    println!("==================================================");
    println!();
    println!("Search the NOAA Integrated Surface Database station history file by");
    println!("name, country, state and operational period, optionally ranked by");
    println!("great-circle distance from a reference point.");
    println!();
    println!("USAGE:");
    println!("    isd-locator <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    search      Filter and rank stations from the registry (main command)");
    println!("    fetch       Download the registry feed and refresh the local cache");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # All UK stations still reporting this year:");
    println!("    isd-locator search --country UK");
    println!();
    println!("    # Ten stations nearest central London, any operational period:");
    println!("    isd-locator search --latitude 51.5 --longitude -0.1 --end-year all");
    println!();
    println!("    # Name search written out as JSON:");
    println!("    isd-locator search --name kennedy --format json -o stations.json");
    println!();
    println!("    # Refresh the local registry cache:");
    println!("    isd-locator fetch");
    println!();
    println!("For detailed help on any command, use:");
    println!("    isd-locator <COMMAND> --help");
}
