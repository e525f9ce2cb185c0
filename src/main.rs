use clap::Parser;
use order_parser::cli::{args::Args, commands, commands::wait_for_interrupt};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            () = wait_for_interrupt(tokio::signal::ctrl_c()) => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Parsing interrupted by user"))
            }
        }
    });

    match result {
        Ok(_stats) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Order Parser - Dictionary-Driven Report Parser");
    println!("==============================================");
    println!();
    println!("Turn fixed-format order reports into structured JSON records, using a");
    println!("field dictionary that names every header and how to read its value.");
    println!();
    println!("USAGE:");
    println!("    order-parser <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    parse       Parse report files or directories into JSON");
    println!("    headers     List the headers a dictionary recognises");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Parse one report:");
    println!("    order-parser parse --dictionary orders.yaml report.txt --pretty");
    println!();
    println!("    # Parse a directory of reports into a file, without warnings:");
    println!("    order-parser parse -d orders.json reports/ --no-meta -o parsed.json");
    println!();
    println!("    # Check a dictionary for headers shared between types:");
    println!("    order-parser headers -d orders.json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    order-parser <COMMAND> --help");
}
