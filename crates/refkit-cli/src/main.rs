mod validate;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "refkit", version, about = "Declarative form validation for HTML files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the data-val-* rules of a form (exit status 1 when invalid)
    Validate {
        /// HTML file to read
        file: PathBuf,
        /// Id of the form to validate
        #[arg(long)]
        form: String,
        /// Leave failing fields unmarked
        #[arg(long)]
        no_mark: bool,
        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
        /// JSON file with options (class names, fetch defaults)
        #[arg(long, value_name = "FILE")]
        options: Option<PathBuf>,
        /// Also print the rebuilt summary markup
        #[arg(long)]
        print_summary: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Validate {
            file,
            form,
            no_mark,
            json,
            options,
            print_summary,
        } => validate::run(&validate::Args {
            file,
            form,
            mark_invalid: !no_mark,
            json,
            options,
            print_summary,
        }),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
