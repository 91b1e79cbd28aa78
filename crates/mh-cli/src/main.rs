//! CLI frontend for Meihua Yishu divination.

mod commands;

use std::process;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "meihua",
    about = "Meihua Yishu (梅花易数) number divination",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG is used otherwise
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Hours ahead of UTC for the divination clock
    #[arg(long, default_value = "8", global = true, allow_hyphen_values = true)]
    utc_offset: i32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a divination from a message containing a three-digit number
    Divine {
        /// Message text, e.g. "746 财运如何"
        text: String,

        /// Cast at this local time instead of now ("YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        at: Option<String>,

        /// RNG seed for the fallback number
        #[arg(short, long)]
        seed: Option<u64>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the interpretation prompt for a message
    Prompt {
        /// Message text
        text: String,

        /// Cast at this local time instead of now ("YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        at: Option<String>,

        /// RNG seed for the fallback number
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Build the final chat reply for a message and an interpretation
    Reply {
        /// Message text; must contain a request keyword such as 算卦
        text: String,

        /// Interpretation text to append
        #[arg(short, long)]
        interpretation: String,

        /// Cast at this local time instead of now ("YYYY-MM-DD HH:MM:SS")
        #[arg(long)]
        at: Option<String>,

        /// RNG seed for the fallback number
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Run the five-element host/guest analysis for a trigram pair
    Analyse {
        /// Upper trigram number (1-8)
        upper: u32,

        /// Lower trigram number (1-8)
        lower: u32,

        /// Host trigram: upper or lower
        #[arg(long, default_value = "lower")]
        host: String,

        /// Lunar month (1-12)
        #[arg(short, long)]
        month: u32,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the eight trigrams
    Trigrams,

    /// List the 64 hexagrams, or show one by name
    Hexagrams {
        /// Hexagram name, e.g. 山泽损
        name: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let offset = cli.utc_offset;

    let result = match cli.command {
        Commands::Divine {
            text,
            at,
            seed,
            json,
        } => commands::divine::run(&text, at.as_deref(), seed, offset, json),
        Commands::Prompt { text, at, seed } => {
            commands::prompt::run(&text, at.as_deref(), seed, offset)
        }
        Commands::Reply {
            text,
            interpretation,
            at,
            seed,
        } => commands::reply::run(&text, &interpretation, at.as_deref(), seed, offset),
        Commands::Analyse {
            upper,
            lower,
            host,
            month,
            json,
        } => commands::analyse::run(upper, lower, &host, month, json),
        Commands::Trigrams => commands::tables::trigrams(),
        Commands::Hexagrams { name } => commands::tables::hexagrams(name.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
