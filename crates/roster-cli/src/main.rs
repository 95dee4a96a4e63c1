//! The `roster` command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "roster", version, about = "Student record store with score statistics")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a student
    Add {
        #[arg(long)]
        id: String,

        /// Omit to store the student without a name
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        gender: String,

        #[arg(long, allow_hyphen_values = true)]
        age: i32,

        #[arg(long, allow_hyphen_values = true)]
        score: f64,
    },

    /// List all students
    List,

    /// Show one student
    Get {
        /// Student id
        id: String,
    },

    /// Remove every student with the given id
    Remove {
        /// Student id
        id: String,
    },

    /// Change fields of an existing student
    Update {
        /// Student id
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        gender: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        age: Option<i32>,

        #[arg(long, allow_hyphen_values = true)]
        score: Option<f64>,
    },

    /// Show score statistics
    Stats {
        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,

        /// Write the report to a file instead of stdout (json or markdown)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Render a saved JSON report instead of the current roster
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Export the roster as delimited text
    Export {
        /// Destination file
        path: PathBuf,

        /// Use the legacy single-line layout
        #[arg(long)]
        legacy: bool,
    },

    /// Import students from delimited text
    Import {
        /// Source file
        path: PathBuf,

        /// Keep existing students instead of replacing them
        #[arg(long)]
        append: bool,

        /// Abort on a malformed age or score instead of skipping the row
        #[arg(long)]
        strict: bool,
    },

    /// Create a starter roster.toml
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roster=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Add {
            id,
            name,
            gender,
            age,
            score,
        } => commands::add::execute(config, id, name, gender, age, score),
        Commands::List => commands::list::execute(config),
        Commands::Get { id } => commands::get::execute(config, &id),
        Commands::Remove { id } => commands::remove::execute(config, &id),
        Commands::Update {
            id,
            name,
            gender,
            age,
            score,
        } => commands::update::execute(config, &id, name, gender, age, score),
        Commands::Stats {
            format,
            output,
            input,
        } => commands::stats::execute(config, format, output, input),
        Commands::Export { path, legacy } => commands::export::execute(config, path, legacy),
        Commands::Import {
            path,
            append,
            strict,
        } => commands::import::execute(config, path, append, strict),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
