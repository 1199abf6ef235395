use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use harmony::{catalog, quick_harmony, HarmonyMode, Spelling};
use harmony_helper::{harmonize_file, load_melody, render, CliError, OutputFormat};

#[derive(Subcommand)]
enum Command {
    /// Harmonize a melody file (YAML or JSON)
    Generate {
        file: PathBuf,
        /// Harmony type; overrides the file's `harmony_type`
        #[arg(short, long)]
        mode: Option<String>,
        /// Spell black keys with flats instead of sharps
        #[arg(long)]
        flats: bool,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
    /// Harmonize a single pitch
    Quick {
        pitch: String,
        #[arg(short, long, default_value = "third")]
        mode: String,
        #[arg(long)]
        flats: bool,
    },
    /// List the available harmony types
    Types {
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },
}

#[derive(Parser)]
#[command(name = "harmony")]
#[command(about = "Generate a harmony line for a melody")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn spelling(flats: bool) -> Spelling {
    if flats {
        Spelling::Flats
    } else {
        Spelling::Sharps
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Generate {
            file,
            mode,
            flats,
            output,
        } => {
            let melody = load_melody(&file)?;
            let response = harmonize_file(&melody, mode.as_deref(), spelling(flats))?;
            println!("{}", render(&response, output)?);
        }
        Command::Quick { pitch, mode, flats } => {
            let harmony_mode = mode.parse::<HarmonyMode>()?;
            match quick_harmony(&pitch, harmony_mode, spelling(flats))? {
                Some(note) => println!("{} -> {} ({})", pitch, note.pitch, harmony_mode),
                None => println!("{}: skipped, not a readable pitch", pitch),
            }
        }
        Command::Types { output } => {
            println!("{}", render(&catalog(), output)?);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
