use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "RUNE_STRING",
    about = "Encode and decode rhythm game charts as rune strings!"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Prints extra information to the terminal.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a JSON chart (`{"runes": [...], "bpm_changes": [...]}`) into a rune string.
    Encode {
        /// Path to the chart JSON file.
        chart: PathBuf,

        /// Format version byte to encode with.
        #[arg(long = "version-byte", default_value_t = 1)]
        version: u8,
    },

    /// Decode a rune string and print the chart as JSON.
    Decode {
        /// The rune string to decode.
        rune_string: String,

        /// Print compact JSON on a single line.
        #[arg(short, long, default_value_t = false)]
        compact: bool,
    },

    /// Print the envelope and section statistics of a rune string.
    Inspect {
        /// The rune string to inspect.
        rune_string: String,
    },
}
