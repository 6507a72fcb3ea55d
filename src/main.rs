use RUNE_STRING::{Args, Command, Payload, RuneStringData, deserialize, inspect, serialize_with_version};
use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, debug, info};
use std::fs;

fn main() -> Result<()> {
    let args = Args::parse();

    let mut logger = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if args.verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    match args.command {
        Command::Encode { chart, version } => {
            info!("Reading chart: '{}'...", chart.display());
            let json = fs::read_to_string(&chart)
                .with_context(|| format!("Failed to read chart file {}", chart.display()))?;

            let data: RuneStringData = serde_json::from_str(&json)
                .with_context(|| format!("Failed to parse chart file {}", chart.display()))?;
            debug!("Loaded {}..!", data);

            let rune_string = serialize_with_version(&Payload::V1(data), version)?;
            println!("{}", rune_string);
        }
        Command::Decode { rune_string, compact } => {
            let payload = deserialize(rune_string.trim())?;
            debug!("Decoded {:?} rune string..!", payload.version());

            let json = match &payload {
                Payload::V1(data) if compact => serde_json::to_string(data)?,
                Payload::V1(data) => serde_json::to_string_pretty(data)?,
            };
            println!("{}", json);
        }
        Command::Inspect { rune_string } => {
            let stats = inspect(rune_string.trim())?;

            info!("Version: {} ({} bytes)", stats.version.to_byte(), stats.byte_len);
            info!("Single runes: {}", stats.single_runes);
            info!("Double runes: {} ({} runes)", stats.double_runes, 2 * stats.double_runes);
            info!(
                "Multi runes: {} ({} runes)",
                stats.multi_runes, stats.multi_rune_objects
            );
            info!("BPM changes: {}", stats.bpm_changes);
            info!("Total runes: {}", stats.total_runes());

            if stats.trailing_bytes > 0 {
                info!("Trailing bytes: {}", stats.trailing_bytes);
            }
        }
    }

    Ok(())
}
