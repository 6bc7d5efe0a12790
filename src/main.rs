use std::ops::RangeInclusive;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tokio::task::JoinSet;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use teleplay::io::format_roster;
use teleplay::{
    CastConfig, EpisodeId, EpisodeParse, EpisodeReport, EpisodeSummary, FailedEpisode, FormatConfig,
    FormatTable, NameConfig, NameNormalizer, RunReport, episodes_per_season, parse_episode,
    read_script, script_path,
};

#[derive(Parser)]
#[command(name = "teleplay")]
#[command(author, version, about = "Episodic transcript parser", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every listed episode and report per-character dialogue
    Parse {
        /// Format table (season_num episode_num character_format scene_format)
        #[arg(short, long, default_value = "formats.txt")]
        formats: PathBuf,

        /// Directory holding sNNeNN.txt scripts
        #[arg(short, long, default_value = "scripts")]
        scripts: PathBuf,

        /// Seasons to parse, e.g. "1" or "1-8"
        #[arg(long, default_value = "1-8", value_parser = parse_range)]
        seasons: RangeInclusive<u32>,

        /// Episodes to parse within each season, e.g. "1-10"
        #[arg(long, default_value = "1-10", value_parser = parse_range)]
        episodes: RangeInclusive<u32>,

        /// JSON file overriding the built-in name tables
        #[arg(long)]
        names: Option<PathBuf>,

        /// JSON file overriding the built-in cast lists and deaths
        #[arg(long)]
        cast: Option<PathBuf>,

        /// Output file for the machine-readable report (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Number of characters to list in the summary
        #[arg(long, default_value = "20")]
        top: usize,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Parse a single script file and print its summary
    Episode {
        /// Script file
        #[arg(short, long)]
        input: PathBuf,

        /// Character format tag, e.g. "CHARACTER_NAME:" or "**CHARACTER_NAME:**"
        #[arg(long)]
        character_format: String,

        /// Scene format tag, e.g. "CUT" or "INT/EXT"
        #[arg(long, default_value = "NONE")]
        scene_format: String,

        #[arg(long, default_value = "1")]
        season: u32,

        #[arg(long, default_value = "1")]
        episode: u32,

        /// JSON file overriding the built-in name tables
        #[arg(long)]
        names: Option<PathBuf>,

        /// Verbose output (also prints every line)
        #[arg(short, long)]
        verbose: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            formats,
            scripts,
            seasons,
            episodes,
            names,
            cast,
            output,
            top,
            verbose,
        } => {
            setup_logging(verbose);
            let cast = match cast {
                Some(path) => CastConfig::from_json_file(&path)?,
                None => CastConfig::default(),
            };
            parse_run(formats, scripts, seasons, episodes, names, &cast, output, top).await
        }
        Commands::Episode {
            input,
            character_format,
            scene_format,
            season,
            episode,
            names,
            verbose,
        } => {
            setup_logging(verbose);
            let format = FormatConfig::from_tags(&character_format, &scene_format)?;
            parse_single(
                input,
                format,
                EpisodeId::new(season, episode),
                names,
                verbose,
            )
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

/// Accepts "N" or "A-B"
fn parse_range(value: &str) -> Result<RangeInclusive<u32>> {
    let (start, end) = match value.split_once('-') {
        Some((start, end)) => (start.trim().parse()?, end.trim().parse()?),
        None => {
            let single = value.trim().parse()?;
            (single, single)
        }
    };
    if start > end {
        bail!("range {} is empty", value);
    }
    Ok(start..=end)
}

fn load_normalizer(names: Option<PathBuf>) -> Result<NameNormalizer> {
    let config = match names {
        Some(path) => NameConfig::from_json_file(&path)?,
        None => NameConfig::default(),
    };
    Ok(NameNormalizer::new(&config))
}

async fn parse_run(
    formats: PathBuf,
    scripts: PathBuf,
    seasons: RangeInclusive<u32>,
    episodes: RangeInclusive<u32>,
    names: Option<PathBuf>,
    cast: &CastConfig,
    output: Option<PathBuf>,
    top: usize,
) -> Result<()> {
    info!("Loading format table from {:?}", formats);
    let table = FormatTable::from_path(&formats)?;
    let normalizer = Arc::new(load_normalizer(names)?);

    let mut failed = Vec::new();
    let mut tasks = JoinSet::new();

    for season_num in seasons {
        for episode_num in episodes.clone() {
            let id = EpisodeId::new(season_num, episode_num);

            // Not every season has every episode number.
            let Some(lookup) = table.lookup(id) else {
                continue;
            };
            let format = match lookup {
                Ok(format) => format,
                Err(e) => {
                    warn!("Skipping {}: {}", id, e);
                    failed.push(FailedEpisode {
                        key: id.key(),
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let path = script_path(&scripts, id);
            let normalizer = Arc::clone(&normalizer);
            tasks.spawn_blocking(move || {
                let parsed = if format.has_script() {
                    read_script(&path).and_then(|lines| {
                        parse_episode(&lines, &format, &normalizer, id)
                            .with_context(|| format!("Failed to parse {:?}", path))
                    })
                } else {
                    parse_episode(std::iter::empty::<&str>(), &format, &normalizer, id)
                        .map_err(Into::into)
                };
                (id, format, parsed)
            });
        }
    }

    let mut reports = Vec::new();
    let mut skipped = Vec::new();
    while let Some(joined) = tasks.join_next().await {
        let (id, format, parsed) = joined.context("Episode task panicked")?;
        match parsed {
            Ok(EpisodeParse::Complete(transcript)) => {
                reports.push(EpisodeReport::new(transcript, format));
            }
            Ok(EpisodeParse::NoScript(_)) => skipped.push(id.key()),
            Err(e) => {
                warn!("Episode {} failed: {:#}", id, e);
                failed.push(FailedEpisode {
                    key: id.key(),
                    reason: format!("{:#}", e),
                });
            }
        }
    }

    reports.sort_by_key(|r| r.transcript.id);
    skipped.sort();
    failed.sort_by(|a, b| a.key.cmp(&b.key));

    let report = RunReport::new(reports, skipped, failed, cast);
    let parsed_ids: Vec<EpisodeId> = report.episodes.iter().map(|e| e.transcript.id).collect();

    println!("Run Summary");
    println!("===========");
    for (season_num, count) in episodes_per_season(&parsed_ids) {
        println!("Season {}: {} episodes", season_num, count);
    }
    println!(
        "{} episodes parsed, {} lines in {} scenes",
        report.metadata.episodes_parsed, report.metadata.total_lines, report.metadata.total_scenes
    );
    if !report.metadata.skipped.is_empty() {
        println!("No script yet: {}", report.metadata.skipped.join(", "));
    }
    for failure in &report.metadata.failed {
        println!("Failed {}: {}", failure.key, failure.reason);
    }
    for (label, profiles) in [
        ("Main characters", report.roster.main_characters(cast)),
        ("Minor characters", report.roster.minor_characters(cast)),
    ] {
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        println!("{}: {}", label, names.join(", "));
    }
    println!();
    print!("{}", format_roster(&report.roster, top));

    if let Some(path) = output {
        report.write_json(&path)?;
        info!("Report written to {:?}", path);
    }

    Ok(())
}

fn parse_single(
    input: PathBuf,
    format: FormatConfig,
    id: EpisodeId,
    names: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let normalizer = load_normalizer(names)?;
    let lines = read_script(&input)?;
    let parsed = parse_episode(&lines, &format, &normalizer, id)
        .with_context(|| format!("Failed to parse {:?}", input))?;

    if parsed.is_skipped() {
        println!("{} has no script ({}).", id, format.character_format);
        return Ok(());
    }

    let summary = EpisodeSummary::new(parsed.transcript());
    print!("{}", summary.format(verbose));
    println!();
    print!("{}", summary.format_scenes());

    Ok(())
}
