//! `trackprobe` command line.
//!
//! Browse a CSV dataset and resolve one of its tracks against the catalog.

use clap::{Parser, Subcommand};
use log::{debug, LevelFilter};
use std::path::PathBuf;
use std::process::ExitCode;

use trackprobe::canonical::CanonicalTrack;
use trackprobe::config::{
    CatalogConfig, DEFAULT_ACCOUNTS_URL, DEFAULT_API_URL, DEFAULT_MARKET, ENV_ACCOUNTS_URL,
    ENV_API_URL, ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_MARKET,
};
use trackprobe::dataset::Dataset;
use trackprobe::links;
use trackprobe::resolver::{Resolution, Resolver};

const BAR_WIDTH: usize = 30;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the distinct artists of a dataset
    Artists {
        /// CSV file with `artist` and `track_name` columns
        #[arg(short, long, default_value = "songs.csv")]
        dataset: PathBuf,
    },
    /// List the distinct tracks of one artist
    Tracks {
        #[arg(short, long, default_value = "songs.csv")]
        dataset: PathBuf,
        #[arg(short, long)]
        artist: String,
    },
    /// Show dataset statistics and a preview of its first rows
    Stats {
        #[arg(short, long, default_value = "songs.csv")]
        dataset: PathBuf,
        /// Number of preview rows
        #[arg(long, default_value_t = 20)]
        rows: usize,
    },
    /// Resolve a track against the catalog and show its audio features
    Resolve {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        artist: String,
        #[arg(long, env = ENV_CLIENT_ID, hide_env_values = true)]
        client_id: Option<String>,
        #[arg(long, env = ENV_CLIENT_SECRET, hide_env_values = true)]
        client_secret: Option<String>,
        #[arg(long, env = ENV_MARKET, default_value = DEFAULT_MARKET)]
        market: String,
        #[arg(long, env = ENV_API_URL, default_value = DEFAULT_API_URL)]
        api_url: String,
        #[arg(long, env = ENV_ACCOUNTS_URL, default_value = DEFAULT_ACCOUNTS_URL)]
        accounts_url: String,
        /// Print the resolution as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut clog = colog::default_builder();
    clog.filter(None, level_for(cli.verbose));
    clog.init();

    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn level_for(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

async fn run(command: Commands) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Artists { dataset } => {
            let dataset = Dataset::from_path(&dataset)?;
            for artist in dataset.artists() {
                println!("{}", artist);
            }
        }
        Commands::Tracks { dataset, artist } => {
            let dataset = Dataset::from_path(&dataset)?;
            for track in dataset.tracks_for(&artist) {
                println!("{}", track);
            }
        }
        Commands::Stats { dataset, rows } => {
            let dataset = Dataset::from_path(&dataset)?;
            print_stats(&dataset, rows);
        }
        Commands::Resolve {
            title,
            artist,
            client_id,
            client_secret,
            market,
            api_url,
            accounts_url,
            json,
        } => {
            // Missing credentials surface as an unavailable client from the resolver.
            let config = CatalogConfig::new(
                client_id.as_deref().unwrap_or_default(),
                client_secret.as_deref().unwrap_or_default(),
            )
            .market(&market)
            .api_url(&api_url)
            .accounts_url(&accounts_url);
            debug!("using {:?}", config);

            let resolution = Resolver::new(config).resolve(&title, &artist).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&resolution)?);
            } else {
                print_resolution(&resolution);
            }
        }
    }
    Ok(())
}

fn print_stats(dataset: &Dataset, rows: usize) {
    let summary = dataset.summary();
    println!("Total tracks:    {}", summary.total_tracks);
    println!("Unique artists:  {}", summary.unique_artists);
    match summary.average_popularity {
        Some(popularity) => println!("Avg popularity:  {:.1}", popularity),
        None => println!("Avg popularity:  N/A"),
    }
    match summary.unique_albums {
        Some(albums) => println!("Unique albums:   {}", albums),
        None => println!("Unique albums:   N/A"),
    }

    println!();
    for row in dataset.head(rows) {
        println!("{} - {}", row.artist, row.track_name);
    }
}

fn print_resolution(resolution: &Resolution) {
    let track = &resolution.track;
    if let Some(advisory) = resolution.advisory() {
        println!("! {}", advisory);
        println!();
    }

    print_track(track);
    println!();

    let features = &track.audio_features;
    for (label, value) in features.proportions().iter() {
        println!("{:<17}{} {:>5.1}%", label, bar(*value), value);
    }
    println!("{:<17}{:.0} BPM", "Tempo", features.tempo);
    println!("{:<17}{:.1} dB", "Loudness", features.loudness);
    println!("{:<17}{} {}", "Key", features.key_label(), features.mode_label());
    println!("{:<17}{}/4", "Time signature", features.time_signature);
    println!();

    println!("Listen on:");
    println!("  catalog        {}", track.external_url);
    if !track.has_preview() {
        println!("  player         {}", links::embed_url(&track.id));
    }
    println!("  video search   {}", track.alternatives.video_search);
    println!("  music search   {}", track.alternatives.music_search);
    println!("  audio search   {}", track.alternatives.audio_search);
}

fn print_track(track: &CanonicalTrack) {
    println!("{}", track.name);
    println!("by {}", track.artist);
    println!("Album:        {}", track.album);
    println!("Release date: {}", track.release_date);
    println!("Popularity:   {}/100", track.popularity);
    println!("Duration:     {}", track.duration_label());
    if let Some(preview) = &track.preview_url {
        println!("Preview:      {}", preview);
    }
    if let Some(image) = &track.album_image {
        println!("Album art:    {}", image);
    }
}

fn bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
