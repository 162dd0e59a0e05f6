mod draw;

use dungeon_core::{
    DockBuilderConfig, DockLayout, RoomPool, create_connected_layout, create_layout,
    layout::SymbolResolver,
    templates::{RoomTemplate, RoomTemplateSet},
};

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rayon::prelude::*;
use svg::save as save_as_svg;
use tracing::event;

const BUILTIN_TEMPLATES: [(&str, &[&str]); 3] = [
    (
        "vault",
        &[
            "#########",
            "#.......#",
            "#.......#",
            "#.......+",
            "#.......#",
            "#.......#",
            "#########",
        ],
    ),
    (
        "crossroads",
        &[
            "####+####",
            "#.......#",
            "#.......#",
            "+.......+",
            "#.......#",
            "#.......#",
            "####+####",
        ],
    ),
    (
        "gallery",
        &[
            "#####+#####",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#.........#",
            "#####+#####",
        ],
    ),
];

#[derive(Parser, Debug)]
#[command(version, long_about = None)]
struct Args {
    /// Number of columns in the grid
    #[arg(short, long, default_value_t = 40)]
    columns: u32,

    /// Number of rows in the grid
    #[arg(short, long, default_value_t = 30)]
    rows: u32,

    /// Generator seed, random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Copies of each built-in template to dock before generating rooms
    #[arg(short, long, default_value_t = 0)]
    dock: usize,

    /// Retry with the following seeds until every room is reachable
    #[arg(long, value_name = "ATTEMPTS")]
    connected: Option<u32>,

    #[command(flatten)]
    config: DockBuilderConfig,

    /// Print the layout as JSON instead of ASCII
    #[arg(long)]
    json: bool,

    /// Also save the layout as an SVG drawing
    #[arg(long, value_name = "PATH")]
    svg: Option<PathBuf>,

    /// Generate this many consecutive seeds in parallel and print a summary
    #[arg(long, value_name = "COUNT")]
    batch: Option<u64>,

    /// Log pipeline progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    let pool = build_pool(args.dock)?;
    let seed = args.seed.unwrap_or_else(rand::random);

    if let Some(count) = args.batch {
        return run_batch(&args, &pool, seed, count);
    }

    let layout = generate(&args, &pool, seed)?;

    event!(
        tracing::Level::INFO,
        "Seed {}: {} rooms, {} corridors, {} skipped",
        seed,
        layout.rooms().len(),
        layout.corridors().len(),
        layout.skipped().len()
    );

    if args.json {
        let json = serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?;
        println!("{}", json);
    } else {
        println!("seed: {}", seed);
        print!("{}", layout.assemble(&SymbolResolver).render());
    }

    if let Some(path) = args.svg.as_ref() {
        save_as_svg(path, &draw::draw_layout(&layout))
            .with_context(|| format!("Failed to save SVG to {}", path.display()))?;
        eprintln!("Saved layout drawing to: {}", path.display());
    }

    Ok(())
}

fn build_pool(copies: usize) -> anyhow::Result<RoomPool> {
    let templates = BUILTIN_TEMPLATES
        .iter()
        .map(|(name, rows)| RoomTemplate::from_rows(*name, *rows))
        .collect::<Result<RoomTemplateSet, _>>()
        .context("Built-in templates are malformed")?;

    let names = templates
        .names()
        .flat_map(|name| std::iter::repeat_n(name, copies))
        .collect::<Vec<_>>();

    Ok(RoomPool::from_templates(&templates, &names)?)
}

fn generate(args: &Args, pool: &RoomPool, seed: u64) -> dungeon_core::Result<DockLayout> {
    match args.connected {
        Some(attempts) => {
            create_connected_layout(args.columns, args.rows, &args.config, pool, seed, attempts)
        }
        None => create_layout(args.columns, args.rows, &args.config, pool.clone(), seed),
    }
}

fn run_batch(args: &Args, pool: &RoomPool, first_seed: u64, count: u64) -> anyhow::Result<()> {
    let summaries = (0..count)
        .into_par_iter()
        .map(|offset| {
            let seed = first_seed.wrapping_add(offset);

            generate(args, pool, seed).map(|layout| {
                (
                    seed,
                    layout.rooms().len(),
                    layout.corridors().len(),
                    layout.skipped().len(),
                    layout.unreachable_rooms().len(),
                )
            })
        })
        .collect::<Vec<_>>();

    let mut connected = 0;

    for summary in summaries {
        match summary {
            Ok((seed, rooms, corridors, skipped, unreachable)) => {
                if unreachable == 0 {
                    connected += 1;
                }

                println!(
                    "seed {:>20}: {:>3} rooms, {:>3} corridors, {:>3} skipped, {:>3} unreachable",
                    seed, rooms, corridors, skipped, unreachable
                );
            }
            Err(err) => println!("failed: {}", err),
        }
    }

    println!("{} of {} layouts fully connected", connected, count);

    Ok(())
}
