use std::process;

use clap::Parser;
use serde::Serialize;

use overworld_generator::{ascii, map_export, world};

#[derive(Parser, Debug)]
#[command(name = "overworld_generator")]
#[command(about = "Generate procedural overworld maps with settlements and roads")]
struct Args {
    /// Width of the map in tiles
    #[arg(short = 'W', long, default_value = "47")]
    width: usize,

    /// Height of the map in tile rows
    #[arg(short = 'H', long, default_value = "63")]
    height: usize,

    /// Random seed (uses random seed if not specified)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of settlements to place
    #[arg(long, default_value = "35")]
    settlements: usize,

    /// Minimum Manhattan distance between settlements
    #[arg(long, default_value = "6")]
    spacing: i32,

    /// Print the map as ASCII to stdout
    #[arg(long)]
    ascii: bool,

    /// Export the map to a PNG file
    #[arg(long)]
    png: Option<String>,

    /// Export a JSON summary (seed, report, settlements)
    #[arg(long)]
    json: Option<String>,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    width: usize,
    height: usize,
    report: world::GenerationReport,
    settlements: Vec<&'a overworld_generator::settlements::Settlement>,
}

fn main() {
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(rand::random);
    println!("Generating overworld with seed: {}", seed);
    println!("Map size: {}x{}", args.width, args.height);

    let grid = match world::generate(args.width, args.height, seed, args.settlements, args.spacing)
    {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("Generation failed: {}", err);
            process::exit(1);
        }
    };

    let report = grid.report;
    println!(
        "Placed {} of {} settlements",
        report.settlements_placed, report.settlements_requested
    );
    if report.settlements_placed < report.settlements_requested {
        eprintln!(
            "Warning: only {} settlement sites satisfied the spacing constraint",
            report.settlements_placed
        );
    }

    if args.ascii {
        print!("{}", ascii::render_map(&grid));
        print!("{}", ascii::legend());
    }

    if let Some(path) = &args.png {
        match map_export::export_png(&grid, path) {
            Ok(()) => println!("Exported map to {}", path),
            Err(err) => {
                eprintln!("PNG export failed: {}", err);
                process::exit(1);
            }
        }
    }

    if let Some(path) = &args.json {
        let summary = Summary {
            seed,
            width: grid.width,
            height: grid.height,
            report,
            settlements: grid.settlements().collect(),
        };
        let result = serde_json::to_string_pretty(&summary)
            .map_err(|e| e.to_string())
            .and_then(|text| std::fs::write(path, text).map_err(|e| e.to_string()));
        match result {
            Ok(()) => println!("Exported summary to {}", path),
            Err(err) => {
                eprintln!("JSON export failed: {}", err);
                process::exit(1);
            }
        }
    }
}
