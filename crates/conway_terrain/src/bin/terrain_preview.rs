//! # Terrain Preview
//!
//! Command-line tool that generates one map and prints it as text.

use conway_terrain::{GeneratorConfig, GridCoord, PlacementLog, SeededGenerator, TerrainResult};

// Used when no config file is given.
const DEFAULT_WIDTH: i32 = 64;
const DEFAULT_HEIGHT: i32 = 32;
const DEFAULT_STEPS: u32 = 2;

fn main() {
    println!("╔══════════════════════════════════════════════════════════════════╗");
    println!("║         CONWAY TERRAIN PREVIEW                                   ║");
    println!("╚══════════════════════════════════════════════════════════════════╝");
    println!();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        println!("Usage: terrain_preview [config.toml] [--seed <n>]");
        println!();
        println!("Options:");
        println!("  --seed <n>   Override the configured seed");
        return;
    }

    let seed_override = match parse_seed(&args) {
        Ok(seed) => seed,
        Err(message) => {
            println!("Error: {message}");
            std::process::exit(1);
        }
    };

    let config_path = args
        .iter()
        .enumerate()
        .find(|(i, a)| !a.starts_with("--") && (*i == 0 || args[i - 1] != "--seed"))
        .map(|(_, a)| a.as_str());

    if let Err(e) = run(config_path, seed_override) {
        println!("Error: {e}");
        std::process::exit(1);
    }
}

/// Reads `--seed <n>` from the arguments, if present.
fn parse_seed(args: &[String]) -> Result<Option<u64>, String> {
    let Some(i) = args.iter().position(|a| a == "--seed") else {
        return Ok(None);
    };
    let value = args.get(i + 1).ok_or("--seed needs a value")?;
    value
        .parse::<u64>()
        .map(Some)
        .map_err(|e| format!("invalid --seed value '{value}': {e}"))
}

/// Overlays `@` on the spawn cell of a rendered map.
fn mark_spawn(mut map: String, width: i32, spawn: GridCoord) -> String {
    // Rows are `width` cells plus a newline.
    let at = spawn.y as usize * (width as usize + 1) + spawn.x as usize;
    map.replace_range(at..=at, "@");
    map
}

fn run(config_path: Option<&str>, seed_override: Option<u64>) -> TerrainResult<()> {
    let mut config = match config_path {
        Some(path) => {
            println!("Loading config: {path}");
            GeneratorConfig::load(path)?
        }
        None => GeneratorConfig::canonical(DEFAULT_WIDTH, DEFAULT_HEIGHT, DEFAULT_STEPS),
    };
    if let Some(seed) = seed_override {
        config = config.with_seed(seed);
    }

    let mut generator = SeededGenerator::seeded(&config)?;
    let mut level = PlacementLog::new();
    let report = generator.generate(&config.plan(), &mut level)?;

    print!("{}", mark_spawn(generator.render_ascii(), config.width, report.spawn));

    println!();
    println!("┌─ SUMMARY ──────────────────────────────────────────────────────┐");
    println!("│ Size:        {}x{}", config.width, config.height);
    println!(
        "│ Seed:        {}",
        config
            .seed
            .map_or_else(|| "default".to_string(), |s| s.to_string())
    );
    println!("│ Steps:       {}", config.automaton.steps);
    println!("│ Floors:      {}", report.floors);
    println!("│ Walls:       {}", report.walls);
    println!("│ Spawn:       ({}, {})", report.spawn.x, report.spawn.y);
    println!("│ Placements:  {}", level.placements().len());
    println!("└────────────────────────────────────────────────────────────────┘");

    Ok(())
}
