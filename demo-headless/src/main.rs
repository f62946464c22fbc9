use clap::Parser;
use flow_lawn_core::{
    builtin_level, builtin_levels, ActionOutcome, FlowConfig, FlowSimulator, GameSession,
    GridPos, LevelConfig, LevelError, Liquid, LiquidGrid, PlayerAction, Surface,
    MAX_FLOW_PASSES,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Headless driver for the liquid-flow puzzle
#[derive(Parser, Debug)]
#[command(name = "flow-lawn-demo")]
#[command(about = "Place liquid on a level, settle it and print the verdict", long_about = None)]
struct Args {
    /// Built-in level number (1-5)
    #[arg(short, long, default_value_t = 1)]
    level: u32,

    /// Load the level from a JSON file instead
    #[arg(long)]
    level_file: Option<PathBuf>,

    /// Entry-row columns to drop water into
    #[arg(short, long, value_delimiter = ',')]
    water: Vec<usize>,

    /// Entry-row columns to drop magma into
    #[arg(short, long, value_delimiter = ',')]
    magma: Vec<usize>,

    /// Maximum flow passes per simulation run
    #[arg(long, default_value_t = MAX_FLOW_PASSES)]
    max_passes: usize,

    /// Print the grid after every flow pass
    #[arg(short, long)]
    steps: bool,

    /// Write the loaded level to a JSON file
    #[arg(long)]
    save: Option<PathBuf>,

    /// List the built-in levels and exit
    #[arg(long)]
    list: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    if args.list {
        for level in builtin_levels() {
            println!(
                "{:2}  {}  (water {}, magma {})",
                level.number, level.name, level.supply.water, level.supply.magma
            );
        }
        return ExitCode::SUCCESS;
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(2)
        }
    }
}

/// Play one level; returns whether it was won
fn run(args: &Args) -> Result<bool, LevelError> {
    let level = match &args.level_file {
        Some(path) => LevelConfig::load(path)?,
        None => builtin_level(args.level)?,
    };
    if let Some(path) = &args.save {
        level.save(path)?;
        println!("Saved level {} to {}", level.number, path.display());
    }

    println!("=== Level {}: {} ===\n", level.number, level.name);

    let flow = FlowConfig::with_max_passes(args.max_passes);
    let Some(mut session) = GameSession::new(vec![level], flow) else {
        return Ok(false);
    };

    for (liquid, cols) in [(Liquid::Water, &args.water), (Liquid::Magma, &args.magma)] {
        if cols.is_empty() {
            continue;
        }
        session = session.apply(&PlayerAction::SelectLiquid(liquid)).0;
        for &col in cols {
            let (next, outcome) = session.apply(&PlayerAction::toggle(col));
            session = next;
            if !matches!(outcome, ActionOutcome::Placed(..)) {
                warn!("Could not place {} at column {}", liquid, col);
            }
        }
    }

    println!("Placed:");
    print_grid(session.grid());

    if args.steps {
        let mut passes = FlowSimulator::new(flow).passes(session.grid());
        while let Some(report) = passes.next() {
            println!("Pass {:2}: {} cells wetted", report.pass, report.wetted.len());
            if report.changed() {
                print_grid(passes.snapshot());
            }
        }
    }

    let (session, outcome) = session.apply(&PlayerAction::Submit);
    let ActionOutcome::Simulated { won, passes } = outcome else {
        return Ok(false);
    };

    println!("Settled after {passes} passes:");
    print_grid(session.grid());

    let supply = session.supply();
    println!("Supply left: water {}, magma {}", supply.water, supply.magma);

    if won {
        println!("\n✓ PASS: every rule holds");
    } else {
        println!("\n✗ FAIL:");
        if let Some(evaluation) = session.evaluation() {
            for violation in evaluation.violations() {
                println!("  {} {}", violation.pos, violation.rule);
            }
        }
    }

    Ok(won)
}

fn print_grid(grid: &LiquidGrid) {
    let size = grid.size();
    for row in 0..size {
        let line: String = (0..size)
            .map(|col| {
                let pos = GridPos::new(row, col);
                match (grid.liquid(pos), grid.surface(pos)) {
                    (Some(Liquid::Water), _) => '~',
                    (Some(Liquid::Magma), _) => '*',
                    (None, Some(surface)) => surface_glyph(surface),
                    (None, None) => ' ',
                }
            })
            .collect();
        println!("  {line}");
    }
    println!();
}

fn surface_glyph(surface: Surface) -> char {
    match surface {
        Surface::Empty => '.',
        Surface::Floor => '=',
        Surface::Grass => '"',
        Surface::Fire => '^',
        Surface::Gray => '#',
        Surface::Teleporter => 'T',
    }
}
