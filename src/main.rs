//! # Delve Main Entry Point
//!
//! Builds a dungeon session from command-line flags and plays it in the terminal.

use clap::Parser;
use delve::{
    help_text, lookup, AsciiDisplay, DungeonResult, DungeonSession, DungeonSnapshot, GameEvent,
    GenerationConfig, InputHandler, InputSource, MonsterTable, NavState, Party, PlayerInput,
    Renderer, ScriptedInput, StdinInput,
};
use log::{error, info};
use std::path::PathBuf;

/// Command line arguments for Delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A turn-based grid dungeon crawler with guaranteed-connected procedural maps")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of coarse grid rows
    #[arg(long)]
    rows: Option<usize>,

    /// Number of coarse grid columns
    #[arg(long)]
    cols: Option<usize>,

    /// Probability that any wall slot holds a wall
    #[arg(long)]
    wall_density: Option<f64>,

    /// JSON generation config; flags override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON monster table replacing the built-in one
    #[arg(long)]
    monsters: Option<PathBuf>,

    /// Party as level:count pairs, e.g. 3:4,5:1
    #[arg(long)]
    party: Option<String>,

    /// Highest passive perception in the party
    #[arg(long)]
    passive_perception: Option<i32>,

    /// Place traps already revealed
    #[arg(long)]
    visible_traps: bool,

    /// Generate doors already open
    #[arg(long)]
    doors_open: bool,

    /// Do not place doors
    #[arg(long)]
    no_doors: bool,

    /// Accept hjkl for movement
    #[arg(long)]
    vi_keys: bool,

    /// Print the revealed dungeon as JSON and exit
    #[arg(long)]
    dump_json: bool,

    /// Read commands from a file, one per line, instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() {
    let args = Args::parse();
    initialize_logging(&args.log_level);

    if let Err(e) = run(&args) {
        error!("{e}");
        eprintln!("delve: {e}");
        std::process::exit(1);
    }
}

fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();
}

fn build_config(args: &Args) -> DungeonResult<GenerationConfig> {
    let mut config = match &args.config {
        Some(path) => GenerationConfig::from_json_file(path)?,
        None => GenerationConfig::new(rand::random()),
    };

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    if let Some(density) = args.wall_density {
        config.wall_density = density;
    }
    if let Some(party) = &args.party {
        config.party = Party::parse(party)?;
    }
    if let Some(pp) = args.passive_perception {
        config.passive_perception = pp;
    }
    config.visible_traps |= args.visible_traps;
    config.doors_open |= args.doors_open;
    if args.no_doors {
        config.include_doors = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> DungeonResult<()> {
    let config = build_config(args)?;
    info!("Starting Delve v{} with seed {}", delve::VERSION, config.seed);

    let mut session = match &args.monsters {
        Some(path) => DungeonSession::with_dataset(config, &MonsterTable::from_json_file(path)?)?,
        None => DungeonSession::new(config)?,
    };

    if args.dump_json {
        println!("{}", DungeonSnapshot::capture(&session, true).to_json()?);
        return Ok(());
    }

    let mut input: Box<dyn InputSource> = match &args.script {
        Some(path) => Box::new(ScriptedInput::new(
            std::fs::read_to_string(path)?
                .lines()
                .map(str::to_string)
                .collect::<Vec<_>>(),
        )),
        None => Box::new(StdinInput),
    };
    let handler = if args.vi_keys {
        InputHandler::with_vi_keys()
    } else {
        InputHandler::new()
    };
    let mut display = AsciiDisplay::stdout();

    play(&mut session, input.as_mut(), &handler, &mut display)?;

    display.render(&DungeonSnapshot::capture(&session, true))?;
    Ok(())
}

/// Runs the prompt loop until the run ends, the player quits or input runs out.
fn play(
    session: &mut DungeonSession,
    input: &mut dyn InputSource,
    handler: &InputHandler,
    display: &mut impl Renderer,
) -> DungeonResult<()> {
    show_events(display, &session.begin_turn()?)?;

    while !session.is_finished() {
        display.render(&DungeonSnapshot::capture(session, false))?;

        if *session.state() == NavState::Idle {
            let Some(line) = input.next_line("Paused. Press Enter to resume or q to quit.")? else {
                break;
            };
            if lookup(&line) == Some(PlayerInput::Quit) {
                break;
            }
            show_events(display, &session.begin_turn()?)?;
            continue;
        }

        let prompt = session.state().prompt().unwrap_or("Your move (? for help):");
        let Some(line) = input.next_line(prompt)? else {
            break;
        };

        match handler.parse(&line) {
            Ok(PlayerInput::Help) => display.show_message(&help_text())?,
            Ok(PlayerInput::Quit) => break,
            Ok(command) => show_events(display, &session.handle_input(command)?)?,
            Err(e) => display.show_message(&e.to_string())?,
        }
    }

    Ok(())
}

fn show_events(display: &mut impl Renderer, events: &[GameEvent]) -> DungeonResult<()> {
    for event in events {
        display.show_message(&event.message())?;
    }
    Ok(())
}
