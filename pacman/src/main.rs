//! Pacman command line: play games, run single searches, count game trees, inspect layouts.

mod display;
mod runner;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use display::{Display, DisplayMode};
use log::info;
use pacman_agents::{
    build_ghosts, build_pacman, AgentKind, AgentOptions, EvaluationFunction, SearchStrategy,
};
use pacman_core::{layouts, perft_detailed, perft_divide, GameState, Layout};
use runner::{Game, Summary};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "pacman")]
#[command(version, about = "Adversarial search agents for Pacman", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play games against random ghosts and print a summary
    Play(PlayArgs),

    /// Run one search from a layout's start state
    Search(SearchArgs),

    /// Count the game tree below a layout's start state
    Perft(PerftArgs),

    /// Show a layout, or list the built-in layouts
    Layout {
        /// Built-in layout name
        name: Option<String>,
    },

    /// Evaluate a layout's start state
    Eval {
        #[command(flatten)]
        layout: LayoutArgs,

        /// Evaluation function; all of them when omitted
        #[arg(long)]
        eval_fn: Option<EvaluationFunction>,
    },
}

#[derive(Args, Debug)]
struct LayoutArgs {
    /// Built-in layout name
    #[arg(long, short = 'l', default_value = "minimaxClassic")]
    layout: String,

    /// Layout file, used instead of --layout
    #[arg(long)]
    layout_file: Option<PathBuf>,
}

impl LayoutArgs {
    fn load(&self) -> Result<Layout> {
        if let Some(path) = &self.layout_file {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read layout file {}", path.display()))?;
            return Layout::parse(&text)
                .with_context(|| format!("invalid layout file {}", path.display()));
        }

        layouts::load(&self.layout)
            .ok_or_else(|| {
                anyhow!(
                    "unknown layout '{}' (built-in layouts: {})",
                    self.layout,
                    layouts::NAMES.join(", ")
                )
            })?
            .with_context(|| format!("invalid built-in layout {}", self.layout))
    }
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Pacman agent (ReflexAgent, MinimaxAgent, AlphaBetaAgent, ExpectimaxAgent, RandomAgent)
    #[arg(long, short = 'p', default_value = "ReflexAgent")]
    pacman: AgentKind,

    /// Agent options, e.g. depth=3,evalFn=better
    #[arg(long, short = 'a')]
    agent_args: Option<AgentOptions>,

    /// Maximum number of ghosts; defaults to every ghost in the layout
    #[arg(long, short = 'k')]
    ghosts: Option<usize>,

    /// Number of games to play
    #[arg(long, short = 'n', default_value_t = 1)]
    games: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Rounds after which an unfinished game is abandoned
    #[arg(long, default_value_t = 1000)]
    max_moves: u32,

    /// Draw nothing while playing
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Draw plain text frames instead of redrawing the terminal
    #[arg(long, short = 't', conflicts_with = "quiet")]
    text: bool,

    /// Pause between frames, in milliseconds
    #[arg(long, default_value_t = 50)]
    frame_delay: u64,
}

#[derive(Args, Debug)]
struct SearchArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// minimax, alphabeta or expectimax; all of them when omitted
    #[arg(long, short = 's')]
    strategy: Option<SearchStrategy>,

    /// Search depth in plies
    #[arg(long, short = 'd', default_value_t = 2)]
    depth: u32,

    #[arg(long, default_value = "score")]
    eval_fn: EvaluationFunction,
}

#[derive(Args, Debug)]
struct PerftArgs {
    #[command(flatten)]
    layout: LayoutArgs,

    /// Number of full rounds to expand
    plies: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play(args),
        Commands::Search(args) => search(args),
        Commands::Perft(args) => perft(args),
        Commands::Layout { name } => show_layout(name),
        Commands::Eval { layout, eval_fn } => evaluate(layout, eval_fn),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let layout = args.layout.load()?;
    let options = args.agent_args.unwrap_or_default();
    let start = GameState::new(&layout, args.ghosts.unwrap_or(layout.ghost_starts.len()));
    let num_ghosts = start.num_agents() - 1;

    // Reject bad options before any game starts.
    build_pacman(args.pacman, &options, args.seed).context("invalid agent configuration")?;

    let mode = if args.quiet {
        DisplayMode::Quiet
    } else if args.text {
        DisplayMode::Text
    } else {
        DisplayMode::Terminal
    };
    let delay = if mode == DisplayMode::Quiet {
        Duration::ZERO
    } else {
        Duration::from_millis(args.frame_delay)
    };
    let mut display = Display::new(mode, delay);

    info!(
        "playing {} game(s) of {} with {} ghost(s)",
        args.games, args.pacman, num_ghosts
    );

    let mut summary = Summary::default();
    display.begin()?;
    for game_index in 0..args.games {
        let seed = args.seed.wrapping_add(game_index as u64 * 1000);
        let pacman = build_pacman(args.pacman, &options, seed)?;
        let ghosts = build_ghosts(num_ghosts, seed);

        let game = Game::new(start.clone(), pacman, ghosts, args.max_moves)?;
        let record = game.run(|state| Ok(display.draw(state)?));
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                display.finish()?;
                return Err(err.context(format!("game {} failed", game_index + 1)));
            }
        };
        summary.records.push(record);
    }
    display.finish()?;

    println!("{}", summary);
    Ok(())
}

fn search(args: SearchArgs) -> Result<()> {
    let state = GameState::from_layout(&args.layout.load()?);
    let strategies = match args.strategy {
        Some(strategy) => vec![strategy],
        None => SearchStrategy::ALL.to_vec(),
    };
    let evaluate = args.eval_fn.resolve::<GameState>();

    println!("{}\n", state);
    println!("Searching to depth {} with {}...", args.depth, args.eval_fn);

    for strategy in strategies {
        let start = Instant::now();
        let result = strategy.search(&state, args.depth, evaluate);
        let elapsed = start.elapsed();

        println!("\n{}", strategy);
        match result.best_action {
            Some(action) => println!("Best action: {}", action),
            None => println!("No legal actions available"),
        }
        println!("Value: {}", result.value);
        println!("Nodes: {}", result.nodes);
        println!("Time: {:.3}s", elapsed.as_secs_f64());
    }
    Ok(())
}

fn perft(args: PerftArgs) -> Result<()> {
    let state = GameState::from_layout(&args.layout.load()?);

    println!("Running perft({})...", args.plies);
    println!("{}\n", state);

    let start = Instant::now();
    if args.plies > 0 {
        for (action, count) in perft_divide(&state, args.plies) {
            println!("{}: {}", action, count);
        }
    }
    let results = perft_detailed(&state, args.plies);
    let elapsed = start.elapsed();

    println!("\nLeaves: {}", results.leaves);
    println!("Wins: {}", results.wins);
    println!("Losses: {}", results.losses);
    println!("Time: {:.2}s", elapsed.as_secs_f64());
    Ok(())
}

fn show_layout(name: Option<String>) -> Result<()> {
    let Some(name) = name else {
        println!("Built-in layouts:");
        for name in layouts::NAMES {
            let layout = layouts::load(name)
                .ok_or_else(|| anyhow!("missing built-in layout {}", name))??;
            println!(
                "  {:<16} {}x{}, {} ghost(s), {} food",
                name,
                layout.width(),
                layout.height(),
                layout.ghost_starts.len(),
                layout.food.count()
            );
        }
        return Ok(());
    };

    let layout = LayoutArgs {
        layout: name,
        layout_file: None,
    }
    .load()?;
    println!("{}", GameState::from_layout(&layout));
    Ok(())
}

fn evaluate(layout: LayoutArgs, eval_fn: Option<EvaluationFunction>) -> Result<()> {
    let state = GameState::from_layout(&layout.load()?);
    let functions = match eval_fn {
        Some(eval_fn) => vec![eval_fn],
        None => EvaluationFunction::ALL.to_vec(),
    };

    println!("{}\n", state);
    for eval_fn in functions {
        let evaluate = eval_fn.resolve::<GameState>();
        println!("{}: {}", eval_fn, evaluate(&state));
    }
    Ok(())
}
