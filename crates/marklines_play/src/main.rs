//! Marklines - terminal front end.
//!
//! Interactive play, computer-only simulations and topology dumps.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use marklines::{
    AdvisorSource, DiagonalRule, GridSize, GridTopology, MoveSource, PlayerCount, Roster,
    RoundConfig, SeatKind,
};
use marklines_play::{HumanSeat, SeatSettings, Session, Settings, ask_yes_no, render};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cell::RefCell;
use std::io::{BufRead, Stdout};
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            grid,
            seats,
            diagonals,
            rounds,
        } => run_play(config, grid, seats, diagonals, rounds),
        Command::Simulate {
            grid,
            players,
            rounds,
            seed,
            diagonals,
        } => run_simulate(grid, players, rounds, seed, diagonals),
        Command::Topology {
            grid,
            players,
            diagonals,
        } => run_topology(grid, players, diagonals),
    }
}

/// Run interactive rounds until the player stops
#[instrument(skip_all)]
fn run_play(
    config: Option<PathBuf>,
    grid: Option<usize>,
    seats: Vec<SeatKind>,
    diagonals: Option<DiagonalRule>,
    rounds: Option<u32>,
) -> Result<()> {
    let mut settings = match config {
        Some(path) => Settings::from_file(&path)
            .with_context(|| format!("Loading settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(grid) = grid {
        settings = settings.with_grid_size(GridSize::try_from(grid)?);
    }
    if !seats.is_empty() {
        settings = settings.with_seats(
            seats
                .into_iter()
                .map(|kind| SeatSettings::new(kind, None))
                .collect(),
        );
    }
    if let Some(diagonals) = diagonals {
        settings = settings.with_diagonals(diagonals);
    }
    if rounds.is_some() {
        settings = settings.with_rounds(rounds);
    }

    let mut session = Session::new(settings.round_config()?, settings.roster()?)?;
    info!(
        grid_size = %session.config().grid_size(),
        win_length = session.config().win_length(),
        "Starting session"
    );

    let input = Rc::new(RefCell::new(std::io::stdin().lock()));
    let mut rng = StdRng::from_os_rng();

    println!(
        "{} in a row wins on a {n}×{n} grid.",
        session.config().win_length(),
        n = session.config().grid_size()
    );

    loop {
        let mut sources = table_sources(session.roster(), &input, &mut rng);
        println!("\n{}\n", render(&marklines::Board::new(*session.config())));

        let report = session
            .play_round(&mut sources, |round, turn| {
                if let Some(seat) = round.roster().seats().get(*turn.seat()) {
                    println!("\n{} ({}) plays {}", seat.name(), turn.mark(), turn.coordinate());
                }
                println!("{}\n", render(round.board()));
            })
            .context("Playing round")?;
        println!("{report}\n\n{}", session.scoreboard());

        let more = match settings.rounds() {
            Some(limit) => session.rounds_played() < limit,
            None => ask_yes_no(
                &mut *input.borrow_mut(),
                &mut std::io::stdout(),
                "\nPlay another round?",
            )?,
        };
        if !more {
            break;
        }
    }

    info!(rounds = session.rounds_played(), "Session over");
    Ok(())
}

/// Move sources for each seat: shared terminal input for humans, seeded
/// advisors for computers
fn table_sources<R: BufRead + 'static>(
    roster: &Roster,
    input: &Rc<RefCell<R>>,
    rng: &mut StdRng,
) -> Vec<Box<dyn MoveSource>> {
    roster
        .seats()
        .iter()
        .map(|seat| match seat.kind() {
            SeatKind::Human => {
                Box::new(HumanSeat::<R, Stdout>::new(Rc::clone(input), std::io::stdout()))
                    as Box<dyn MoveSource>
            }
            SeatKind::Computer => Box::new(AdvisorSource::new(StdRng::seed_from_u64(rng.random()))),
        })
        .collect()
}

/// Run computer-only rounds and print the score table
#[instrument]
fn run_simulate(
    grid: usize,
    players: usize,
    rounds: u32,
    seed: Option<u64>,
    diagonals: DiagonalRule,
) -> Result<()> {
    let grid_size = GridSize::try_from(grid)?;
    let seats = vec![SeatSettings::new(SeatKind::Computer, None); PlayerCount::try_from(players)?.get()];
    let settings = Settings::new(grid_size, diagonals, seats);
    let mut session = Session::new(settings.round_config()?, settings.roster()?)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mut turns = 0;
    for _ in 0..rounds {
        let mut sources: Vec<Box<dyn MoveSource>> = session
            .roster()
            .seats()
            .iter()
            .map(|_| {
                Box::new(AdvisorSource::new(StdRng::seed_from_u64(rng.random())))
                    as Box<dyn MoveSource>
            })
            .collect();
        let report = session
            .play_round(&mut sources, |_, _| {})
            .context("Simulating round")?;
        debug!(%report, "Simulated round");
        turns += report.turns();
    }

    println!("{}", session.scoreboard());
    if rounds > 0 {
        println!(
            "\n{rounds} rounds, {:.1} turns per round",
            turns as f64 / f64::from(rounds)
        );
    }
    Ok(())
}

/// Print the line templates for a configuration
#[instrument]
fn run_topology(grid: usize, players: usize, diagonals: DiagonalRule) -> Result<()> {
    let config = RoundConfig::from_numbers(grid, players)?.with_diagonal_rule(diagonals);
    let topology = GridTopology::for_config(&config);
    let json = serde_json::to_string_pretty(&topology).context("Serializing topology")?;
    println!("{json}");
    Ok(())
}
