//! Developer harness for the season engine.
//!
//! Generates worlds, advances weeks, and prints standings from the terminal.
//! Output here is for humans poking at the simulation, not for the game UI.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gaffer_core::{
    generate_world, simulate_week, transition_season, Division, FinanceSnapshot, SimParams,
    TeamId, WeekOutcome, WeekRequest, WorldState, SCHEMA_VERSION,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "gaffer")]
#[command(about = "Deterministic season simulation harness", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a fresh world
    New {
        /// World seed
        #[arg(long, default_value = "2024")]
        seed: u64,

        /// Teams per division, even and at least 4
        #[arg(long, default_value = "10")]
        teams_per_division: u32,

        /// Write the world JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Advance one or more weeks of a saved world
    Week {
        /// World JSON file, updated in place
        #[arg(long)]
        world: PathBuf,

        /// How many weeks to advance
        #[arg(long, default_value = "1")]
        weeks: u32,

        /// Base seed; week w draws from seed + w
        #[arg(long, default_value = "7")]
        seed: u64,

        /// Team id whose confidence and flags are reported (defaults to the
        /// first team)
        #[arg(long)]
        user_team: Option<u32>,
    },

    /// Run out the current season and apply the end-of-season transition
    Season {
        /// World JSON file, updated in place
        #[arg(long)]
        world: PathBuf,

        /// Base seed for the remaining weeks and the transition
        #[arg(long, default_value = "7")]
        seed: u64,
    },

    /// Print the current standings
    Table {
        /// World JSON file
        #[arg(long)]
        world: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::New { seed, teams_per_division, out } => {
            let world = generate_world(seed, teams_per_division, &SimParams::default())?;
            let json = serde_json::to_string_pretty(&world)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("✅ World written to {}", path.display());
                    println!("   Teams:  {}", world.teams.len());
                    println!("   Season: {}, week {}", world.season, world.week);
                }
                None => println!("{json}"),
            }
        }

        Commands::Week { world, weeks, seed, user_team } => {
            let mut state = load_world(&world)?;
            let user = resolve_user_team(&state, user_team)?;
            for _ in 0..weeks {
                if state.season_finished() {
                    println!("Season {} is already finished.", state.season);
                    break;
                }
                let outcome = advance_once(state, seed, user)?;
                print_week(&outcome);
                state = outcome.world;
            }
            print_tables(&state);
            save_world(&world, &state)?;
        }

        Commands::Season { world, seed } => {
            let mut state = load_world(&world)?;
            let user = state.teams.first().map(|t| t.id).unwrap_or(TeamId(0));
            let starting_season = state.season;
            let deadline = state.week + 120;
            while !state.season_finished() {
                if state.week > deadline {
                    bail!(
                        "season {} did not finish within 120 weeks; {} looks corrupt",
                        state.season,
                        world.display()
                    );
                }
                let outcome = advance_once(state, seed, user)?;
                println!(
                    "Week {:>2}: {} fixtures resolved",
                    outcome.world.week.saturating_sub(1),
                    outcome.resolved.len()
                );
                state = outcome.world;
            }
            print_season_honours(&state);

            let mut rng = ChaCha8Rng::seed_from_u64(seed ^ u64::from(starting_season));
            let next = transition_season(&state, &SimParams::default(), &mut rng);
            print_exchanges(&state, &next);
            println!("✅ Season {} ready.", next.season);
            save_world(&world, &next)?;
        }

        Commands::Table { world } => {
            let state = load_world(&world)?;
            print_tables(&state);
        }
    }

    Ok(())
}

fn load_world(path: &Path) -> Result<WorldState> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

fn save_world(path: &Path, world: &WorldState) -> Result<()> {
    let json = serde_json::to_string_pretty(world)?;
    fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}

fn resolve_user_team(world: &WorldState, requested: Option<u32>) -> Result<TeamId> {
    match requested {
        Some(id) => {
            let id = TeamId(id);
            if world.team(id).is_none() {
                bail!("no team with id {id} in this world");
            }
            Ok(id)
        }
        None => world
            .teams
            .first()
            .map(|t| t.id)
            .context("world has no teams"),
    }
}

fn advance_once(world: WorldState, base_seed: u64, user: TeamId) -> Result<WeekOutcome> {
    let request = WeekRequest {
        schema_version: SCHEMA_VERSION,
        seed: base_seed + u64::from(world.week),
        user_team_id: user,
        finance: FinanceSnapshot::default(),
        world,
    };
    Ok(simulate_week(request, &SimParams::default())?)
}

fn print_week(outcome: &WeekOutcome) {
    let world = &outcome.world;
    println!("\n=== Week {} ===", world.week.saturating_sub(1));
    for fixture in &outcome.resolved {
        let mut line = format!(
            "  [{}] {} {}-{} {}",
            fixture.competition.display_name(),
            world.team_name(fixture.home),
            fixture.result.home_score,
            fixture.result.away_score,
            world.team_name(fixture.away),
        );
        if let Some(shootout) = fixture.result.shootout {
            line.push_str(&format!(" (pens {}-{})", shootout.home, shootout.away));
        }
        println!("{line}");
    }
    for round in &outcome.completed_rounds {
        match round.champion {
            Some(champion) => println!(
                "  🏆 {} win the {}",
                world.team_name(champion),
                round.competition.display_name()
            ),
            None => {
                if let Some(next) = &round.next_round {
                    println!(
                        "  {} {} complete; {} drawn",
                        round.competition.display_name(),
                        round.round_name,
                        next
                    );
                }
            }
        }
    }
    for flag in &outcome.new_flags {
        println!("  ⚑ {}", flag.display_name());
    }
    if outcome.confidence_delta != 0.0 {
        println!("  Board confidence {:+.1}", outcome.confidence_delta);
    }
}

fn print_tables(world: &WorldState) {
    for (label, table) in [
        ("First Division", &world.tables.first),
        ("Second Division", &world.tables.second),
    ] {
        println!("\n{label}");
        println!(
            "{:>3} {:<24} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>3}  Form",
            "Pos", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
        );
        for row in &table.rows {
            println!(
                "{:>3} {:<24} {:>2} {:>2} {:>2} {:>2} {:>3} {:>3} {:>4} {:>3}  {}",
                row.position,
                world.team_name(row.team),
                row.played,
                row.won,
                row.drawn,
                row.lost,
                row.goals_for,
                row.goals_against,
                row.goal_difference,
                row.points,
                row.form_string(),
            );
        }
    }
}

fn print_season_honours(world: &WorldState) {
    println!("\n=== Season {} honours ===", world.season);
    if let Some(row) = world.tables.first.rows.first() {
        println!("  League champions: {}", world.team_name(row.team));
    }
    for cup in &world.cups {
        if let Some(champion) = cup.champion {
            println!(
                "  {} winners: {}",
                cup.competition.display_name(),
                world.team_name(champion)
            );
        }
    }
}

fn print_exchanges(before: &WorldState, after: &WorldState) {
    for team in &after.teams {
        let Some(previous) = before.team(team.id) else { continue };
        match (previous.division, team.division) {
            (Division::Second, Division::First) => {
                println!("  ⬆ {} promoted to the First Division", team.name);
            }
            (Division::First, Division::Second) => {
                println!("  ⬇ {} relegated to the Second Division", team.name);
            }
            _ => {}
        }
    }
}
