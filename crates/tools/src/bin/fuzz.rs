use anyhow::{Context, Result, bail, ensure};
use clap::Parser;
use game_core::{
    Action, DifficultyTable, DifficultyTier, Direction, Game, GameMode, RunStatus, Tile,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

// Right and Down outweigh Up and Left three to one; the exit sits in the far quadrant.
const WEIGHTED_DIRECTIONS: [Direction; 8] = [
    Direction::Right,
    Direction::Down,
    Direction::Right,
    Direction::Down,
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    moves: u32,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for max {} moves...", args.seed, args.moves);
    let mut game = Game::new(args.seed, DifficultyTable::default())?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mode = choose(
        &mut rng,
        &[
            GameMode::Survival,
            GameMode::Classic(DifficultyTier::Easy),
            GameMode::Classic(DifficultyTier::Normal),
            GameMode::Classic(DifficultyTier::Hard),
            GameMode::Classic(DifficultyTier::Adventurer),
        ],
    );
    game.apply(Action::StartGame(mode))?;

    let mut finished_runs = 0_u32;
    for _ in 0..args.moves {
        let action = match game.status() {
            RunStatus::Playing => Action::Move(choose(&mut rng, &WEIGHTED_DIRECTIONS)),
            RunStatus::Won if game.survival().pending_next_round => Action::AcknowledgeNextRound,
            RunStatus::Won | RunStatus::Lost => {
                finished_runs += 1;
                Action::Restart
            }
        };
        game.apply(action).with_context(|| format!("fuzz applied invalid action {action:?}"))?;

        // Assert invariants
        let Some(dungeon) = game.dungeon() else {
            bail!("Invariant failed: started game has no dungeon");
        };
        if let Some(violation) = dungeon.consistency_violation() {
            bail!("Invariant failed: {violation}");
        }
        for (_, monster) in dungeon.monsters() {
            ensure!(monster.health > 0, "Invariant failed: dead monster still on the grid");
            ensure!(monster.health <= monster.max_health, "Invariant failed: monster over-healed");
        }
        let player = dungeon.player;
        ensure!((0..=100).contains(&player.health), "Invariant failed: player health out of range");
        ensure!(
            dungeon.grid.tile_at(player.pos) == Tile::Player || game.status() != RunStatus::Playing,
            "Invariant failed: player tile missing while playing"
        );
    }

    println!(
        "Fuzzing completed successfully: {finished_runs} finished run(s), hash {:016x}.",
        game.snapshot_hash()
    );
    Ok(())
}
