use keyward_core::{
    Action, DifficultyTable, DifficultyTier, Direction, Game, GameError, GameEvent, GameMode,
    RunStatus, Tile,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn check_invariants(game: &Game, run_seed: u64) -> Result<(), String> {
    let Some(dungeon) = game.dungeon() else {
        return Err(format!("Invariant failed: no dungeon after start on run_seed {run_seed}"));
    };
    if let Some(violation) = dungeon.consistency_violation() {
        return Err(format!("Invariant failed: {violation} on run_seed {run_seed}"));
    }
    if dungeon.grid.count(Tile::Void) > 1 {
        return Err(format!("Invariant failed: more than one void on run_seed {run_seed}"));
    }
    for pos in dungeon.grid.positions() {
        let fell = dungeon.grid.is_visited(pos) && dungeon.grid.tile_at(pos) == Tile::Void;
        if fell && game.status() == RunStatus::Playing {
            return Err(format!("Invariant failed: playing after a void fall, run_seed {run_seed}"));
        }
    }
    let survival = game.survival();
    if survival.pending_next_round && game.status() != RunStatus::Won {
        return Err(format!("Invariant failed: pending round outside Won on run_seed {run_seed}"));
    }
    Ok(())
}

fn run_fuzz_simulation(run_seed: u64, choice_seed: u64, max_actions: u32) -> Result<(), String> {
    let mut game = Game::new(run_seed, DifficultyTable::default()).expect("default table");
    let mut rng = ChaCha8Rng::seed_from_u64(choice_seed);
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
    game.apply(Action::StartGame(mode)).map_err(|err| err.to_string())?;

    for _ in 0..max_actions {
        let action = match game.status() {
            RunStatus::Playing => Action::Move(choose(&mut rng, &Direction::ALL)),
            RunStatus::Won if game.survival().pending_next_round => Action::AcknowledgeNextRound,
            RunStatus::Won | RunStatus::Lost => Action::Restart,
        };
        let health_before = game.dungeon().map(|d| d.player.health);
        let had_key = game.dungeon().is_some_and(|d| d.player.has_key);
        let log_len = game.log().len();
        match game.apply(action) {
            Ok(_) => {}
            Err(err @ (GameError::NotStarted | GameError::NothingToRestart)) => {
                return Err(format!("Invariant failed: {err} after start on run_seed {run_seed}"));
            }
            Err(err) => return Err(format!("Invariant failed: rejected {action:?} with {err}")),
        }
        check_invariants(&game, run_seed)?;

        let regenerated = game.log()[log_len..]
            .iter()
            .any(|event| matches!(event, GameEvent::DungeonGenerated { .. }));
        if !matches!(action, Action::Move(_)) || regenerated {
            continue;
        }
        let (Some(before), Some(dungeon)) = (health_before, game.dungeon()) else {
            continue;
        };
        if dungeon.player.health > (before + 30).min(100) {
            return Err(format!("Invariant failed: over-healed on run_seed {run_seed}"));
        }
        if had_key && !dungeon.player.has_key {
            return Err(format!("Invariant failed: key lost mid-dungeon on run_seed {run_seed}"));
        }
    }

    let queries = [Action::StatusQuery, Action::LocationQuery, Action::MapOverviewQuery];
    let before = game.snapshot_hash();
    for query in queries {
        game.apply(query).map_err(|err| err.to_string())?;
    }
    if game.snapshot_hash() != before {
        return Err(format!("Invariant failed: a query mutated state on run_seed {run_seed}"));
    }
    Ok(())
}

#[test]
fn test_fuzz_game_simulation() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(24));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(run_seed, choice_seed)| {
            run_fuzz_simulation(run_seed, choice_seed, 400).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}
