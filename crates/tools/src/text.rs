//! Plain-text narration for events, query answers, and the fogged map.

use game_core::{
    Direction, DungeonState, EncounterTier, Feature, GameEvent, GameMode, ItemKind, LocationReport,
    MapOverview, QueryAnswer, RunStatus, StatusReport,
};

pub fn direction_name(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => "north",
        Direction::Right => "east",
        Direction::Down => "south",
        Direction::Left => "west",
    }
}

pub fn mode_name(mode: GameMode) -> String {
    match mode {
        GameMode::Classic(tier) => format!("classic/{}", tier.name()),
        GameMode::Survival => "survival".to_string(),
    }
}

fn feature_text(feature: Feature) -> &'static str {
    match feature {
        Feature::Open => "an open passage",
        Feature::Blocked => "a wall",
        Feature::Monster => "a monster",
        Feature::Potion => "a potion",
        Feature::Exit => "the exit door",
        Feature::UndiscoveredExit => "a heavy door",
        Feature::Key => "a key",
        Feature::Void => "a dark void",
        Feature::Edge => "the edge of the dungeon",
    }
}

pub fn event_text(event: &GameEvent) -> String {
    match event {
        GameEvent::RunStarted { mode } => format!("A new {} run begins.", mode_name(*mode)),
        GameEvent::DungeonGenerated { side, monsters, potions, has_void, .. } => {
            let void = if *has_void { ", something hungry waits in the dark" } else { "" };
            format!(
                "You enter a {side}x{side} dungeon ({monsters} monsters, {potions} potions{void})."
            )
        }
        GameEvent::Moved { to, first_visit: true } => format!("You step into a new room at {to}."),
        GameEvent::Moved { to, first_visit: false } => format!("You return to {to}."),
        GameEvent::BoundaryBlocked { direction } => {
            format!("The dungeon ends to the {}.", direction_name(*direction))
        }
        GameEvent::WallBump { .. } => "A wall blocks the way.".to_string(),
        GameEvent::VoidFall { .. } => "The floor gives way and you fall into the void!".to_string(),
        GameEvent::DungeonReset => "You wake up at the entrance of a new dungeon.".to_string(),
        GameEvent::MonsterEncountered { archetype, tier, .. } => match tier {
            EncounterTier::First => format!("A {archetype} blocks your path!"),
            EncounterTier::Second => format!("The {archetype} is still here."),
            EncounterTier::Repeated => format!("You face the {archetype} again."),
        },
        GameEvent::CombatResult {
            damage_dealt,
            damage_taken,
            monster_health,
            player_health,
            monster_defeated,
            ..
        } => {
            if *monster_defeated {
                format!("You strike for {damage_dealt}; the monster falls. Health {player_health}.")
            } else {
                format!(
                    "You strike for {damage_dealt} ({monster_health} left) and take \
                     {damage_taken}. Health {player_health}."
                )
            }
        }
        GameEvent::ItemCollected { kind: ItemKind::Potion, player_health } => {
            format!("You drink a potion. Health {player_health}.")
        }
        GameEvent::ItemCollected { kind: ItemKind::Key, .. } => "You pick up the key.".to_string(),
        GameEvent::ExitLocked { .. } => "The exit is locked. Find the key.".to_string(),
        GameEvent::Victory => "You unlock the exit and escape!".to_string(),
        GameEvent::Defeat => "You have been slain.".to_string(),
        GameEvent::RoundAdvance { round, tier, extra_monsters } => format!(
            "Round {round} awaits at {} difficulty (+{extra_monsters} monsters). Type 'next'.",
            tier.name()
        ),
        GameEvent::GameOver { rounds_survived } => {
            format!("Game over after {rounds_survived} round(s). Type 'restart' to try again.")
        }
    }
}

fn status_lines(report: &StatusReport) -> Vec<String> {
    let key = if report.has_key { "yes" } else { "no" };
    let mut lines = vec![
        format!("Mode: {}", mode_name(report.mode)),
        format!("Health: {}/{}", report.health, report.max_health),
        format!("Attack: {}", report.attack),
        format!("Key: {key}"),
    ];
    if let Some(survival) = &report.survival {
        lines.push(format!("Round: {} ({})", survival.round, survival.tier.name()));
    }
    match report.status {
        RunStatus::Playing => {}
        RunStatus::Won => lines.push("The run is won.".to_string()),
        RunStatus::Lost => lines.push("The run is lost.".to_string()),
    }
    lines
}

fn location_lines(report: &LocationReport) -> Vec<String> {
    let opening = if report.first_visit { "You have not been here before." } else { "Familiar." };
    let mut lines = vec![format!("You stand at {}. {opening}", report.pos)];
    for surrounding in &report.surroundings {
        lines.push(format!(
            "  {:<5} {}",
            direction_name(surrounding.direction),
            feature_text(surrounding.feature)
        ));
    }
    lines
}

fn overview_lines(overview: &MapOverview) -> Vec<String> {
    let mut lines = vec![format!(
        "Explored {}/{} cells of a {}x{} dungeon.",
        overview.revealed_cells, overview.total_cells, overview.side, overview.side
    )];
    for sighting in &overview.monsters {
        lines.push(format!(
            "  {} at {} ({} health)",
            sighting.archetype, sighting.pos, sighting.health
        ));
    }
    if overview.potions > 0 {
        lines.push(format!("  {} potion(s) seen", overview.potions));
    }
    if let Some(exit) = overview.exit {
        lines.push(format!("  exit at {exit}"));
    }
    if let Some(round) = overview.round {
        lines.push(format!("Survival round {round}."));
    }
    lines
}

pub fn answer_lines(answer: &QueryAnswer) -> Vec<String> {
    match answer {
        QueryAnswer::Status(report) => status_lines(report),
        QueryAnswer::Location(report) => location_lines(report),
        QueryAnswer::MapOverview(overview) => overview_lines(overview),
    }
}

/// The grid with unrevealed cells hidden behind `?`.
pub fn fog_map(dungeon: &DungeonState) -> String {
    let side = dungeon.grid.side();
    let mut out = String::with_capacity(side * (side + 1));
    for pos in dungeon.grid.positions() {
        let glyph = if dungeon.is_revealed(pos) { dungeon.grid.tile_at(pos).glyph() } else { '?' };
        out.push(glyph);
        if pos.x as usize + 1 == side {
            out.push('\n');
        }
    }
    out
}
