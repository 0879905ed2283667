pub const PLAYER_MAX_HEALTH: i32 = 100;
pub const PLAYER_ATTACK: i32 = 20;
pub const POTION_HEAL: i32 = 30;

/// Monster attack power is drawn uniformly from this table.
pub const MONSTER_ATTACK_POWERS: [i32; 3] = [5, 10, 20];
/// Monster starting health is drawn uniformly from this table.
pub const MONSTER_HEALTH_VALUES: [i32; 3] = [40, 50, 60];

pub const MONSTER_ARCHETYPES: [&str; 16] = [
    "Goblin",
    "Skeleton",
    "Giant Rat",
    "Slime",
    "Cave Spider",
    "Zombie",
    "Kobold",
    "Ghoul",
    "Mimic",
    "Wraith",
    "Troll",
    "Basilisk",
    "Harpy",
    "Gelatinous Cube",
    "Banshee",
    "Gargoyle",
];

pub fn archetype_name(index: usize) -> &'static str {
    MONSTER_ARCHETYPES[index % MONSTER_ARCHETYPES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archetype_index_wraps() {
        assert_eq!(archetype_name(0), "Goblin");
        assert_eq!(archetype_name(16), "Goblin");
        assert_eq!(archetype_name(15), "Gargoyle");
    }
}
