//! Deterministic melee exchange between the player and one monster.

use crate::state::DungeonState;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CombatExchange {
    pub damage_dealt: i32,
    pub damage_taken: i32,
    pub monster_health: i32,
    pub player_health: i32,
    pub monster_defeated: bool,
    pub player_defeated: bool,
}

impl DungeonState {
    /// Engaging never moves the player, whatever the outcome.
    pub(super) fn engage_monster(
        &mut self,
        target: Pos,
        events: &mut Vec<GameEvent>,
    ) -> Option<TurnSignal> {
        let id = self.entity_id_at(target)?;
        let monster = self.monster_mut(id)?;
        monster.encounters += 1;
        let encounters = monster.encounters;
        let archetype = monster.archetype;
        events.push(GameEvent::MonsterEncountered {
            id,
            archetype,
            encounters,
            tier: EncounterTier::from_count(encounters),
        });

        let exchange = self.resolve_combat(id)?;
        events.push(GameEvent::CombatResult {
            id,
            damage_dealt: exchange.damage_dealt,
            damage_taken: exchange.damage_taken,
            monster_health: exchange.monster_health,
            player_health: exchange.player_health,
            monster_defeated: exchange.monster_defeated,
            player_defeated: exchange.player_defeated,
        });
        exchange.player_defeated.then_some(TurnSignal::Defeat)
    }

    /// One exchange against `id`. A killed monster does not strike back.
    /// Returns `None` and changes nothing when `id` no longer names a monster.
    pub fn resolve_combat(&mut self, id: EntityId) -> Option<CombatExchange> {
        let damage_dealt = self.player.attack;
        let (monster_health, damage_taken) = {
            let monster = self.monster_mut(id)?;
            monster.health -= damage_dealt;
            monster.has_been_attacked = true;
            (monster.health, monster.attack)
        };

        if monster_health <= 0 {
            self.despawn(id);
            return Some(CombatExchange {
                damage_dealt,
                damage_taken: 0,
                monster_health: 0,
                player_health: self.player.health,
                monster_defeated: true,
                player_defeated: false,
            });
        }

        self.player.health = (self.player.health - damage_taken).max(0);
        Some(CombatExchange {
            damage_dealt,
            damage_taken,
            monster_health,
            player_health: self.player.health,
            monster_defeated: false,
            player_defeated: self.player.health == 0,
        })
    }
}
