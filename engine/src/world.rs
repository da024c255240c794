//! The world aggregate: terrain, entity registry, history log.

use std::collections::VecDeque;
use std::str::FromStr;

use anyhow::ensure;
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use util::{srng, GameRng, RngExt};

use crate::{mapgen::Caves, prelude::*, Monster, Player};

/// Tone tag of a history entry, maps to a display color in the UI.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum::Display,
)]
pub enum Tone {
    Story,
    Info,
    MonsterAttack,
    Curse,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogEntry {
    pub body: String,
    pub tone: Tone,
}

/// Parameters for building one dungeon level.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSpec {
    pub seed: String,
    pub width: i32,
    pub height: i32,
    /// Dungeon depth, starts at 1.
    pub tier: u32,
    /// Boss levels generate as one large chamber.
    pub boss: bool,
}

impl WorldSpec {
    pub fn new(seed: impl Into<String>, tier: u32) -> Self {
        WorldSpec {
            seed: seed.into(),
            width: 60,
            height: 36,
            tier,
            boss: false,
        }
    }

    pub fn boss_level(mut self) -> Self {
        self.boss = true;
        self
    }
}

/// One dungeon level's worth of game state.
///
/// Owns the terrain, the entity registry and the history log outright.
/// Turn resolution is single-threaded and runs to completion; every
/// resolution function takes the world explicitly.
pub struct World {
    pub(crate) map: Map,
    pub(crate) entities: Vec<Entity>,
    next_id: u32,
    history: VecDeque<LogEntry>,
    pub tier: u32,
    pub(crate) rng: GameRng,
    /// Cell of the most recent melee connect, for the hit flash.
    pub last_hit: IVec2,
    pub did_hit: bool,
}

impl World {
    pub fn new(spec: &WorldSpec) -> anyhow::Result<World> {
        ensure!(
            spec.width >= 8 && spec.height >= 8,
            "level dimensions too small"
        );

        let mut rng = srng(&(&spec.seed, spec.tier));
        let map = if spec.boss {
            let map = Caves::boss(spec.width, spec.height).sample(&mut rng);
            send_msg(Msg::BossLevel);
            map
        } else {
            Caves::new(spec.width, spec.height).sample(&mut rng)
        };

        let mut world = World::with_map(map, rng, spec.tier);
        log::info!(
            "generated tier {} level, {} floor cells",
            spec.tier,
            world.map.floor_cells().count()
        );

        world.push_history("You enter the dungeon", Tone::Story);
        world.push_history("---", Tone::Story);
        world.push_history(format!("LEVEL {}", spec.tier), Tone::Story);
        world.push_history("---", Tone::Story);
        Ok(world)
    }

    /// Build a world around existing terrain.
    ///
    /// The player starts on the first open cell scanning from the origin.
    pub fn with_map(map: Map, rng: GameRng, tier: u32) -> World {
        let mut world = World {
            map,
            entities: Vec::new(),
            next_id: 0,
            history: VecDeque::new(),
            tier,
            rng,
            last_hit: IVec2::ZERO,
            did_hit: false,
        };

        let player =
            world.add(EntityKind::Player(Player::default()), IVec2::ZERO);
        world.move_to_space(player);
        world
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// The player's payload. Registry slot 0 is always the player.
    pub fn player(&self) -> &Player {
        match &self.entities[0].kind {
            EntityKind::Player(p) => p,
            _ => unreachable!("registry slot 0 is not the player"),
        }
    }

    pub(crate) fn player_mut(&mut self) -> &mut Player {
        match &mut self.entities[0].kind {
            EntityKind::Player(p) => p,
            _ => unreachable!("registry slot 0 is not the player"),
        }
    }

    pub fn player_pos(&self) -> IVec2 {
        self.entities[0].pos
    }

    pub(crate) fn set_player_pos(&mut self, pos: IVec2) {
        self.entities[0].pos = pos;
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub(crate) fn monster_mut(&mut self, id: EntityId) -> Option<&mut Monster> {
        match self.get_mut(id) {
            Some(Entity {
                kind: EntityKind::Monster(m),
                ..
            }) => Some(m),
            _ => None,
        }
    }

    /// Insert an entity, return its id.
    ///
    /// Fireballs and blastwaves are inserted right after the player so the
    /// projectile pass reaches them before anything else; other kinds
    /// append at the end.
    pub fn add(&mut self, kind: EntityKind, pos: IVec2) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        let entity = Entity { id, pos, kind };
        if entity.kind.has_projectile_priority() {
            let at = self.entities.len().min(1);
            self.entities.insert(at, entity);
        } else {
            self.entities.push(entity);
        }
        id
    }

    /// Remove an entity by id, no-op if it is already gone.
    pub fn remove(&mut self, id: EntityId) {
        self.entities.retain(|e| e.id != id);
    }

    /// First entity at a position in registry order.
    pub fn entity_at(&self, pos: IVec2) -> Option<&Entity> {
        self.entities.iter().find(|e| e.pos == pos)
    }

    /// First blocking entity at a position; decals don't count as
    /// occupants.
    pub fn blocking_entity_at(&self, pos: IVec2) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| e.pos == pos && e.kind.is_blocking())
    }

    /// Append to the history log, evicting the oldest entry past the
    /// bound.
    pub fn push_history(&mut self, body: impl Into<String>, tone: Tone) {
        self.history.push_back(LogEntry {
            body: body.into(),
            tone,
        });
        while self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }
    }

    pub fn history(&self) -> impl Iterator<Item = &LogEntry> {
        self.history.iter()
    }

    pub fn clear_hit(&mut self) {
        self.did_hit = false;
    }

    /// Relocate an entity to the next unoccupied floor cell scanning
    /// forward from its current position.
    pub fn move_to_space(&mut self, id: EntityId) {
        let Some(start) = self.get(id).map(|e| e.pos) else { return };
        for x in start.x..self.map.width() {
            for y in start.y..self.map.height() {
                let p = ivec2(x, y);
                if self.map.is_passable(p) && self.entity_at(p).is_none() {
                    if let Some(e) = self.get_mut(id) {
                        e.pos = p;
                    }
                    return;
                }
            }
        }
    }

    /// Drop placement jitter: try two random diagonal offsets around the
    /// entity, then fall back to a forward scan.
    pub fn move_drop_to_space(&mut self, id: EntityId) {
        let Some(origin) = self.get(id).map(|e| e.pos) else { return };
        for _ in 0..2 {
            let offset = ivec2(
                if self.rng.coin_flip() { 1 } else { -1 },
                if self.rng.coin_flip() { 1 } else { -1 },
            );
            let p = origin + offset;
            if self.map.is_passable(p) && self.entity_at(p).is_none() {
                if let Some(e) = self.get_mut(id) {
                    e.pos = p;
                }
                return;
            }
        }
        self.move_to_space(id);
    }
}

impl FromStr for Map {
    type Err = anyhow::Error;

    /// Parse a fixture map, `#` for wall and `.` for floor.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> =
            s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        ensure!(!lines.is_empty(), "empty map");
        let height = lines.len() as i32;
        let width = lines[0].chars().count() as i32;
        let mut map = Map::new(width, height);
        for (y, line) in lines.iter().enumerate() {
            ensure!(
                line.chars().count() as i32 == width,
                "ragged map line {y}"
            );
            for (x, c) in line.chars().enumerate() {
                match c {
                    '#' => {}
                    '.' => map.carve(ivec2(x as i32, y as i32)),
                    _ => anyhow::bail!("bad map glyph {c:?}"),
                }
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fireball;

    fn arena() -> World {
        let map: Map = "######
                        #....#
                        #....#
                        #....#
                        ######"
            .parse()
            .unwrap();
        World::with_map(map, srng(&1u32), 1)
    }

    #[test]
    fn player_is_slot_zero() {
        let world = arena();
        assert!(matches!(
            world.entities()[0].kind,
            EntityKind::Player(_)
        ));
        assert_eq!(world.player_pos(), ivec2(1, 1));
    }

    #[test]
    fn projectile_priority_insertion() {
        let mut world = arena();
        let loot =
            world.add(EntityKind::Loot(Item::rock_pick(1)), ivec2(3, 3));
        let fire = world.add(
            EntityKind::Fireball(Fireball { dir: ivec2(1, 0) }),
            ivec2(2, 2),
        );
        let ids: Vec<EntityId> =
            world.entities().iter().map(|e| e.id).collect();
        assert_eq!(ids[1], fire);
        assert_eq!(ids[2], loot);
    }

    #[test]
    fn blood_does_not_occupy() {
        let mut world = arena();
        world.add(EntityKind::Blood, ivec2(2, 2));
        assert!(world.entity_at(ivec2(2, 2)).is_some());
        assert!(world.blocking_entity_at(ivec2(2, 2)).is_none());
    }

    #[test]
    fn remove_is_idempotent() {
        let mut world = arena();
        let id = world.add(EntityKind::Blood, ivec2(2, 2));
        world.remove(id);
        world.remove(id);
        assert!(world.entity_at(ivec2(2, 2)).is_none());
    }

    #[test]
    fn dropped_item_lands_on_open_floor() {
        let mut world = arena();
        let loot = world.add(
            EntityKind::Loot(Item::rock_pick(1)),
            world.player_pos(),
        );
        world.move_drop_to_space(loot);

        let p = world.get(loot).unwrap().pos;
        assert!(world.map().is_passable(p));
        assert_ne!(p, world.player_pos());
        // Only the loot sits on the landing cell.
        assert_eq!(
            world.entities().iter().filter(|e| e.pos == p).count(),
            1
        );
    }

    #[test]
    fn history_is_bounded_fifo() {
        let mut world = arena();
        for i in 0..12 {
            world.push_history(format!("entry {i}"), Tone::Story);
        }
        let entries: Vec<&LogEntry> = world.history().collect();
        assert_eq!(entries.len(), HISTORY_LEN);
        assert_eq!(entries[0].body, "entry 3");
        assert_eq!(entries[8].body, "entry 11");
    }
}
