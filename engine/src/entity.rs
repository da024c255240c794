//! Live entities and the combat dispatch seam.
//!
//! Entities are a tagged union over a `kind` discriminant instead of a
//! class hierarchy; capabilities like blocking hang off [`EntityKind`] so
//! nothing in the engine needs identity-based type tests.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::{item::ToolKind, prelude::*};

#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize,
)]
pub struct EntityId(pub(crate) u32);

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub pos: IVec2,
    pub kind: EntityKind,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EntityKind {
    Player(Player),
    Monster(Monster),
    Fireball(Fireball),
    Blastwave,
    Loot(Item),
    Blood,
    /// Generic scenery entity, stairs and the like.
    Prop(Prop),
}

impl EntityKind {
    /// Blocking entities occupy their cell for movement and targeting.
    ///
    /// Blood is a decal and never blocks anything.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, EntityKind::Blood)
    }

    /// Projectiles and blast visuals are processed before other entities
    /// and get inserted right after the player in the registry.
    pub(crate) fn has_projectile_priority(&self) -> bool {
        matches!(self, EntityKind::Fireball(_) | EntityKind::Blastwave)
    }

    pub fn name(&self) -> &str {
        match self {
            EntityKind::Player(_) => "you",
            EntityKind::Monster(m) => &m.name,
            EntityKind::Fireball(_) => "fireball",
            EntityKind::Blastwave => "blastwave",
            EntityKind::Loot(item) => &item.name,
            EntityKind::Blood => "blood",
            EntityKind::Prop(p) => &p.name,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Player {
    pub hp: i32,
    pub max_hp: i32,
    pub attack: i32,
    pub damage: i32,
    pub sight_radius: i32,
    /// Set when the last turn was spent moving, consumed by regeneration.
    pub did_move: bool,
    /// Set when the last turn was spent resting.
    pub did_rest: bool,
    /// Loot entity the player is currently inspecting, if any.
    pub inspecting: Option<EntityId>,
    equipment: [Option<Item>; 4],
}

impl Default for Player {
    fn default() -> Self {
        Player {
            hp: 20,
            max_hp: 20,
            attack: 2,
            damage: 2,
            sight_radius: crate::SIGHT_RADIUS,
            did_move: false,
            did_rest: false,
            inspecting: None,
            equipment: Default::default(),
        }
    }
}

impl Player {
    fn slot_idx(slot: Slot) -> usize {
        match slot {
            Slot::LeftHand => 0,
            Slot::RightHand => 1,
            Slot::Head => 2,
            Slot::Torso => 3,
        }
    }

    pub fn equipped(&self, slot: Slot) -> Option<&Item> {
        self.equipment[Self::slot_idx(slot)].as_ref()
    }

    pub fn equipped_mut(&mut self, slot: Slot) -> Option<&mut Item> {
        self.equipment[Self::slot_idx(slot)].as_mut()
    }

    /// Put an item in a slot, applying its stat modifiers.
    ///
    /// Anything already in the slot is returned with its modifiers
    /// reverted.
    pub fn equip(&mut self, slot: Slot, item: Item) -> Option<Item> {
        let prev = self.unequip(slot);
        self.attack += item.attack_mod;
        self.damage += item.damage_mod;
        self.equipment[Self::slot_idx(slot)] = Some(item);
        prev
    }

    /// Take an item out of a slot, reverting its stat modifiers.
    pub fn unequip(&mut self, slot: Slot) -> Option<Item> {
        let item = self.equipment[Self::slot_idx(slot)].take()?;
        self.attack -= item.attack_mod;
        self.damage -= item.damage_mod;
        Some(item)
    }

    /// One point per equipped stealthy item, so 0..=4.
    pub fn stealth_bonus(&self) -> i32 {
        Slot::iter()
            .filter(|&s| self.equipped(s).is_some_and(|i| i.stealthy))
            .count() as i32
    }

    /// Distance under which visible monsters become active.
    pub fn aggro_distance(&self) -> f32 {
        BASE_AGGRO_DISTANCE - self.stealth_bonus() as f32
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub hp: i32,
    pub damage: i32,
}

impl Monster {
    pub fn new(name: impl Into<String>, hp: i32, damage: i32) -> Self {
        Monster {
            name: name.into(),
            hp,
            damage,
        }
    }
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Fireball {
    /// Fixed cardinal flight direction.
    pub dir: IVec2,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Prop {
    pub name: String,
}

/// Polymorphic combat and effect resolution, dispatched on entity kind.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ActionKind {
    /// Player walks into the target.
    Bump,
    /// The target monster strikes the player in melee.
    MonsterBump,
    /// The target is caught in a fireball blast.
    Fireball,
}

impl World {
    /// Resolve an action against a target entity.
    ///
    /// Occupancy is re-resolved from the id here, so a stale id is a safe
    /// no-op. Resolution may remove the target from the registry but never
    /// touches terrain.
    pub fn dispatch(&mut self, target: EntityId, action: ActionKind) {
        let Some(e) = self.get(target) else { return };
        let pos = e.pos;
        let kind = e.kind.clone();

        match (action, &kind) {
            (ActionKind::Bump, EntityKind::Monster(m)) => {
                let name = m.name.clone();
                let dmg = self.player().damage;
                let hit = format!("You hit the {name}.");
                self.hurt_monster(target, pos, &name, dmg, hit);
            }
            (ActionKind::Bump, EntityKind::Loot(item)) => {
                let body = format!("You see a {}.", item.name);
                self.player_mut().inspecting = Some(target);
                self.push_history(body, Tone::Info);
            }
            (ActionKind::Bump, _) => {}

            (ActionKind::MonsterBump, EntityKind::Monster(m)) => {
                let name = m.name.clone();
                let dmg = m.damage;
                let player = self.player_mut();
                player.hp = (player.hp - dmg).max(0);
                let dead = player.hp == 0;
                self.push_history(
                    format!("The {name} hits you!"),
                    Tone::MonsterAttack,
                );
                if dead {
                    self.push_history("You die...", Tone::Curse);
                }
            }
            (ActionKind::MonsterBump, _) => {
                log::warn!(
                    "monster attack dispatched to {}",
                    kind.name()
                );
            }

            (ActionKind::Fireball, EntityKind::Monster(m)) => {
                let name = m.name.clone();
                let hit = format!("The {name} is scorched!");
                self.hurt_monster(
                    target,
                    pos,
                    &name,
                    crate::FIREBALL_DAMAGE,
                    hit,
                );
            }
            (ActionKind::Fireball, EntityKind::Player(_)) => {
                let player = self.player_mut();
                player.hp = (player.hp - crate::FIREBALL_DAMAGE).max(0);
                let dead = player.hp == 0;
                self.push_history("The flames sear you!", Tone::Curse);
                if dead {
                    self.push_history("You die...", Tone::Curse);
                }
            }
            (ActionKind::Fireball, EntityKind::Loot(item)) => {
                let body = format!("The {} burns to ash!", item.name);
                self.destroy_loot(target);
                self.push_history(body, Tone::Curse);
            }
            (ActionKind::Fireball, _) => {}
        }
    }

    fn hurt_monster(
        &mut self,
        id: EntityId,
        pos: IVec2,
        name: &str,
        dmg: i32,
        hit_body: String,
    ) {
        let Some(m) = self.monster_mut(id) else { return };
        m.hp -= dmg;
        if m.hp <= 0 {
            self.remove(id);
            self.add(EntityKind::Blood, pos);
            self.push_history(
                format!("The {name} dies!"),
                Tone::MonsterAttack,
            );
        } else {
            self.push_history(hit_body, Tone::Story);
        }
    }

    /// Remove a loot entity, cancelling any inspection of it.
    pub(crate) fn destroy_loot(&mut self, id: EntityId) {
        if self.player().inspecting == Some(id) {
            self.player_mut().inspecting = None;
        }
        self.remove(id);
    }
}

/// Shorthands used by turn resolution.
impl Entity {
    pub fn is_monster(&self) -> bool {
        matches!(self.kind, EntityKind::Monster(_))
    }

    pub fn is_loot(&self) -> bool {
        matches!(self.kind, EntityKind::Loot(_))
    }
}

pub(crate) fn rock_pick_in(player: &Player, slot: Slot) -> bool {
    player
        .equipped(slot)
        .is_some_and(|i| i.tool == Some(ToolKind::RockPick))
}
