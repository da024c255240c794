//! Game logic layer machinery.

/// How far can the player see.
pub const SIGHT_RADIUS: i32 = 8;

/// From how far away do monsters react to an unstealthy player.
pub const BASE_AGGRO_DISTANCE: f32 = 6.0;

/// How many entries the message history retains.
pub const HISTORY_LEN: usize = 9;

/// Damage dealt to anything caught in a fireball blast.
pub const FIREBALL_DAMAGE: i32 = 6;

mod action;
pub use action::Command;

mod ai;

mod entity;
pub use entity::{
    ActionKind, Entity, EntityId, EntityKind, Fireball, Monster, Player, Prop,
};

mod fov;

mod item;
pub use item::{Item, Slot, ToolKind};

mod map;
pub use map::{Map, Tile};

mod mapgen;
pub use mapgen::Caves;

mod msg;
pub use msg::{send_msg, Msg, Receiver};

pub mod prelude;

mod projectile;

mod world;
pub use world::{LogEntry, Tone, World, WorldSpec};
