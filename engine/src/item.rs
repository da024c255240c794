//! Equipment the turn engine needs to know about.
//!
//! Inventory bookkeeping lives in the UI layer; the core only reads the
//! fields that modulate turn resolution: tool type and charges for digging,
//! the stealth status for monster aggro, and the stat modifiers reverted
//! when a tool breaks.

use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Equipment slots checked by stealth and digging logic.
#[derive(
    Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize, EnumIter,
)]
pub enum Slot {
    LeftHand,
    RightHand,
    Head,
    Torso,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ToolKind {
    RockPick,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    /// Tools can be consumed by use, `None` for regular equipment.
    pub tool: Option<ToolKind>,
    pub charges: i32,
    /// Attack bonus granted while equipped.
    pub attack_mod: i32,
    /// Damage bonus granted while equipped.
    pub damage_mod: i32,
    pub stealthy: bool,
}

impl Item {
    pub fn rock_pick(charges: i32) -> Self {
        Item {
            name: "Rock Pick".into(),
            tool: Some(ToolKind::RockPick),
            charges,
            attack_mod: 1,
            damage_mod: 1,
            ..Default::default()
        }
    }

    pub fn stealth_gear(name: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            stealthy: true,
            ..Default::default()
        }
    }
}
