//! Player turn resolution.

use crate::{entity::rock_pick_in, prelude::*, Fireball};

/// One player input, triggering one full resolution pass.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Command {
    Move(IVec2),
    Rest,
    Fire(IVec2),
}

impl World {
    /// Resolve one full game turn.
    ///
    /// Player action first, then in-flight projectiles advance one cell,
    /// then every monster re-evaluates. Runs to completion with no
    /// suspension points; the caller must not re-enter while this runs.
    pub fn turn(&mut self, cmd: Command) {
        match cmd {
            Command::Move(dv) => self.move_player(dv),
            Command::Rest => self.rest(),
            Command::Fire(dir) => self.cast_fireball(dir),
        }
        self.update_projectiles();
        self.move_monsters();
    }

    /// Attempt to move the player one step.
    pub fn move_player(&mut self, dv: IVec2) {
        self.clear_hit();
        let target = self.player_pos() + dv;

        // Bump whatever blocks the cell instead of moving.
        let bumped = self
            .blocking_entity_at(target)
            .map(|e| (e.id, e.is_monster()));
        if let Some((id, is_monster)) = bumped {
            self.dispatch(id, ActionKind::Bump);
            let player = self.player_mut();
            player.did_move = false;
            player.did_rest = false;
            if is_monster {
                self.did_hit = true;
                self.last_hit = target;
                send_msg(Msg::Hit(target));
            }
            return;
        }

        self.player_mut().did_rest = false;

        if self.map.is_wall(target) {
            self.player_mut().did_move = false;
            // Both hands get to dig on the same failed move.
            self.dig_with(Slot::LeftHand, target);
            self.dig_with(Slot::RightHand, target);
        } else {
            self.set_player_pos(target);
            self.player_mut().did_move = true;
        }
    }

    /// Consume a rock pick charge to carve the wall the player walked
    /// into.
    fn dig_with(&mut self, slot: Slot, target: IVec2) {
        if !rock_pick_in(self.player(), slot) {
            return;
        }
        if !self.map.contains(target) {
            return;
        }

        self.map.carve(target);
        send_msg(Msg::Dig(target));

        // Slot was just checked to hold the pick.
        let Some(item) = self.player_mut().equipped_mut(slot) else {
            return;
        };
        item.charges -= 1;
        let broke = item.charges < 1;
        self.push_history(
            "Your Rock Pick is slightly bluntened.",
            Tone::Info,
        );
        if broke {
            self.player_mut().unequip(slot);
            self.push_history(
                "Your Rock Pick breaks into pieces.",
                Tone::Curse,
            );
        }
    }

    /// Spend the turn resting.
    pub fn rest(&mut self) {
        self.clear_hit();
        self.push_history("you give yourself a moment to rest", Tone::Story);
        let player = self.player_mut();
        player.did_rest = true;
        player.did_move = false;
    }

    /// Launch a fireball from the player's cell.
    pub fn cast_fireball(&mut self, dir: IVec2) {
        debug_assert!(dir.taxi_len() == 1, "fireballs fly cardinally");
        let pos = self.player_pos();
        self.add(EntityKind::Fireball(Fireball { dir }), pos);
        self.push_history("You hurl a ball of fire!", Tone::Info);
    }
}
