//! Monsters deciding what to do on their turn.

use util::{astar_path, s8, RngExt};

use crate::prelude::*;

impl World {
    /// Run the AI turn for every monster the player can currently see.
    ///
    /// Monsters outside the player's field of view, or further away than
    /// the stealth-adjusted aggro distance, take no action.
    pub fn move_monsters(&mut self) {
        let player_pos = self.player_pos();
        let aggro = self.player().aggro_distance();

        for id in self.visible_monsters() {
            // Re-resolve, an earlier monster's turn may have changed the
            // world.
            let Some(monster) = self.get(id) else { continue };
            let mpos = monster.pos;

            if (mpos - player_pos).euclid_len() >= aggro {
                continue;
            }

            // Fresh path every evaluation, both endpoints and the terrain
            // move under us between turns.
            let Some(path) = astar_path(
                &mpos,
                &player_pos,
                |&p| {
                    let map = &self.map;
                    s8::ns(p).filter(move |&n| map.is_passable(n))
                },
                |a, b| (*b - *a).chess_len() as usize,
            ) else {
                continue;
            };
            if path.len() < 2 {
                continue;
            }

            if path.len() == 2
                && (player_pos.x == mpos.x || player_pos.y == mpos.y)
            {
                // In range to fight.
                self.dispatch(id, ActionKind::MonsterBump);
                continue;
            }

            let next = path[1];
            if next.x == mpos.x || next.y == mpos.y {
                self.step_orthogonal(id, next);
            } else {
                self.step_diagonal(id, mpos, next);
            }
        }
    }

    /// Take a non-diagonal step, trampling loot in the way.
    fn step_orthogonal(&mut self, id: EntityId, next: IVec2) {
        let mut occupied = false;
        if let Some(e) = self.blocking_entity_at(next) {
            occupied = true;
            if e.is_loot() {
                let loot = e.id;
                let body = format!(
                    "{} has been destroyed by {}!",
                    e.kind.name(),
                    self.get(id).map_or("something", |m| m.kind.name())
                );
                self.push_history(body, Tone::MonsterAttack);
                self.destroy_loot(loot);
                // Destruction spends the step; the monster moves in on a
                // later turn.
            }
        }

        if !occupied && !self.map.is_wall(next) {
            if let Some(e) = self.get_mut(id) {
                e.pos = next;
            }
        }
    }

    /// Resolve a diagonal step by trying one axis chosen by a coin flip.
    ///
    /// If the chosen axis is blocked the monster just stands; there is no
    /// fallback to the other axis.
    fn step_diagonal(&mut self, id: EntityId, mpos: IVec2, next: IVec2) {
        let step = if self.rng.coin_flip() {
            ivec2(next.x, mpos.y)
        } else {
            ivec2(mpos.x, next.y)
        };

        if !self.map.is_wall(step) && self.blocking_entity_at(step).is_none()
        {
            if let Some(e) = self.get_mut(id) {
                e.pos = step;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use util::srng;

    use super::*;
    use crate::{EntityKind, Item, Monster, Slot};

    fn world(map: &str) -> World {
        World::with_map(map.parse().unwrap(), srng(&1u32), 1)
    }

    fn monster(w: &mut World, pos: IVec2) -> EntityId {
        w.add(EntityKind::Monster(Monster::new("ghoul", 10, 1)), pos)
    }

    #[test]
    fn distant_monster_holds_still() {
        let mut w = world(
            "##########
             #........#
             ##########",
        );
        // Visible at distance 7, aggro threshold is 6.
        let id = monster(&mut w, ivec2(8, 1));
        w.move_monsters();
        assert_eq!(w.get(id).unwrap().pos, ivec2(8, 1));
    }

    #[test]
    fn near_monster_closes_in() {
        let mut w = world(
            "##########
             #........#
             ##########",
        );
        let id = monster(&mut w, ivec2(5, 1));
        w.move_monsters();
        assert_eq!(w.get(id).unwrap().pos, ivec2(4, 1));
    }

    #[test]
    fn adjacent_monster_attacks_instead_of_moving() {
        let mut w = world(
            "#####
             #...#
             #####",
        );
        let id = monster(&mut w, ivec2(2, 1));
        let hp = w.player().hp;
        w.move_monsters();
        assert_eq!(w.get(id).unwrap().pos, ivec2(2, 1));
        assert!(w.player().hp < hp);
    }

    #[test]
    fn full_stealth_kit_shrinks_aggro_range() {
        let mut w = world(
            "##########
             #........#
             ##########",
        );
        for slot in
            [Slot::LeftHand, Slot::RightHand, Slot::Head, Slot::Torso]
        {
            w.player_mut().equip(slot, Item::stealth_gear("shadow garb"));
        }
        // Threshold drops to 2; a monster 3 cells out stays inert.
        let id = monster(&mut w, ivec2(4, 1));
        w.move_monsters();
        assert_eq!(w.get(id).unwrap().pos, ivec2(4, 1));

        // One step inside the shrunk threshold it acts again.
        let close = monster(&mut w, ivec2(2, 1));
        let hp = w.player().hp;
        w.move_monsters();
        assert_eq!(w.get(close).unwrap().pos, ivec2(2, 1));
        assert!(w.player().hp < hp);
    }

    #[test]
    fn monster_tramples_loot_and_waits() {
        let mut w = world(
            "#######
             #.....#
             #######",
        );
        let loot =
            w.add(EntityKind::Loot(Item::rock_pick(1)), ivec2(3, 1));
        w.player_mut().inspecting = Some(loot);
        let id = monster(&mut w, ivec2(4, 1));

        w.move_monsters();

        // Loot gone, inspection cancelled, monster still in place.
        assert!(w.get(loot).is_none());
        assert_eq!(w.player().inspecting, None);
        assert_eq!(w.get(id).unwrap().pos, ivec2(4, 1));
        assert!(w
            .history()
            .any(|e| e.body.contains("destroyed by ghoul")));

        // Next turn the lane is clear.
        w.move_monsters();
        assert_eq!(w.get(id).unwrap().pos, ivec2(3, 1));
    }

    #[test]
    fn diagonal_monster_steps_one_axis_only() {
        let mut w = world(
            "######
             #....#
             #....#
             #....#
             ######",
        );
        let id = monster(&mut w, ivec2(3, 3));
        w.move_monsters();
        let p = w.get(id).unwrap().pos;
        // Either axis component, never the combined diagonal.
        assert!(p == ivec2(2, 3) || p == ivec2(3, 2), "bad step {p}");
    }

    #[test]
    fn unreachable_player_means_no_move() {
        let mut w = world(
            "#######
             #.#...#
             #######",
        );
        let id = monster(&mut w, ivec2(3, 1));
        w.move_monsters();
        assert_eq!(w.get(id).unwrap().pos, ivec2(3, 1));
    }
}
