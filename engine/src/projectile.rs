//! Fireball flight and blast resolution.

use crate::{prelude::*, Fireball};

impl World {
    /// Advance every in-flight fireball one cell and sweep expired blast
    /// visuals.
    ///
    /// Blastwaves found here were spawned in an earlier pass, so each one
    /// lives for exactly one update cycle.
    pub fn update_projectiles(&mut self) {
        let snapshot: Vec<EntityId> =
            self.entities.iter().map(|e| e.id).collect();

        for id in snapshot {
            let Some(e) = self.get(id) else { continue };
            let pos = e.pos;
            match e.kind {
                EntityKind::Blastwave => self.remove(id),
                EntityKind::Fireball(Fireball { dir }) => {
                    let next = pos + dir;
                    if let Some(hit) =
                        self.blocking_entity_at(next).map(|e| e.pos)
                    {
                        // Detonate on the obstructing entity's own cell.
                        self.remove(id);
                        self.handle_explosion(hit);
                    } else if self.map.is_wall(next) {
                        self.remove(id);
                        self.handle_explosion(next);
                    } else if let Some(e) = self.get_mut(id) {
                        e.pos = next;
                    }
                }
                _ => {}
            }
        }
    }

    /// Detonate a blast centered on a cell.
    ///
    /// The window is one cell wide around the center on the x axis and
    /// runs from two cells above to one below on the y axis; the vertical
    /// asymmetry is intended, observable game behavior.
    pub(crate) fn handle_explosion(&mut self, center: IVec2) {
        for x in center.x - 1..=center.x + 1 {
            for y in center.y - 2..=center.y + 1 {
                let p = ivec2(x, y);
                if let Some(target) =
                    self.blocking_entity_at(p).map(|e| e.id)
                {
                    self.dispatch(target, ActionKind::Fireball);
                }
                if self.map.is_wall(p) {
                    // Blasts carve terrain for good; out-of-bounds cells
                    // are left alone.
                    self.map.carve(p);
                }
            }
        }

        self.add(EntityKind::Blastwave, center + ivec2(-1, -1));
        send_msg(Msg::Explosion(center));
    }
}

#[cfg(test)]
mod tests {
    use util::srng;

    use super::*;
    use crate::{Item, Monster, Tile};

    fn world(map: &str) -> World {
        World::with_map(map.parse().unwrap(), srng(&1u32), 1)
    }

    fn fireball(w: &mut World, pos: IVec2, dir: IVec2) -> EntityId {
        w.add(EntityKind::Fireball(Fireball { dir }), pos)
    }

    fn blastwave_count(w: &World) -> usize {
        w.entities()
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Blastwave))
            .count()
    }

    #[test]
    fn fireball_flies_down_open_corridor() {
        let mut w = world(
            "##########
             #........#
             ##########",
        );
        let id = fireball(&mut w, ivec2(2, 1), ivec2(1, 0));
        w.update_projectiles();
        assert_eq!(w.get(id).unwrap().pos, ivec2(3, 1));
        w.update_projectiles();
        assert_eq!(w.get(id).unwrap().pos, ivec2(4, 1));
    }

    #[test]
    fn fireball_detonates_on_wall() {
        let mut w = world(
            "#########
             #.......#
             #.......#
             #.......#
             #.......#
             #########",
        );
        let id = fireball(&mut w, ivec2(7, 3), ivec2(1, 0));
        w.update_projectiles();

        assert!(w.get(id).is_none());
        assert_eq!(blastwave_count(&w), 1);
        // Blast window around (8, 3): x 7..=9, y 1..=4. In-bounds walls
        // inside it are carved, the border column at x 8 included.
        assert_eq!(w.map().tile(ivec2(8, 2)), Tile::Floor);
        assert_eq!(w.map().tile(ivec2(8, 4)), Tile::Floor);
        // Outside the window the wall stands.
        assert_eq!(w.map().tile(ivec2(8, 0)), Tile::Wall);
        assert_eq!(w.map().tile(ivec2(8, 5)), Tile::Wall);
    }

    #[test]
    fn fireball_detonates_on_entity_cell() {
        let mut w = world(
            "##########
             #........#
             #........#
             #........#
             ##########",
        );
        let victim = w.add(
            EntityKind::Monster(Monster::new("troll", 100, 1)),
            ivec2(6, 2),
        );
        let id = fireball(&mut w, ivec2(4, 2), ivec2(1, 0));
        w.update_projectiles();
        // Fireball moved to (5, 2) unobstructed.
        assert_eq!(w.get(id).unwrap().pos, ivec2(5, 2));

        w.update_projectiles();
        assert!(w.get(id).is_none());
        // Anchored at the troll's cell, blastwave at the -1,-1 offset.
        let wave = w
            .entities()
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Blastwave))
            .unwrap();
        assert_eq!(wave.pos, ivec2(5, 1));
        // The troll took fireball damage.
        let troll = w.get(victim).unwrap();
        match &troll.kind {
            EntityKind::Monster(m) => assert_eq!(m.hp, 100 - FIREBALL_DAMAGE),
            _ => panic!("not a monster"),
        }
    }

    #[test]
    fn blast_hits_each_bystander_once_and_spares_blood() {
        let mut w = world(
            "##########
             #........#
             #........#
             #........#
             ##########",
        );
        let near = w.add(
            EntityKind::Monster(Monster::new("imp", 100, 1)),
            ivec2(5, 1),
        );
        let far = w.add(
            EntityKind::Monster(Monster::new("imp", 100, 1)),
            ivec2(8, 3),
        );
        w.add(EntityKind::Blood, ivec2(6, 3));
        let loot = w.add(EntityKind::Loot(Item::rock_pick(1)), ivec2(6, 1));

        w.handle_explosion(ivec2(6, 2));

        let hp = |w: &World, id| match &w.get(id).unwrap().kind {
            EntityKind::Monster(m) => m.hp,
            _ => panic!("not a monster"),
        };
        assert_eq!(hp(&w, near), 100 - FIREBALL_DAMAGE);
        // Outside the window, untouched.
        assert_eq!(hp(&w, far), 100);
        // Loot in the window burns, blood is exempt and stays.
        assert!(w.get(loot).is_none());
        assert!(w.entity_at(ivec2(6, 3)).is_some());
    }

    #[test]
    fn blastwave_lives_exactly_one_cycle() {
        let mut w = world(
            "#########
             #.......#
             #.......#
             #.......#
             #.......#
             #########",
        );
        fireball(&mut w, ivec2(7, 3), ivec2(1, 0));
        w.update_projectiles();
        assert_eq!(blastwave_count(&w), 1);
        w.update_projectiles();
        assert_eq!(blastwave_count(&w), 0);
    }

    #[test]
    fn player_caught_in_blast_is_hurt() {
        let mut w = world(
            "#####
             #...#
             #####",
        );
        let hp = w.player().hp;
        w.handle_explosion(w.player_pos());
        assert_eq!(w.player().hp, hp - FIREBALL_DAMAGE);
    }
}
