//! Visibility queries over the level terrain.

use fov::Shadowcaster;

use crate::prelude::*;

impl World {
    /// Invoke `visit` for every cell visible from `origin` within
    /// `radius`.
    ///
    /// Recomputed from scratch on every call; terrain carved mid-turn
    /// changes the result immediately.
    pub fn fov_from(
        &self,
        origin: IVec2,
        radius: i32,
        mut visit: impl FnMut(IVec2),
    ) {
        let map = &self.map;
        Shadowcaster::new(|x, y| map.is_opaque(ivec2(x, y))).compute(
            origin.x,
            origin.y,
            radius,
            |x, y| visit(ivec2(x, y)),
        );
    }

    /// Monsters currently visible to the player, in registry order per
    /// cell.
    ///
    /// A transient set; callers must not hold on to it across entity or
    /// terrain mutation.
    pub fn visible_monsters(&self) -> Vec<EntityId> {
        let origin = self.player_pos();
        let radius = self.player().sight_radius;

        let mut seen: HashSet<IVec2> = HashSet::default();
        let mut monsters = Vec::new();
        self.fov_from(origin, radius, |p| {
            if !seen.insert(p) {
                return;
            }
            if let Some(e) = self.entity_at(p) {
                if e.is_monster() {
                    monsters.push(e.id);
                }
            }
        });
        monsters
    }
}
