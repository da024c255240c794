pub use crate::{
    send_msg, ActionKind, Command, Entity, EntityId, EntityKind, Item, Map,
    Msg, Receiver, Slot, Tile, Tone, World, WorldSpec, BASE_AGGRO_DISTANCE,
    FIREBALL_DAMAGE, HISTORY_LEN, SIGHT_RADIUS,
};
pub use glam::{ivec2, IVec2};
pub use util::{HashMap, HashSet, VecExt};
