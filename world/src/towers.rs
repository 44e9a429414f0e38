//! Tower identifier allocation and teardown refunds.

use spice_defence_core::TowerId;

/// Hands out tower identifiers in construction order.
#[derive(Debug)]
pub(crate) struct TowerRegistry {
    next_tower_id: TowerId,
}

impl TowerRegistry {
    /// Creates a registry whose first identifier is zero.
    pub(crate) fn new() -> Self {
        Self {
            next_tower_id: TowerId::new(0),
        }
    }

    /// Identifier the next successful build will receive.
    pub(crate) fn peek(&self) -> TowerId {
        self.next_tower_id
    }

    /// Commits the peeked identifier.
    pub(crate) fn commit(&mut self) {
        self.next_tower_id = TowerId::new(self.next_tower_id.get().wrapping_add(1));
    }
}

/// Spice returned when a tower of the given cost is torn down.
pub(crate) fn refund_for(cost: i32, ratio: f32) -> i32 {
    (cost as f32 * ratio).floor() as i32
}
