//! Doodads: one-time discretionary purchases.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DoodadId, PlayerId, PurchaseId, Timestamp};

/// A doodad card from the catalog - immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoodadCard {
    id: DoodadId,
    name: String,
    description: String,
    cost: i64,
}

impl DoodadCard {
    pub fn new(id: DoodadId, name: String, description: String, cost: i64) -> Self {
        Self {
            id,
            name,
            description,
            cost,
        }
    }

    pub fn id(&self) -> &DoodadId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }
}

/// A write-once record of a doodad purchase.
///
/// Snapshots the card's name, description, and cost at purchase time so
/// later catalog edits never rewrite game history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerDoodad {
    id: PurchaseId,
    player_id: PlayerId,
    doodad_id: DoodadId,
    name: String,
    description: String,
    cost: i64,
    purchased_at: Timestamp,
}

impl PlayerDoodad {
    /// Snapshot a catalog card into a purchase record.
    pub fn snapshot(id: PurchaseId, player_id: PlayerId, card: &DoodadCard) -> Self {
        Self {
            id,
            player_id,
            doodad_id: *card.id(),
            name: card.name().to_string(),
            description: card.description().to_string(),
            cost: card.cost(),
            purchased_at: Timestamp::now(),
        }
    }

    /// Reconstitute a purchase record from persistence.
    pub fn reconstitute(
        id: PurchaseId,
        player_id: PlayerId,
        doodad_id: DoodadId,
        name: String,
        description: String,
        cost: i64,
        purchased_at: Timestamp,
    ) -> Self {
        Self {
            id,
            player_id,
            doodad_id,
            name,
            description,
            cost,
            purchased_at,
        }
    }

    pub fn id(&self) -> &PurchaseId {
        &self.id
    }

    pub fn player_id(&self) -> &PlayerId {
        &self.player_id
    }

    pub fn doodad_id(&self) -> &DoodadId {
        &self.doodad_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn purchased_at(&self) -> &Timestamp {
        &self.purchased_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_copies_card_fields() {
        let card = DoodadCard::new(
            DoodadId::new(),
            "Boat".to_string(),
            "A very nice boat".to_string(),
            17_000,
        );
        let purchase = PlayerDoodad::snapshot(PurchaseId::new(), PlayerId::new(), &card);

        assert_eq!(purchase.doodad_id(), card.id());
        assert_eq!(purchase.name(), "Boat");
        assert_eq!(purchase.description(), "A very nice boat");
        assert_eq!(purchase.cost(), 17_000);
    }
}
