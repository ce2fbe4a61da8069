//! Telemetry record returned by every event card.

use doomspire_core::{PlayerId, ResourceKind, Resources};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceChange {
    pub player: PlayerId,
    pub resource: ResourceKind,
    pub delta: i64,
}

/// Summary of a resolved card, for logs and UIs only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventCardResult {
    pub event_processed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(default)]
    pub players_affected: Vec<PlayerId>,
    #[serde(default)]
    pub resources_changed: Vec<ResourceChange>,
    #[serde(default)]
    pub boats_moved: u32,
    #[serde(default)]
    pub oasis_tokens_added: u32,
}

impl EventCardResult {
    pub fn processed() -> Self {
        Self {
            event_processed: true,
            ..Self::default()
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            event_processed: false,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Mark `player` as affected (once).
    pub fn affect(&mut self, player: PlayerId) {
        if !self.players_affected.contains(&player) {
            self.players_affected.push(player);
        }
    }

    /// Record a resource change; zero deltas are ignored.
    pub fn record(&mut self, player: PlayerId, resource: ResourceKind, delta: i64) {
        if delta == 0 {
            return;
        }
        self.affect(player);
        self.resources_changed.push(ResourceChange {
            player,
            resource,
            delta,
        });
    }

    /// Record every per-kind difference between two stockpiles.
    pub fn record_diff(&mut self, player: PlayerId, before: &Resources, after: &Resources) {
        for kind in ResourceKind::ALL {
            let delta = i64::from(after.get(kind)) - i64::from(before.get(kind));
            self.record(player, kind, delta);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_keys() {
        let mut result = EventCardResult::processed();
        result.record(PlayerId(2), ResourceKind::Food, -1);
        result.boats_moved = 2;

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["eventProcessed"], true);
        assert_eq!(json["playersAffected"], serde_json::json!([2]));
        assert_eq!(
            json["resourcesChanged"],
            serde_json::json!([{ "player": 2, "resource": "food", "delta": -1 }])
        );
        assert_eq!(json["boatsMoved"], 2);
        assert!(json.get("errorMessage").is_none());

        let back: EventCardResult = serde_json::from_value(json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn diff_records_only_changes() {
        let mut result = EventCardResult::processed();
        result.record_diff(PlayerId(1), &Resources::new(1, 2, 0, 0), &Resources::new(1, 0, 1, 0));
        assert_eq!(result.resources_changed.len(), 2);
        assert_eq!(result.players_affected, vec![PlayerId(1)]);
    }
}
