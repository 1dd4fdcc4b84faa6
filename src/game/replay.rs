//! Replay log.
//!
//! A seed fixes every shuffle, so the configuration plus the ordered list of
//! accepted actions is enough to rebuild a game exactly.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cards::Catalog;
use crate::core::{Action, DuelConfig, PlayerId};
use crate::error::{DuelError, Result};

use super::duel::Duel;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub config: DuelConfig,
    pub actions: Vec<(PlayerId, Action)>,
}

impl Replay {
    /// Capture the accepted actions of a duel so far.
    #[must_use]
    pub fn from_duel(duel: &Duel) -> Self {
        Self {
            config: duel.config().clone(),
            actions: duel
                .state()
                .history()
                .iter()
                .map(|record| (record.player, record.action))
                .collect(),
        }
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        bincode::serialize(self).map_err(|e| DuelError::Replay(e.to_string()))
    }

    pub fn decode(bytes: &[u8]) -> Result<Self> {
        bincode::deserialize(bytes).map_err(|e| DuelError::Replay(e.to_string()))
    }

    /// Rebuild the duel on `catalog`. Fails if any recorded action is
    /// rejected, which means the catalog or config differ from the original.
    pub fn replay(&self, catalog: Arc<Catalog>) -> Result<Duel> {
        let mut duel = Duel::new(catalog, self.config.clone())?;
        for (i, &(player, action)) in self.actions.iter().enumerate() {
            duel.process(player, action).map_err(|e| {
                DuelError::Replay(format!("action {i} ({action:?} by {player}): {e}"))
            })?;
        }
        Ok(duel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(Replay::decode(&[0xff, 0x01]), Err(DuelError::Replay(_))));
    }

    #[test]
    fn test_replay_rejects_foreign_actions() {
        let replay = Replay {
            config: DuelConfig::new(3),
            actions: vec![(PlayerId::SECOND, Action::ChooseStartingPlayer(PlayerId::FIRST))],
        };
        let err = replay.replay(Arc::new(Catalog::standard().unwrap())).unwrap_err();
        assert!(matches!(err, DuelError::Replay(_)));
    }
}
