//! Periodic save sweep
//!
//! Persists every registered player once per sweep. The sweep works off a
//! directory snapshot so the directory lock is not held while players are
//! written out, and a failing save never aborts the rest of the sweep.

use thiserror::Error;

use crate::directory::EntityDirectory;
use crate::entity::Player;

#[derive(Clone, Debug, Error)]
#[error("failed to save player state: {reason}")]
pub struct SaveError {
    pub reason: String,
}

/// Destination of a save sweep, invoked once per registered player.
pub trait PlayerSaver {
    fn save(&mut self, player: &Player) -> Result<(), SaveError>;
}

/// Saves every registered player, returning the number saved successfully.
///
/// Failures are logged and skipped; they are the persistence service's
/// problem, not the directory's.
pub fn save_all(directory: &EntityDirectory, saver: &mut dyn PlayerSaver) -> usize {
    let players = directory.snapshot();

    let mut saved = 0;
    for player in &players {
        match saver.save(player) {
            Ok(()) => saved += 1,
            Err(err) => {
                tracing::warn!("save sweep skipping {}: {}", player.guid(), err);
            }
        }
    }

    tracing::debug!("save sweep saved {} of {} players", saved, players.len());

    saved
}
