//! Trial generator: one play of the three-door game.
//!
//! ORDER OF DRAWS (fixed, never reordered):
//!   1. car door       : uniform over all three doors
//!   2. player pick    : uniform over all three doors, independent of 1
//!   3. host reveal    : uniform over doors that are neither 1 nor 2
//!
//! The switch door is not drawn: it is whatever door is left after
//! removing the pick and the reveal. Changing the draw order changes
//! every seeded batch, so treat it as part of the CSV contract.

use crate::{
    error::{SimError, SimResult},
    rng::DoorRng,
    types::{Door, TrialIndex},
};
use serde::{Deserialize, Serialize};

/// One finished play. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trial {
    pub trial:         TrialIndex,
    pub car:           Door,
    pub player:        Door,
    pub monty:         Door,
    pub switch_choice: Door,
    pub switch_win:    bool,
    pub stay_win:      bool,
}

impl Trial {
    /// Build a trial from explicit door assignments, deriving the
    /// switch door and both win flags.
    pub fn from_doors(
        trial: TrialIndex,
        car: Door,
        player: Door,
        monty: Door,
    ) -> SimResult<Self> {
        if monty == player || monty == car {
            return Err(SimError::InvariantViolation {
                trial,
                reason: format!(
                    "host opened door {monty} (player={player}, car={car})"
                ),
            });
        }
        let switch_choice = only_door(trial, "switch", remaining(&[player, monty]))?;

        Ok(Self {
            trial,
            car,
            player,
            monty,
            switch_choice,
            switch_win: switch_choice == car,
            stay_win:   player == car,
        })
    }

    /// Recheck every per-trial invariant on an existing record.
    pub fn validate(&self) -> SimResult<()> {
        let rebuilt = Trial::from_doors(self.trial, self.car, self.player, self.monty)?;
        if rebuilt != *self {
            return Err(SimError::InvariantViolation {
                trial: self.trial,
                reason: format!(
                    "derived fields disagree with doors: got switch={} switch_win={} stay_win={}, \
                     expected switch={} switch_win={} stay_win={}",
                    self.switch_choice, self.switch_win, self.stay_win,
                    rebuilt.switch_choice, rebuilt.switch_win, rebuilt.stay_win,
                ),
            });
        }
        Ok(())
    }
}

/// Play one trial with the given source of randomness.
pub fn generate_trial<R: DoorRng + ?Sized>(rng: &mut R, trial: TrialIndex) -> SimResult<Trial> {
    let car = draw(rng, trial, "car", &Door::ALL)?;
    let player = draw(rng, trial, "player", &Door::ALL)?;

    // One candidate if the player is on the car, two otherwise.
    let host_options = remaining(&[player, car]);
    if host_options.is_empty() || host_options.len() > 2 {
        return Err(SimError::InvariantViolation {
            trial,
            reason: format!("host has {} legal doors", host_options.len()),
        });
    }
    let monty = draw(rng, trial, "host", &host_options)?;

    Trial::from_doors(trial, car, player, monty)
}

/// Doors not in `excluded`, ascending.
fn remaining(excluded: &[Door]) -> Vec<Door> {
    Door::ALL
        .iter()
        .copied()
        .filter(|d| !excluded.contains(d))
        .collect()
}

fn only_door(trial: TrialIndex, role: &str, candidates: Vec<Door>) -> SimResult<Door> {
    match candidates.as_slice() {
        [door] => Ok(*door),
        other => Err(SimError::InvariantViolation {
            trial,
            reason: format!("{role} door elimination left {} candidates", other.len()),
        }),
    }
}

fn draw<R: DoorRng + ?Sized>(
    rng: &mut R,
    trial: TrialIndex,
    role: &str,
    candidates: &[Door],
) -> SimResult<Door> {
    rng.pick_door(candidates).ok_or_else(|| SimError::InvariantViolation {
        trial,
        reason: format!("no {role} door to choose from"),
    })
}
