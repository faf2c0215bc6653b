//! Per-episode mutable state and the action-application algorithm.
//!
//! An `Episode` is created once from a `RoomSystem` and an
//! `EpisodeConfig`, mutated exclusively through [`Episode::apply`], and
//! frozen once terminal. The rule table is a single dispatch on
//! `(phase, action)`; there are no scattered phase checks.
//!
//! Uses `im` persistent collections for the knowledge map, key/lock
//! ledger and failure log, so cloning an episode for driver-side search
//! or rollback is O(1).

use im::{HashMap as ImHashMap, OrdSet, Vector};
use serde::{Deserialize, Serialize};

use crate::core::{
    Action, EngineError, EpisodeConfig, FailedAction, FailureReason, Outcome, Phase,
    BASE_STEP_COST,
};
use crate::system::{RoomId, RoomSystem};

use super::knowledge::KnowledgeSnapshot;
use super::observation::{FailureNotice, ObservationDelta};

/// One running (or finished) episode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    system: RoomSystem,
    config: EpisodeConfig,

    phase: Phase,
    current: RoomId,

    /// Rooms the agent has inspected. Absence means unknown.
    known: ImHashMap<RoomId, KnowledgeSnapshot>,
    /// Keys held, identified by the room they were taken from.
    inventory: OrdSet<RoomId>,
    /// Rooms that still contain their key.
    floor_keys: OrdSet<RoomId>,
    /// Locked rooms opened via USEKEY.
    unlocked: OrdSet<RoomId>,

    steps_used_execution: u32,
    observation_cost: f64,
    execution_cost: f64,

    failed_actions: Vector<FailedAction>,
    outcome: Option<Outcome>,
}

impl Episode {
    /// Start an episode. The agent begins at the start room, in
    /// Observation, knowing nothing (the start room itself must be
    /// inspected explicitly).
    #[must_use]
    pub fn new(system: RoomSystem, config: EpisodeConfig) -> Self {
        let current = system.start_room_id();
        let floor_keys = system
            .room_ids()
            .into_iter()
            .filter(|&id| system.room_info(id).is_some_and(|room| room.has_key))
            .collect();

        Self {
            system,
            config,
            phase: Phase::Observation,
            current,
            known: ImHashMap::new(),
            inventory: OrdSet::new(),
            floor_keys,
            unlocked: OrdSet::new(),
            steps_used_execution: 0,
            observation_cost: 0.0,
            execution_cost: 0.0,
            failed_actions: Vector::new(),
            outcome: None,
        }
    }

    // === Accessors ===

    /// The ground-truth system this episode runs against.
    #[must_use]
    pub fn system(&self) -> &RoomSystem {
        &self.system
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Where the agent stands.
    #[must_use]
    pub fn current_room_id(&self) -> RoomId {
        self.current
    }

    /// Knowledge of one room, if inspected.
    #[must_use]
    pub fn knowledge_of(&self, id: RoomId) -> Option<&KnowledgeSnapshot> {
        self.known.get(&id)
    }

    /// Number of rooms currently known.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.known.len()
    }

    /// Keys held, by origin room.
    #[must_use]
    pub fn inventory(&self) -> &OrdSet<RoomId> {
        &self.inventory
    }

    /// Number of keys held.
    #[must_use]
    pub fn keys_held(&self) -> usize {
        self.inventory.len()
    }

    /// Execution steps consumed so far.
    #[must_use]
    pub fn steps_used_execution(&self) -> u32 {
        self.steps_used_execution
    }

    /// Execution steps left in the budget.
    #[must_use]
    pub fn steps_remaining(&self) -> u32 {
        self.config
            .actions_remaining
            .saturating_sub(self.steps_used_execution)
    }

    /// Accumulated Observation-phase cost.
    #[must_use]
    pub fn observation_cost(&self) -> f64 {
        self.observation_cost
    }

    /// Accumulated Execution-phase cost.
    #[must_use]
    pub fn execution_cost(&self) -> f64 {
        self.execution_cost
    }

    /// Total accumulated step cost across both phases.
    #[must_use]
    pub fn cost_accumulated(&self) -> f64 {
        self.observation_cost + self.execution_cost
    }

    /// Every rejected action, in submission order. Recorded regardless of
    /// `failure_show`.
    #[must_use]
    pub fn failed_actions(&self) -> &Vector<FailedAction> {
        &self.failed_actions
    }

    /// Terminal outcome, once the episode has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Whether the episode has ended.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    // === Action application ===

    /// Validate and apply one action.
    ///
    /// In-game rule violations do not error: they are recorded and
    /// reported through the returned delta. The only error here is
    /// [`EngineError::EpisodeClosed`], for actions submitted after
    /// termination; the state is left untouched in that case.
    pub fn apply(&mut self, action: Action) -> Result<ObservationDelta, EngineError> {
        if let Some(outcome) = self.outcome {
            return Err(EngineError::EpisodeClosed { outcome });
        }

        let phase_at_submit = self.phase;
        let effect = match phase_at_submit {
            Phase::Observation => self.apply_observation(action),
            Phase::Execution => self.apply_execution(action),
        };

        let (revealed, failure) = match effect {
            Ok(revealed) => (revealed, None),
            Err(reason) => {
                self.failed_actions.push_back(FailedAction {
                    action,
                    reason,
                    phase: phase_at_submit,
                    step: self.steps_used_execution,
                });
                (None, Some(reason))
            }
        };

        self.check_termination(phase_at_submit);

        Ok(ObservationDelta {
            phase: self.phase,
            current_room: self.current,
            revealed,
            keys_held: self.inventory.len(),
            steps_remaining: self.steps_remaining(),
            failure: failure.map(|reason| {
                if self.config.failure_show {
                    FailureNotice::Reason(reason)
                } else {
                    FailureNotice::NoEffect
                }
            }),
            outcome: self.outcome,
        })
    }

    fn apply_observation(
        &mut self,
        action: Action,
    ) -> Result<Option<(RoomId, KnowledgeSnapshot)>, FailureReason> {
        match action {
            Action::Move(target) => {
                if !self.is_adjacent(self.current, target) {
                    return Err(FailureReason::NotAdjacent);
                }
                // Locks are inert while observing; movement auto-inspects
                // the destination at the weighted cost.
                self.current = target;
                self.observation_cost += self.config.obs_inspect_weight;
                Ok(Some(self.reveal(target)))
            }
            Action::Inspect => {
                self.observation_cost += BASE_STEP_COST;
                Ok(Some(self.reveal(self.current)))
            }
            Action::GetKey | Action::UseKey(_) => Err(FailureReason::PhaseMismatch),
            Action::Commit => {
                self.phase = Phase::Execution;
                self.current = self.system.start_room_id();
                if self.config.commit_reset {
                    self.known.clear();
                }
                if self.config.commit_clear_inventory {
                    self.inventory.clear();
                }
                Ok(None)
            }
        }
    }

    fn apply_execution(
        &mut self,
        action: Action,
    ) -> Result<Option<(RoomId, KnowledgeSnapshot)>, FailureReason> {
        // Every submitted execution action burns budget, valid or not.
        self.steps_used_execution += 1;
        self.execution_cost += BASE_STEP_COST;

        match action {
            Action::Move(target) => {
                if !self.is_adjacent(self.current, target) {
                    return Err(FailureReason::NotAdjacent);
                }
                if self.is_locked_now(target) {
                    return Err(FailureReason::LockedDestination);
                }
                self.current = target;
                Ok(None)
            }
            Action::Inspect => Ok(Some(self.reveal(self.current))),
            Action::GetKey => {
                if !self.floor_keys.contains(&self.current) {
                    return Err(FailureReason::NoKeyHere);
                }
                self.floor_keys.remove(&self.current);
                self.inventory.insert(self.current);
                Ok(None)
            }
            Action::UseKey(target) => {
                if !self.is_adjacent(self.current, target) {
                    return Err(FailureReason::NotAdjacent);
                }
                if !self.is_locked_now(target) {
                    return Err(FailureReason::NotLocked);
                }
                // Keys are fungible; spend the lowest-numbered one.
                let Some(spent) = self.inventory.get_min().copied() else {
                    return Err(FailureReason::NoKeyHeld);
                };
                self.inventory.remove(&spent);
                self.unlocked.insert(target);
                Ok(None)
            }
            Action::Commit => Err(FailureReason::AlreadyCommitted),
        }
    }

    fn check_termination(&mut self, phase_at_submit: Phase) {
        if let Some(limit) = self.config.failure_limit {
            if self.failed_actions.len() as u32 >= limit {
                self.outcome = Some(Outcome::Failure);
                return;
            }
        }

        if phase_at_submit == Phase::Execution {
            if self.current == self.system.exit_room_id() && !self.is_locked_now(self.current) {
                self.outcome = Some(Outcome::Success);
            } else if self.steps_used_execution >= self.config.actions_remaining {
                self.outcome = Some(Outcome::Exhausted);
            }
        }
    }

    // === Internal helpers ===

    fn is_adjacent(&self, from: RoomId, to: RoomId) -> bool {
        self.system.neighbors(from).contains(&to)
    }

    /// Current lock state, combining ground truth with the USEKEY ledger.
    fn is_locked_now(&self, id: RoomId) -> bool {
        self.system.is_locked(self.current, id) && !self.unlocked.contains(&id)
    }

    /// Snapshot a room into the knowledge map and return what was seen.
    fn reveal(&mut self, id: RoomId) -> (RoomId, KnowledgeSnapshot) {
        let room = self
            .system
            .room_info(id)
            .expect("episode positions always refer to rooms of its system");
        let snapshot = KnowledgeSnapshot {
            neighbors: room.neighbors.clone(),
            locked: room.locked && !self.unlocked.contains(&id),
            has_key: self.floor_keys.contains(&id),
            is_exit: room.is_exit,
        };
        self.known.insert(id, snapshot.clone());
        (id, snapshot)
    }
}
