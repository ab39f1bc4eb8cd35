//! The validate/apply contract every action implements.

use crate::action::ExecuteError;
use crate::env::Env;
use crate::state::{GameState, OwnerId};

/// A state transition driven by a player or unit command.
///
/// Transitions run in two phases: `pre_validate` inspects the current state
/// without mutating, then `apply` performs the mutation. An action is atomic
/// within a tick: any error from either phase leaves the state untouched.
pub trait ActionTransition {
    /// Validates against the current state. Default: nothing to check.
    fn pre_validate(&self, _state: &GameState, _env: &Env<'_>) -> Result<(), ExecuteError> {
        Ok(())
    }

    /// Applies the transition and reports which owners' holdings changed
    /// (the notification fan-out targets).
    fn apply(&self, state: &mut GameState, env: &mut Env<'_>) -> Result<Vec<OwnerId>, ExecuteError>;
}
