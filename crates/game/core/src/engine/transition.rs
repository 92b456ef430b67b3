//! Three-phase action execution.

use crate::action::{ActionError, ActionOutcome, ActionTransition};
use crate::state::GameState;

use super::errors::{TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and collect the outcome
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
pub(super) fn drive_transition(
    transition: &dyn ActionTransition,
    state: &mut GameState,
) -> Result<ActionOutcome, TransitionPhaseError<ActionError>> {
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let outcome = transition
        .apply(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(outcome)
}
