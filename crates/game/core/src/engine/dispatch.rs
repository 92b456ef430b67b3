//! Event dispatch.

use crate::action::Action;
use crate::event::Event;
use crate::hooks::visit;
use crate::state::GameState;

/// Collects every object's reaction to `event`, in visitation order.
///
/// Handlers only return actions; nothing here re-enters dispatch.
pub(crate) fn dispatch(game: &GameState, event: &Event) -> Vec<Action> {
    let mut actions = Vec::new();
    for object in visit(game) {
        let triggered = object.on_event(event, game);
        if !triggered.is_empty() {
            tracing::trace!(
                target: "tcg::engine",
                event = event.as_ref(),
                object = %object.name(),
                count = triggered.len(),
                "event triggered actions"
            );
            actions.extend(triggered);
        }
    }
    actions
}
