use super::{
    errors::{GateError, GateResult},
    events::GateEvent,
    states::GateState,
};
use crate::models::{AttributeKind, BatchJob, RecordId};
use crate::selection::SelectionSet;
use std::collections::HashMap;
use tracing::debug;

/// Two-step commit protocol guarding batch execution: select, request confirmation for an
/// operation kind, then confirm (or cancel).
#[derive(Debug, Clone, Default)]
pub struct ConfirmationGate {
    state: GateState,
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Open the confirmation for `kind`. Rejected with no state change when nothing is
    /// selected. Requesting again while awaiting replaces the pending kind.
    pub fn request_confirmation(
        &mut self,
        kind: AttributeKind,
        selection: &SelectionSet,
    ) -> GateResult<GateState> {
        if selection.is_empty() {
            return Err(GateError::EmptySelection);
        }
        self.apply(GateEvent::RequestConfirmation(kind))
    }

    /// Accept the pending operation and freeze the selection into a batch job.
    ///
    /// `reference_order` is the catalog snapshot order; selected ids found there are
    /// ordered by it, the remaining ids follow in selection insertion order.
    pub fn confirm(
        &mut self,
        selection: &SelectionSet,
        reference_order: &[RecordId],
    ) -> GateResult<BatchJob> {
        let kind = match self.state {
            GateState::AwaitingConfirmation(kind) => kind,
            GateState::Idle => return Err(self.invalid(GateEvent::Confirm)),
        };
        if selection.is_empty() {
            return Err(GateError::EmptySelection);
        }

        let positions: HashMap<RecordId, usize> = reference_order
            .iter()
            .enumerate()
            .map(|(position, id)| (*id, position))
            .collect();
        let mut record_ids = selection.ids().to_vec();
        record_ids.sort_by_key(|id| positions.get(id).copied().unwrap_or(usize::MAX));

        self.apply(GateEvent::Confirm)?;
        Ok(BatchJob::new(kind, record_ids))
    }

    /// Discard the pending operation. The selection is left untouched.
    pub fn cancel(&mut self) -> GateResult<()> {
        self.apply(GateEvent::Cancel).map(|_| ())
    }

    /// Determine the target state for an event without applying it
    pub fn determine_target_state(&self, event: &GateEvent) -> GateResult<GateState> {
        let target = match (self.state, event) {
            (_, GateEvent::RequestConfirmation(kind)) => GateState::AwaitingConfirmation(*kind),
            (GateState::AwaitingConfirmation(_), GateEvent::Confirm | GateEvent::Cancel) => {
                GateState::Idle
            }
            (GateState::Idle, _) => return Err(self.invalid(*event)),
        };
        Ok(target)
    }

    fn apply(&mut self, event: GateEvent) -> GateResult<GateState> {
        let target = self.determine_target_state(&event)?;
        debug!(
            from = %self.state,
            to = %target,
            event = event.event_type(),
            "Confirmation gate transition"
        );
        self.state = target;
        Ok(target)
    }

    fn invalid(&self, event: GateEvent) -> GateError {
        GateError::InvalidTransition {
            from: self.state.to_string(),
            event: event.event_type().to_string(),
        }
    }
}
