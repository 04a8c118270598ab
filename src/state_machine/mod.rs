// State machine module for batch generation
//
// Two small machines live here: the confirmation gate that turns a selection into a
// committed batch job, and the executor/job lifecycle states reported while a job runs.

pub mod errors;
pub mod events;
pub mod gate;
pub mod states;

// Re-export main types for convenient access
pub use errors::{GateError, GateResult};
pub use events::GateEvent;
pub use gate::ConfirmationGate;
pub use states::{ExecutorState, GateState, JobState};
