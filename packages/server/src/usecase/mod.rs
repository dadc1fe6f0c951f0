//! UseCase layer: session join/leave, message routing and registry queries.

mod error;
mod join_session;
mod leave_session;
mod list_clients;
mod router;

pub use error::{JoinError, LeaveError};
pub use join_session::JoinSessionUseCase;
pub use leave_session::LeaveSessionUseCase;
pub use list_clients::ListClientsUseCase;
pub use router::{DispatchOutcome, MessageRouter};
