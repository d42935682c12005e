//! Interactive search session over the business directory.

pub mod error;
pub mod orchestrator;
pub mod session;
pub mod state;

pub use error::SessionError;
pub use orchestrator::{FetchRequest, SearchOrchestrator};
pub use session::{SearchSession, SessionSettings};
pub use state::{FetchOutcome, FetchTicket, PageLinks, ResultsStatus, ResultsView};
