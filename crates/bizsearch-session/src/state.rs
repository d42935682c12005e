use bizsearch_core::FetchMode;

use crate::orchestrator::FetchRequest;

/// Fetch status of the results section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultsStatus {
    #[default]
    Ready,
    Loading,
}

/// What the results section should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsView {
    Loading,
    /// No request has completed yet.
    Waiting,
    /// A request completed with no records.
    Empty(&'static str),
    Ready,
}

/// Which paging links are live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageLinks {
    pub previous: bool,
    pub next: bool,
}

/// Handle for one in-flight fetch.
///
/// Only the ticket carrying the newest token may update the session; older
/// tickets are discarded on completion.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchTicket {
    pub token: u64,
    pub mode: FetchMode,
    pub offset: u32,
    pub request: FetchRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer fetch was started before this one finished.
    Stale,
}
