//! Stream events emitted while a debate runs.
//!
//! Internal code only ever deals in this tagged type; the line-oriented
//! text form (and its status-vs-result framing) is produced by the HTTP
//! wire adapter at the outermost boundary.

/// One event in the progress stream of a debate run.
///
/// A successful run yields zero or more `Status` events followed by exactly
/// one `Result`, always last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Human-readable progress line for one round
    Status(String),
    /// The final artifact: the content of the winning writer draft
    Result(String),
}

impl StreamEvent {
    pub fn is_result(&self) -> bool {
        matches!(self, StreamEvent::Result(_))
    }
}
