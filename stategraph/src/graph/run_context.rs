//! Run context for streaming-aware execution.
//!
//! Holds the stream sender plus the selected stream modes.

use std::collections::HashSet;

use tokio::sync::mpsc;

use crate::state::GraphState;
use crate::stream::{StreamEvent, StreamMode};

pub(crate) struct RunContext<S>
where
    S: GraphState,
{
    /// Sender for streaming events.
    pub stream_tx: mpsc::Sender<StreamEvent<S>>,
    /// Enabled stream modes (Values, Updates).
    pub stream_mode: HashSet<StreamMode>,
}

impl<S> RunContext<S>
where
    S: GraphState,
{
    pub fn wants(&self, mode: StreamMode) -> bool {
        self.stream_mode.contains(&mode)
    }

    /// Sends an event; a dropped receiver is ignored, the run continues.
    pub async fn emit(&self, event: StreamEvent<S>) {
        let _ = self.stream_tx.send(event).await;
    }
}
