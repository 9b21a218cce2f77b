use anyhow::Result;
use tokio::sync::mpsc;

use super::SessionOrchestrator;
use crate::domain::models::Action;

pub struct ActionsService {}

impl ActionsService {
    /// Processes intents strictly one after the other, so a second quiz page
    /// or upload can never race the one in flight.
    pub async fn start(
        mut orchestrator: SessionOrchestrator,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        while let Some(action) = rx.recv().await {
            tracing::debug!(action = ?action, "Dispatching action");
            orchestrator.dispatch(action).await;
        }

        return Ok(());
    }
}
