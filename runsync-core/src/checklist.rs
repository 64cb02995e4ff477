use tokio::sync::broadcast;

/// A collaborator reset whenever an operator moves to another run.
pub trait ResetChecklist: Send + Sync {
    fn reset(&self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChecklistReset;

/// Broadcasts checklist resets to subscribers such as dashboards.
#[derive(Clone)]
pub struct Checklist(broadcast::Sender<ChecklistReset>);

impl Checklist {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(16);
        Checklist(sender)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChecklistReset> {
        self.0.subscribe()
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetChecklist for Checklist {
    fn reset(&self) {
        tracing::debug!("Reset checklist");
        // No subscriber, no one to notify.
        let _ = self.0.send(ChecklistReset);
    }
}


// </coverage:exclude>
