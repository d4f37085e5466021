/// Messages sent from background jobs back to the UI
#[derive(Debug, Clone, PartialEq)]
pub enum JobMessage {
    Progress { done: usize, total: usize, label: String },
    Finished(String),
    Failed(String),
}
