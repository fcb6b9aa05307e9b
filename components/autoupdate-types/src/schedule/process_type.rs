use serde::{Deserialize, Serialize};

/// Scheduling priority class of the managed job.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ProcessType {
    /// Low-priority job that doesn't compete with the foreground work.
    #[default]
    Background,
}
