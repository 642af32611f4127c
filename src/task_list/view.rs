//! Publication of what a task list currently displays

use std::fmt::{Display, Error, Formatter};

use crate::task::Task;

/// What a task list shows at a given moment
#[derive(Clone, Debug, PartialEq)]
pub struct ListView {
    /// The tasks to render, in order
    pub visible_tasks: Vec<Task>,
    /// Whether completed tasks are shown
    pub show_done_tasks: bool,
    /// How many tasks have been fetched, including the hidden ones
    pub total: usize,
}

impl Default for ListView {
    fn default() -> Self {
        Self { visible_tasks: Vec::new(), show_done_tasks: true, total: 0 }
    }
}

impl Display for ListView {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        let hidden = self.total.saturating_sub(self.visible_tasks.len());
        match hidden {
            0 => write!(f, "{} tasks", self.total),
            _ => write!(f, "{} tasks ({} done hidden)", self.visible_tasks.len(), hidden),
        }
    }
}


/// See [`view_channel`]
pub type ViewSender = tokio::sync::watch::Sender<ListView>;
/// See [`view_channel`]
pub type ViewReceiver = tokio::sync::watch::Receiver<ListView>;

/// Create a channel, that a presentation layer can watch to re-render whenever the visible tasks change
pub fn view_channel() -> (ViewSender, ViewReceiver) {
    tokio::sync::watch::channel(ListView::default())
}
