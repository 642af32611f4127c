//! The seams of this crate: where tasks come from, and where errors go to

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::error::GatewayError;
use crate::task::{NewTask, Task, TaskId};

/// A source of tasks, that is usually a remote server (see [`Client`](crate::client::Client)).
///
/// Every call is attempted exactly once. Implementors never retry.
#[async_trait]
pub trait TaskGateway: Send + Sync {
    /// Returns every task whose estimate date is on or before `max_date` (inclusive)
    async fn list_tasks(&self, max_date: NaiveDateTime) -> Result<Vec<Task>, GatewayError>;

    /// Create a new task. Its ID is chosen by the gateway
    async fn create_task(&self, new_task: &NewTask) -> Result<(), GatewayError>;

    async fn delete_task(&self, id: &TaskId) -> Result<(), GatewayError>;

    /// Flip a task between done and pending.
    /// The resulting completion date is decided by the gateway, callers should fetch it again.
    async fn toggle_task(&self, id: &TaskId) -> Result<(), GatewayError>;
}

/// Something that is able to tell the user something went wrong
pub trait Notifier: Send + Sync {
    fn notify_error(&self, error: &GatewayError);
}

/// The default [`Notifier`], that simply logs the alert it would display
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify_error(&self, error: &GatewayError) {
        log::error!("Ops! Ocorreu um Problema! Mensagem: {}", error);
    }
}
