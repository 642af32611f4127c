//! A gateway chosen at runtime: either a task server, or a local file

use std::error::Error;

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::cache::Cache;
use crate::client::Client;
use crate::config::Settings;
use crate::error::GatewayError;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskGateway;

/// Either of the gateways this crate provides.
///
/// Both behave the same way from the point of view of a [`TaskList`](crate::task_list::TaskList).
#[derive(Debug)]
pub enum Provider {
    Remote(Client),
    Local(Cache),
}

/// Forwards a `TaskGateway` call to the inner gateway
macro_rules! forward {
    ($self:ident, $method:ident ( $($arg:expr),* )) => {
        match $self {
            Provider::Remote(client) => client.$method($($arg),*).await,
            Provider::Local(cache) => cache.$method($($arg),*).await,
        }
    }
}

impl Provider {
    /// A local gateway if `settings` name a local store, a server client otherwise
    pub fn from_settings(settings: &Settings) -> Result<Self, Box<dyn Error>> {
        match &settings.local_store {
            Some(path) => {
                log::info!("Using local tasks from {:?}", path);
                Ok(Provider::Local(Cache::open_or_new(path)))
            },
            None => {
                log::info!("Using task server at {}", settings.server_url);
                Ok(Provider::Remote(Client::new(&settings.server_url)?))
            },
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Provider::Local(_))
    }
}

#[async_trait]
impl TaskGateway for Provider {
    async fn list_tasks(&self, max_date: NaiveDateTime) -> Result<Vec<Task>, GatewayError> {
        forward!(self, list_tasks(max_date))
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<(), GatewayError> {
        forward!(self, create_task(new_task))
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), GatewayError> {
        forward!(self, delete_task(id))
    }

    async fn toggle_task(&self, id: &TaskId) -> Result<(), GatewayError> {
        forward!(self, toggle_task(id))
    }
}
