//! This crate provides the client side of a dated to-do list.
//!
//! Tasks live on a task server, that is reached through a [`Client`](client::Client). \
//! When no server is available, a local [`Cache`](cache::Cache) file can stand in for it. Both implement the [`TaskGateway`](traits::TaskGateway) trait,
//! and a [`Provider`] picks one of them from the [`Settings`](config::Settings).
//!
//! A [`TaskList`](task_list::TaskList) fetches the tasks due within a [`Horizon`] (today, tomorrow, this week, this month),
//! optionally hides the completed ones, and reloads everything from the gateway after each change.

pub mod traits;
pub mod error;
pub use error::GatewayError;

pub mod task;
pub use task::{NewTask, Task, TaskId};
pub mod horizon;
pub use horizon::Horizon;
pub mod task_list;
pub use task_list::TaskList;

pub mod client;
pub mod cache;
pub mod provider;
pub use provider::Provider;
pub mod mock_behaviour;

pub mod config;
pub mod utils;
