//! This module holds the state of a task list, as displayed to a user
//!
//! A [`TaskList`] keeps every task fetched from its gateway, and derives the tasks that should be visible from them.
//! It never patches tasks locally: every successful mutation is followed by a full reload from the gateway.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::{DateTime, Local, Utc};

use crate::error::GatewayError;
use crate::horizon::{self, Horizon};
use crate::task::{NewTask, Task, TaskId};
use crate::traits::{LogNotifier, Notifier, TaskGateway};

pub mod view;
use view::{ListView, ViewReceiver, ViewSender};


/// The tasks that should be displayed.
///
/// That is `tasks` as-is when done tasks are shown, or only its pending tasks otherwise. Order is preserved.
pub fn visible_tasks(tasks: &[Task], show_done_tasks: bool) -> Vec<Task> {
    if show_done_tasks {
        tasks.to_vec()
    } else {
        tasks.iter()
            .filter(|task| task.is_pending())
            .cloned()
            .collect()
    }
}


#[derive(Debug)]
struct ListState {
    tasks: Vec<Task>,
    visible_tasks: Vec<Task>,
    show_done_tasks: bool,
}

impl ListState {
    fn recompute_visible(&mut self) {
        self.visible_tasks = visible_tasks(&self.tasks, self.show_done_tasks);
    }

    fn view(&self) -> ListView {
        ListView {
            visible_tasks: self.visible_tasks.clone(),
            show_done_tasks: self.show_done_tasks,
            total: self.tasks.len(),
        }
    }
}


/// A list of tasks, fetched from a [`TaskGateway`] for a given horizon.
///
/// Every method takes `&self`, so that several operations can be in flight at the same time
/// (e.g. a user deleting a task while a toggle is still waiting for the server).
/// In that case, every operation reloads the list when it is done, and only the most recently started reload is applied.
///
/// Errors are never returned to the caller: they are reported (once) to the [`Notifier`], and the list keeps its previous content.
/// Operations return whether they succeeded. For mutations, that is whether the gateway accepted the change: the reload that follows reports its own failures.
pub struct TaskList<G: TaskGateway> {
    gateway: G,
    notifier: Box<dyn Notifier>,
    days_ahead: u32,
    clock: fn() -> DateTime<Local>,

    state: Mutex<ListState>,
    view_sender: ViewSender,
    /// The sequence number of the most recently started reload
    last_reload: AtomicU64,
    disposed: AtomicBool,
}

impl<G: TaskGateway> TaskList<G> {
    /// Create an empty list. Nothing is fetched until [`Self::reload`] is called
    pub fn new(gateway: G, days_ahead: u32) -> Self {
        let (view_sender, _) = view::view_channel();
        Self {
            gateway,
            notifier: Box::new(LogNotifier),
            days_ahead,
            clock: Local::now,
            state: Mutex::new(ListState {
                tasks: Vec::new(),
                visible_tasks: Vec::new(),
                show_done_tasks: true,
            }),
            view_sender,
            last_reload: AtomicU64::new(0),
            disposed: AtomicBool::new(false),
        }
    }

    /// Report errors to a custom notifier instead of the log
    pub fn with_notifier<N: Notifier + 'static>(mut self, notifier: N) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Use a custom clock to compute the date window
    pub fn with_clock(mut self, clock: fn() -> DateTime<Local>) -> Self {
        self.clock = clock;
        self
    }

    pub fn gateway(&self) -> &G { &self.gateway }
    pub fn days_ahead(&self) -> u32 { self.days_ahead }
    pub fn horizon(&self) -> Horizon { Horizon::from_days(self.days_ahead) }

    /// Every task of the last successful reload
    pub fn tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().tasks.clone()
    }
    pub fn visible_tasks(&self) -> Vec<Task> {
        self.state.lock().unwrap().visible_tasks.clone()
    }
    pub fn show_done_tasks(&self) -> bool {
        self.state.lock().unwrap().show_done_tasks
    }

    /// Watch what this list displays.
    ///
    /// The receiver is notified every time the visible tasks are recomputed
    pub fn subscribe(&self) -> ViewReceiver {
        self.view_sender.subscribe()
    }

    /// Mark this list as torn down.
    ///
    /// Requests that are still in flight are not aborted, but their outcome will be ignored: they will neither update this list nor notify any error.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Fetch the tasks for this list's horizon
    pub async fn reload(&self) -> bool {
        self.reload_days(self.days_ahead).await
    }

    /// Fetch every task that is due at most `days_ahead` days from now, and replace the current tasks with them
    pub async fn reload_days(&self, days_ahead: u32) -> bool {
        let seq = self.last_reload.fetch_add(1, Ordering::SeqCst) + 1;
        let max_date = horizon::max_date(days_ahead, (self.clock)());
        log::debug!("Reload #{} up to {}", seq, horizon::format_max_date(&max_date));

        let result = self.gateway.list_tasks(max_date).await;

        // Checked under the state lock, so that an older reload can never write after a newer one
        let mut state = self.state.lock().unwrap();
        if self.is_disposed() {
            log::debug!("Reload #{} finished after the list has been disposed. Ignoring it", seq);
            return result.is_ok();
        }
        if self.last_reload.load(Ordering::SeqCst) != seq {
            log::debug!("Reload #{} has been superseded by a newer one. Ignoring its result", seq);
            return result.is_ok();
        }

        match result {
            Err(err) => {
                drop(state);
                self.report(&err);
                false
            },
            Ok(tasks) => {
                log::info!("Loaded {} tasks", tasks.len());
                state.tasks = tasks;
                self.refresh(&mut state);
                true
            },
        }
    }

    /// Create a task, then reload the list
    ///
    /// Returns whether the task has been created (a form can use this to know whether it should close).
    /// A failing reload is reported on its own, but does not make this return `false`: the task exists on the gateway.
    pub async fn add<S: AsRef<str>>(&self, description: S, date: DateTime<Utc>) -> bool {
        let description = description.as_ref().trim();
        if description.is_empty() {
            self.report(&GatewayError::new("A task needs a description"));
            return false;
        }

        let new_task = NewTask::new(description, date);
        if let Err(err) = self.gateway.create_task(&new_task).await {
            self.report(&err);
            return false;
        }
        self.reload().await;
        true
    }

    /// Delete a task, then reload the list
    ///
    /// Returns whether the task has been deleted, regardless of how the reload went
    pub async fn remove(&self, id: &TaskId) -> bool {
        if let Err(err) = self.gateway.delete_task(id).await {
            self.report(&err);
            return false;
        }
        self.reload().await;
        true
    }

    /// Mark a task as done (or pending again), then reload the list
    ///
    /// Returns whether the task has been toggled, regardless of how the reload went
    pub async fn toggle(&self, id: &TaskId) -> bool {
        if let Err(err) = self.gateway.toggle_task(id).await {
            self.report(&err);
            return false;
        }
        self.reload().await;
        true
    }

    /// Choose whether done tasks should be visible
    pub fn set_show_done(&self, show_done_tasks: bool) {
        let mut state = self.state.lock().unwrap();
        state.show_done_tasks = show_done_tasks;
        self.refresh(&mut state);
    }

    /// Show done tasks if they are hidden, hide them otherwise
    pub fn toggle_filter(&self) {
        let mut state = self.state.lock().unwrap();
        state.show_done_tasks = !state.show_done_tasks;
        self.refresh(&mut state);
    }

    fn refresh(&self, state: &mut ListState) {
        state.recompute_visible();
        self.view_sender.send_replace(state.view());
    }

    fn report(&self, err: &GatewayError) {
        if self.is_disposed() {
            log::debug!("Not reporting an error on a disposed list: {}", err);
            return;
        }
        log::warn!("Task list operation failed: {}", err);
        self.notifier.notify_error(err);
    }
}
