//! This module provides a local, file-backed task gateway
//!
//! It behaves like a task server would, but keeps its tasks in a JSON file on the device.
//! This is handy when no server is reachable (e.g. during development), or for tests.

use std::path::PathBuf;
use std::path::Path;
use std::error::Error;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use async_trait::async_trait;
use chrono::{NaiveDateTime, TimeZone, Utc};

use crate::error::GatewayError;
use crate::mock_behaviour::MockBehaviour;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskGateway;


/// A task gateway that stores its tasks in a local file
#[derive(Debug)]
pub struct Cache {
    backing_file: PathBuf,
    data: Mutex<CachedData>,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

#[derive(Default, Clone, Debug, PartialEq, Serialize, Deserialize)]
struct CachedData {
    tasks: Vec<Task>,
}

impl Cache {
    /// Initialize a cache from the content of a valid backing file if it exists.
    /// Returns an error otherwise
    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let data = match std::fs::File::open(path) {
            Err(err) => {
                return Err(format!("Unable to open file {:?}: {}", path, err).into());
            },
            Ok(file) => serde_json::from_reader(file)?,
        };

        Ok(Self{
            backing_file: PathBuf::from(path),
            data: Mutex::new(data),
            mock_behaviour: None,
        })
    }

    /// Initialize a cache with the default contents
    pub fn new(path: &Path) -> Self {
        Self{
            backing_file: PathBuf::from(path),
            data: Mutex::new(CachedData::default()),
            mock_behaviour: None,
        }
    }

    /// Open the cache at `path`, or start an empty one in case there is no valid file there yet
    pub fn open_or_new(path: &Path) -> Self {
        match Self::from_file(path) {
            Ok(cache) => cache,
            Err(err) => {
                log::warn!("Invalid cache file: {}. Using a default cache", err);
                Self::new(path)
            }
        }
    }

    /// Make this cache fail some operations, as configured in `mock_behaviour`
    pub fn set_mock_behaviour(&mut self, mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = mock_behaviour;
    }

    pub fn backing_file(&self) -> &Path {
        &self.backing_file
    }

    /// Add a task as-is (keeping its ID and completion date)
    pub fn insert_task(&self, task: Task) {
        self.data.lock().unwrap().tasks.push(task);
    }

    /// A copy of every stored task, regardless of its date
    pub fn all_tasks(&self) -> Vec<Task> {
        self.data.lock().unwrap().tasks.clone()
    }

    /// Store the current Cache to its backing file
    pub fn save_to_file(&self) -> Result<(), Box<dyn Error>> {
        let data = self.data.lock().unwrap().clone();
        let file = std::fs::File::create(&self.backing_file)?;
        serde_json::to_writer(file, &data)?;
        Ok(())
    }

    /// Save after a mutation. The in-memory data stays authoritative if this fails
    fn persist(&self) {
        if let Err(err) = self.save_to_file() {
            log::warn!("Unable to save file {:?}: {}", self.backing_file, err);
        }
    }

    fn check_behaviour<F>(&self, check: F) -> Result<(), GatewayError>
    where
        F: FnOnce(&mut MockBehaviour) -> Result<(), GatewayError>,
    {
        match &self.mock_behaviour {
            None => Ok(()),
            Some(behaviour) => check(&mut *behaviour.lock().unwrap()),
        }
    }

    fn not_found(id: &TaskId) -> GatewayError {
        GatewayError::new(format!("No task with ID {}", id))
    }
}

#[async_trait]
impl TaskGateway for Cache {
    async fn list_tasks(&self, max_date: NaiveDateTime) -> Result<Vec<Task>, GatewayError> {
        self.check_behaviour(MockBehaviour::can_list_tasks)?;

        let bound = Utc.from_utc_datetime(&max_date);
        let mut tasks: Vec<Task> = self.data.lock().unwrap().tasks
            .iter()
            .filter(|task| task.estimate_at() <= &bound)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| *task.estimate_at());
        Ok(tasks)
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<(), GatewayError> {
        self.check_behaviour(MockBehaviour::can_create_task)?;

        let task = Task::new(TaskId::random(), new_task.desc.clone(), new_task.estimate_at, None);
        log::debug!("Storing new task {}", task.id());
        self.data.lock().unwrap().tasks.push(task);
        self.persist();
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), GatewayError> {
        self.check_behaviour(MockBehaviour::can_delete_task)?;

        {
            let mut data = self.data.lock().unwrap();
            let before = data.tasks.len();
            data.tasks.retain(|task| task.id() != id);
            if data.tasks.len() == before {
                return Err(Self::not_found(id));
            }
        }
        self.persist();
        Ok(())
    }

    async fn toggle_task(&self, id: &TaskId) -> Result<(), GatewayError> {
        self.check_behaviour(MockBehaviour::can_toggle_task)?;

        {
            let mut data = self.data.lock().unwrap();
            match data.tasks.iter_mut().find(|task| task.id() == id) {
                None => return Err(Self::not_found(id)),
                Some(task) => task.toggle_completion(Utc::now()),
            }
        }
        self.persist();
        Ok(())
    }
}
