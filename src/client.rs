//! This module provides a client to connect to a task server

use std::error::Error;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Response;
use url::Url;

use crate::error::GatewayError;
use crate::horizon::format_max_date;
use crate::task::{NewTask, Task, TaskId};
use crate::traits::TaskGateway;


/// A task gateway that talks to a task server over HTTP
#[derive(Clone, Debug)]
pub struct Client {
    url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Create a client. This does not start a connection
    ///
    /// `url` is the root of the API: a base such as `http://host/api` serves its tasks at `http://host/api/tasks`
    pub fn new<S: AsRef<str>>(url: S) -> Result<Self, Box<dyn Error>> {
        let mut url = Url::parse(url.as_ref())?;
        if url.path().ends_with('/') == false {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self{
            url,
            http: reqwest::Client::new(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    fn tasks_url(&self) -> Result<Url, GatewayError> {
        Ok(self.url.join("tasks")?)
    }

    fn task_url(&self, id: &TaskId, suffix: Option<&str>) -> Result<Url, GatewayError> {
        let mut url = self.tasks_url()?;
        {
            let mut segments = url.path_segments_mut()
                .map_err(|_| GatewayError::new(format!("{} cannot be a base URL", self.url)))?;
            segments.push(id.as_str());
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }
}

/// Turn a non-2xx answer into an error
fn check_status(response: Response) -> Result<Response, GatewayError> {
    if response.status().is_success() == false {
        log::warn!("{} answered {}", response.url(), response.status());
        return Err(GatewayError::unexpected_status(response.status()));
    }
    Ok(response)
}

#[async_trait]
impl TaskGateway for Client {
    async fn list_tasks(&self, max_date: NaiveDateTime) -> Result<Vec<Task>, GatewayError> {
        let date = format_max_date(&max_date);
        log::debug!("Fetching tasks up to {}", date);

        let response = self.http
            .get(self.tasks_url()?)
            .query(&[("date", &date)])
            .send()
            .await
            .map_err(|err| {
                log::warn!("Unable to fetch tasks: {}", err);
                GatewayError::from(err)
            })?;

        let tasks: Vec<Task> = check_status(response)?.json().await?;
        log::debug!("Server returned {} tasks", tasks.len());
        Ok(tasks)
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<(), GatewayError> {
        log::debug!("Creating task {:?}", new_task.desc);

        let response = self.http
            .post(self.tasks_url()?)
            .json(new_task)
            .send()
            .await
            .map_err(|err| {
                log::warn!("Unable to create task: {}", err);
                GatewayError::from(err)
            })?;

        check_status(response)?;
        Ok(())
    }

    async fn delete_task(&self, id: &TaskId) -> Result<(), GatewayError> {
        log::debug!("Deleting task {}", id);

        let response = self.http
            .delete(self.task_url(id, None)?)
            .send()
            .await
            .map_err(|err| {
                log::warn!("Unable to delete task {}: {}", id, err);
                GatewayError::from(err)
            })?;

        check_status(response)?;
        Ok(())
    }

    async fn toggle_task(&self, id: &TaskId) -> Result<(), GatewayError> {
        log::debug!("Toggling task {}", id);

        let response = self.http
            .put(self.task_url(id, Some("toggle"))?)
            .send()
            .await
            .map_err(|err| {
                log::warn!("Unable to toggle task {}: {}", id, err);
                GatewayError::from(err)
            })?;

        check_status(response)?;
        Ok(())
    }
}
