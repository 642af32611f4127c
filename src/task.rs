//! To-do tasks, as exchanged with a task server

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// The identifier the server assigned to a task.
///
/// Servers may use numbers or strings. Both are stored as text, so that `2` and `"2"` are the same ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TaskId {
    content: String,
}

impl TaskId {
    /// Generate a random TaskId (used by the local gateway, since there is no server to assign one)
    pub fn random() -> Self {
        let random = uuid::Uuid::new_v4().to_hyphenated().to_string();
        Self { content: random }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }
}

impl From<String> for TaskId {
    fn from(content: String) -> Self {
        Self { content }
    }
}
impl From<&str> for TaskId {
    fn from(content: &str) -> Self {
        Self { content: content.to_string() }
    }
}
impl From<u64> for TaskId {
    fn from(n: u64) -> Self {
        Self { content: n.to_string() }
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.content)
    }
}

/// Used to support serde
impl Serialize for TaskId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.content)
    }
}
/// Used to support serde
impl<'de> Deserialize<'de> for TaskId {
    fn deserialize<D>(deserializer: D) -> Result<TaskId, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(serde_json::Number),
            Text(String),
        }

        let content = match RawId::deserialize(deserializer)? {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s,
        };
        Ok(TaskId{ content })
    }
}


/// A to-do task
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,

    /// What has to be done
    #[serde(rename = "desc")]
    description: String,

    /// The day this task is expected to be done
    #[serde(rename = "estimateAt", with = "lenient_date")]
    estimate_at: DateTime<Utc>,

    /// When this task has been completed. `None` means the task is still pending
    #[serde(rename = "doneAt", with = "lenient_optional_date", default)]
    done_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(id: TaskId, description: String, estimate_at: DateTime<Utc>, done_at: Option<DateTime<Utc>>) -> Self {
        Self { id, description, estimate_at, done_at }
    }

    pub fn id(&self) -> &TaskId                    { &self.id          }
    pub fn description(&self) -> &str              { &self.description }
    pub fn estimate_at(&self) -> &DateTime<Utc>    { &self.estimate_at }
    pub fn done_at(&self) -> Option<&DateTime<Utc>> { self.done_at.as_ref() }

    /// A task is pending until it gets a completion date
    pub fn is_pending(&self) -> bool {
        self.done_at.is_none()
    }
    pub fn completed(&self) -> bool {
        self.done_at.is_some()
    }

    /// Flip the completion status.
    ///
    /// Only the local gateway does this: a client talking to a server always re-fetches the server's version instead.
    pub(crate) fn toggle_completion(&mut self, now: DateTime<Utc>) {
        self.done_at = match self.done_at {
            Some(_) => None,
            None => Some(now),
        };
    }
}


/// The payload used to create a task. The server assigns the ID
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewTask {
    pub desc: String,
    #[serde(rename = "estimateAt", with = "lenient_date")]
    pub estimate_at: DateTime<Utc>,
}

impl NewTask {
    pub fn new<S: ToString>(desc: S, estimate_at: DateTime<Utc>) -> Self {
        Self { desc: desc.to_string(), estimate_at }
    }
}


/// Parse a date as servers tend to send them.
///
/// RFC3339 is preferred, but `YYYY-MM-DD HH:MM[:SS]` and bare `YYYY-MM-DD` are accepted too (they are read as UTC)
pub fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()
        .map(|date| Utc.from_utc_datetime(&date.and_hms(0, 0, 0)))
}

mod lenient_date {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use chrono::{DateTime, Utc};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_date(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid date {:?}", text)))
    }
}

mod lenient_optional_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use chrono::{DateTime, Utc};

    pub fn serialize<S: Serializer>(date: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => super::lenient_date::serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        #[derive(Deserialize)]
        struct Wrapper(#[serde(with = "super::lenient_date")] DateTime<Utc>);

        let wrapped: Option<Wrapper> = Option::deserialize(deserializer)?;
        Ok(wrapped.map(|Wrapper(date)| date))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_server_task() {
        let json = r#"[
            {"id": 1, "desc": "Buy the course", "estimateAt": "2024-01-10T02:59:00.000Z", "doneAt": null},
            {"id": "abc", "desc": "Finish it", "estimateAt": "2024-01-10 23:59", "doneAt": "2024-01-01"}
        ]"#;
        let tasks: Vec<Task> = serde_json::from_str(json).unwrap();

        assert_eq!(tasks[0].id(), &TaskId::from(1));
        assert_eq!(tasks[0].description(), "Buy the course");
        assert!(tasks[0].is_pending());
        assert_eq!(tasks[0].estimate_at(), &Utc.ymd(2024, 1, 10).and_hms(2, 59, 0));

        assert_eq!(tasks[1].id().as_str(), "abc");
        assert!(tasks[1].completed());
        assert_eq!(tasks[1].done_at(), Some(&Utc.ymd(2024, 1, 1).and_hms(0, 0, 0)));
        assert_eq!(tasks[1].estimate_at(), &Utc.ymd(2024, 1, 10).and_hms(23, 59, 0));
    }

    #[test]
    fn missing_done_at_means_pending() {
        let task: Task = serde_json::from_str(r#"{"id": 7, "desc": "x", "estimateAt": "2024-03-01"}"#).unwrap();
        assert!(task.is_pending());
    }

    #[test]
    fn invalid_date_is_rejected() {
        let res: Result<Task, _> = serde_json::from_str(r#"{"id": 7, "desc": "x", "estimateAt": "tomorrow"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn serialized_shape() {
        let task = Task::new(TaskId::from(3), "Write".to_string(), Utc.ymd(2024, 5, 2).and_hms(12, 0, 0), None);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value, serde_json::json!({
            "id": "3",
            "desc": "Write",
            "estimateAt": "2024-05-02T12:00:00+00:00",
            "doneAt": null,
        }));

        let reparsed: Task = serde_json::from_value(value).unwrap();
        assert_eq!(reparsed, task);
    }

    #[test]
    fn toggling_completion() {
        let now = Utc.ymd(2024, 5, 2).and_hms(8, 0, 0);
        let mut task = Task::new(TaskId::random(), "Write".to_string(), now, None);
        task.toggle_completion(now);
        assert_eq!(task.done_at(), Some(&now));
        task.toggle_completion(now);
        assert!(task.is_pending());
    }
}
