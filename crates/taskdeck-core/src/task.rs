use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
        }
    }
}

impl std::str::FromStr for Status {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TODO" => Ok(Status::Todo),
            "IN_PROGRESS" => Ok(Status::InProgress),
            "DONE" => Ok(Status::Done),
            other => Err(anyhow::anyhow!(
                "unknown status: {other} (expected TODO, IN_PROGRESS or DONE)"
            )),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire shape of a task record. Ids and timestamps are assigned by the
/// backend; the client never generates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    pub title: String,

    pub description: String,

    pub status: Status,

    pub priority: u8,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// In-memory form state for a task being created or edited. Fields the
/// user has not filled in yet stay unset, which is what validation
/// checks against.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: Option<Status>,
    pub priority: Option<u8>,
    pub due_date: Option<String>,
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: Some(task.status),
            priority: Some(task.priority),
            due_date: task.due_date.clone(),
        }
    }

    /// Builds the request body for create/update. Only meaningful after
    /// validation has passed; unset status/priority fall back to the
    /// same values an empty form would show.
    pub fn to_task(&self, id: Option<u64>) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status.unwrap_or(Status::Todo),
            priority: self.priority.unwrap_or(crate::lookup::PRIORITY_DEFAULT),
            due_date: self.due_date.clone().filter(|d| !d.trim().is_empty()),
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Status, Task};

    #[test]
    fn status_serializes_to_wire_strings() {
        let json = serde_json::to_string(&Status::InProgress).expect("serialize status");
        assert_eq!(json, "\"IN_PROGRESS\"");

        let back: Status = serde_json::from_str("\"DONE\"").expect("deserialize status");
        assert_eq!(back, Status::Done);
    }

    #[test]
    fn task_round_trips_camel_case_and_omits_absent_fields() {
        let draft = Task {
            id: None,
            title: "Write release notes".to_string(),
            description: "Cover the new filter flags".to_string(),
            status: Status::Todo,
            priority: 2,
            due_date: Some("2026-09-01".to_string()),
            created_at: None,
            updated_at: None,
        };

        let json = serde_json::to_value(&draft).expect("serialize task");
        assert_eq!(json["dueDate"], "2026-09-01");
        assert!(json.get("id").is_none());
        assert!(json.get("createdAt").is_none());

        let saved: Task = serde_json::from_str(
            r#"{"id":7,"title":"Write release notes","description":"Cover the new filter flags",
                "status":"TODO","priority":2,"dueDate":"2026-09-01",
                "createdAt":"2026-08-20T10:00:00Z"}"#,
        )
        .expect("deserialize task");
        assert_eq!(saved.id, Some(7));
        assert_eq!(saved.created_at.as_deref(), Some("2026-08-20T10:00:00Z"));
        assert!(saved.updated_at.is_none());
    }
}
