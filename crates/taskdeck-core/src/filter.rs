use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::lookup::DEFAULT_SORT_BY;
use crate::task::Status;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            other => Err(anyhow::anyhow!(
                "unknown sort direction: {other} (expected asc or desc)"
            )),
        }
    }
}

/// Current filter state of the task list. Every criterion is optional;
/// an unset field places no constraint on that dimension. Rebuilt into
/// query parameters on every list request.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFilters {
    pub status: Option<Status>,
    pub priority: Option<u8>,
    pub due_date_from: Option<String>,
    pub due_date_to: Option<String>,
    pub search: Option<String>,
    pub sort_by: String,
    pub sort_direction: SortDirection,
}

impl Default for TaskFilters {
    fn default() -> Self {
        Self {
            status: None,
            priority: None,
            due_date_from: None,
            due_date_to: None,
            search: None,
            sort_by: DEFAULT_SORT_BY.to_string(),
            sort_direction: SortDirection::Asc,
        }
    }
}

impl TaskFilters {
    /// Encodes the set fields as query parameters under their wire
    /// names. Unset or blank fields produce no parameter; priority is
    /// sent as its decimal string form.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            pairs.push(("priority", priority.to_string()));
        }
        if let Some(from) = non_blank(self.due_date_from.as_deref()) {
            pairs.push(("dueDateFrom", from.to_string()));
        }
        if let Some(to) = non_blank(self.due_date_to.as_deref()) {
            pairs.push(("dueDateTo", to.to_string()));
        }
        if let Some(search) = non_blank(self.search.as_deref()) {
            pairs.push(("search", search.to_string()));
        }
        if !self.sort_by.trim().is_empty() {
            pairs.push(("sortBy", self.sort_by.clone()));
            pairs.push(("sortDirection", self.sort_direction.as_str().to_string()));
        }

        trace!(count = pairs.len(), "encoded filter query parameters");
        pairs
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
