use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ─── Courses ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    #[serde(default)]
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub course_state: Option<String>,
}

/// Body of `GET /home`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoursesResponse {
    pub message: Option<String>,
    pub courses: Option<Vec<Course>>,
}

// ─── Assignments ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    #[serde(default)]
    pub id: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DueDate>,
    pub state: Option<String>,
    pub work_type: Option<String>,
}

/// All assignments the backend returned for one course.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentGroup {
    pub course_id: Option<String>,
    pub course_name: Option<String>,
    pub assignments: Option<Vec<Assignment>>,
    pub message: Option<String>,
    /// Set by the backend when listing this course's coursework failed.
    pub error: Option<String>,
}

impl AssignmentGroup {
    pub fn assignments(&self) -> &[Assignment] {
        self.assignments.as_deref().unwrap_or_default()
    }
}

/// Body of `GET /assignments`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentsResponse {
    pub message: Option<String>,
    pub assignments_by_course: Option<Vec<AssignmentGroup>>,
}

// ─── Due dates ──────────────────────────────────────────────────────────────

/// A due date as the backend may send it: an ISO string, or the classroom
/// API's `{ year, month, day }` object passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DueDate {
    Iso(String),
    Parts {
        #[serde(default)]
        year: i32,
        #[serde(default)]
        month: u32,
        #[serde(default)]
        day: u32,
    },
    Unrecognized(serde_json::Value),
}

impl DueDate {
    /// Calendar date of the deadline. Timestamps with an offset resolve to
    /// their UTC date; timestamps without one keep their own date.
    /// Returns `None` for anything that doesn't name a real date.
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DueDate::Iso(raw) => {
                let raw = raw.trim();
                DateTime::parse_from_rfc3339(raw)
                    .map(|d| d.naive_utc().date())
                    .or_else(|_| {
                        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
                            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
                            .map(|d| d.date())
                    })
                    .or_else(|_| NaiveDate::parse_from_str(raw, "%Y-%m-%d"))
                    .ok()
            }
            DueDate::Parts { year, month, day } => NaiveDate::from_ymd_opt(*year, *month, *day),
            DueDate::Unrecognized(_) => None,
        }
    }
}
