//! Pure data-to-display mapping. Nothing in here knows about the terminal;
//! `tui::ui` and the print mode bind a [`DisplayList`] to actual output.

mod assignments;
mod courses;

pub use assignments::render_assignments;
pub use courses::render_courses;

use std::fmt;

pub const NO_DESCRIPTION: &str = "No description available";

/// One renderable entry in the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayItem {
    /// Stand-in for an empty load.
    Placeholder(String),
    /// Stand-in for a failed load.
    Error(String),
    Course {
        title: String,
        id: String,
        description: String,
        state: String,
    },
    /// Heads the assignments of a course that has some.
    CourseHeader { course_name: String, count: usize },
    /// A course with nothing listed under it.
    EmptyCourse { course_name: String, note: String },
    Assignment {
        title: String,
        id: String,
        course_name: String,
        description: String,
        due: String,
        state: String,
        work_type: String,
    },
    Summary { total: usize, courses: usize },
}

impl DisplayItem {
    /// The one-line heading shown for this item.
    pub fn headline(&self) -> String {
        match self {
            DisplayItem::Placeholder(text) | DisplayItem::Error(text) => text.clone(),
            DisplayItem::Course { title, .. } => title.clone(),
            DisplayItem::CourseHeader { course_name, count } => {
                format!("{course_name} ({count} assignments)")
            }
            DisplayItem::EmptyCourse { course_name, note } => format!("{course_name} — {note}"),
            DisplayItem::Assignment { title, .. } => title.clone(),
            DisplayItem::Summary { total, courses } => {
                format!("Total: {total} assignments across {courses} courses")
            }
        }
    }

    /// Labelled detail rows shown under the headline.
    pub fn details(&self) -> Vec<(&'static str, &str)> {
        match self {
            DisplayItem::Course {
                id,
                description,
                state,
                ..
            } => vec![
                ("Course ID", id.as_str()),
                ("Description", description.as_str()),
                ("State", state.as_str()),
            ],
            DisplayItem::Assignment {
                id,
                course_name,
                description,
                due,
                state,
                work_type,
                ..
            } => vec![
                ("Assignment ID", id.as_str()),
                ("Course", course_name.as_str()),
                ("Description", description.as_str()),
                ("Due Date", due.as_str()),
                ("State", state.as_str()),
                ("Work Type", work_type.as_str()),
            ],
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for DisplayItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indent = if matches!(self, DisplayItem::Assignment { .. }) {
            "  "
        } else {
            ""
        };
        write!(f, "{indent}{}", self.headline())?;
        for (label, value) in self.details() {
            write!(f, "\n{indent}  {label}: {value}")?;
        }
        Ok(())
    }
}

/// The full contents of the container. Built in one go by a renderer and
/// swapped in whole; there is no way to push onto one after the fact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayList {
    items: Vec<DisplayItem>,
}

impl DisplayList {
    pub fn placeholder(text: impl Into<String>) -> Self {
        Self {
            items: vec![DisplayItem::Placeholder(text.into())],
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            items: vec![DisplayItem::Error(text.into())],
        }
    }

    pub fn items(&self) -> &[DisplayItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<DisplayItem>> for DisplayList {
    fn from(items: Vec<DisplayItem>) -> Self {
        Self { items }
    }
}

impl fmt::Display for DisplayList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}

/// `Some` only when the field is present and non-empty.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

fn or_fallback(field: &Option<String>, fallback: &str) -> String {
    present(field).unwrap_or(fallback).to_string()
}
