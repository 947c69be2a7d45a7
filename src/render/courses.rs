use super::{or_fallback, DisplayItem, DisplayList, NO_DESCRIPTION};
use crate::models::Course;

pub const NO_COURSES: &str = "No courses found";

pub fn render_courses(courses: &[Course]) -> DisplayList {
    if courses.is_empty() {
        return DisplayList::placeholder(NO_COURSES);
    }

    courses
        .iter()
        .map(|course| DisplayItem::Course {
            title: or_fallback(&course.name, "Untitled Course"),
            id: course.id.clone(),
            description: or_fallback(&course.description, NO_DESCRIPTION),
            state: or_fallback(&course.course_state, "Unknown"),
        })
        .collect::<Vec<_>>()
        .into()
}
