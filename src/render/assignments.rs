use super::{or_fallback, present, DisplayItem, DisplayList, NO_DESCRIPTION};
use crate::models::{Assignment, AssignmentGroup};

pub const NO_ASSIGNMENTS: &str = "No assignments found";

/// Group-by-course listing. Each course gets a header followed by its
/// assignments (or a single note when it has none), and when anything was
/// listed at all a summary goes in front.
pub fn render_assignments(groups: &[AssignmentGroup]) -> DisplayList {
    if groups.is_empty() {
        return DisplayList::placeholder(NO_ASSIGNMENTS);
    }

    let mut items = Vec::new();
    let mut total = 0usize;

    for group in groups {
        let course_name = present(&group.course_name).unwrap_or("Unknown Course");
        let assignments = group.assignments();

        if assignments.is_empty() {
            let note = match present(&group.error) {
                Some(err) => format!("failed to load assignments: {err}"),
                None => "no assignments".to_string(),
            };
            items.push(DisplayItem::EmptyCourse {
                course_name: course_name.to_string(),
                note,
            });
            continue;
        }

        items.push(DisplayItem::CourseHeader {
            course_name: course_name.to_string(),
            count: assignments.len(),
        });
        items.extend(assignments.iter().map(|a| assignment_item(a, course_name)));
        total += assignments.len();
    }

    if total > 0 {
        items.insert(
            0,
            DisplayItem::Summary {
                total,
                courses: groups.len(),
            },
        );
    }

    items.into()
}

fn assignment_item(assignment: &Assignment, course_name: &str) -> DisplayItem {
    // ISO dates keep the output identical regardless of the host locale.
    let due = assignment
        .due_date
        .as_ref()
        .and_then(|d| d.date())
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "No due date".into());

    DisplayItem::Assignment {
        title: or_fallback(&assignment.title, "Untitled Assignment"),
        id: assignment.id.clone(),
        course_name: course_name.to_string(),
        description: or_fallback(&assignment.description, NO_DESCRIPTION),
        due,
        state: or_fallback(&assignment.state, "Unknown"),
        work_type: or_fallback(&assignment.work_type, "Assignment"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DueDate;

    fn homework(id: &str, title: &str) -> Assignment {
        Assignment {
            id: id.into(),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    fn group(name: Option<&str>, assignments: Option<Vec<Assignment>>) -> AssignmentGroup {
        AssignmentGroup {
            course_name: name.map(Into::into),
            assignments,
            ..Default::default()
        }
    }

    fn count_assignment_items(list: &DisplayList) -> usize {
        list.items()
            .iter()
            .filter(|i| matches!(i, DisplayItem::Assignment { .. }))
            .count()
    }

    #[test]
    fn empty_input_is_a_single_placeholder() {
        let list = render_assignments(&[]);
        assert_eq!(
            list.items(),
            [DisplayItem::Placeholder("No assignments found".into())]
        );
    }

    #[test]
    fn course_without_assignments_gets_only_a_note() {
        let list = render_assignments(&[group(Some("Math"), Some(vec![]))]);
        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].headline(), "Math — no assignments");
    }

    #[test]
    fn single_assignment_gets_header_summary_and_fallbacks() {
        let list = render_assignments(&[group(Some("Math"), Some(vec![homework("a1", "HW1")]))]);

        assert_eq!(
            list.items(),
            [
                DisplayItem::Summary {
                    total: 1,
                    courses: 1
                },
                DisplayItem::CourseHeader {
                    course_name: "Math".into(),
                    count: 1
                },
                DisplayItem::Assignment {
                    title: "HW1".into(),
                    id: "a1".into(),
                    course_name: "Math".into(),
                    description: "No description available".into(),
                    due: "No due date".into(),
                    state: "Unknown".into(),
                    work_type: "Assignment".into(),
                },
            ]
        );
        assert_eq!(list.items()[0].headline(), "Total: 1 assignments across 1 courses");
        assert_eq!(list.items()[1].headline(), "Math (1 assignments)");
    }

    #[test]
    fn summary_counts_every_group_including_empty_ones() {
        let groups = vec![
            group(Some("Math"), Some(vec![homework("a1", "HW1"), homework("a2", "HW2")])),
            group(Some("Art"), Some(vec![])),
            group(Some("History"), Some(vec![homework("h1", "Essay")])),
        ];
        let list = render_assignments(&groups);

        assert_eq!(
            list.items()[0],
            DisplayItem::Summary {
                total: 3,
                courses: 3
            }
        );
        assert_eq!(count_assignment_items(&list), 3);

        let headlines: Vec<String> = list.items().iter().map(|i| i.headline()).collect();
        assert_eq!(
            headlines,
            [
                "Total: 3 assignments across 3 courses",
                "Math (2 assignments)",
                "HW1",
                "HW2",
                "Art — no assignments",
                "History (1 assignments)",
                "Essay",
            ]
        );
    }

    #[test]
    fn missing_assignments_field_is_an_empty_list() {
        let list = render_assignments(&[group(Some("Math"), None)]);
        assert_eq!(list.items().len(), 1);
        assert!(matches!(list.items()[0], DisplayItem::EmptyCourse { .. }));
    }

    #[test]
    fn missing_course_name_falls_back() {
        let list = render_assignments(&[
            group(None, Some(vec![homework("x", "Quiz")])),
            group(Some(""), None),
        ]);
        assert_eq!(list.items()[1].headline(), "Unknown Course (1 assignments)");
        let DisplayItem::Assignment { course_name, .. } = &list.items()[2] else {
            panic!("expected an assignment item");
        };
        assert_eq!(course_name, "Unknown Course");
        assert_eq!(list.items()[3].headline(), "Unknown Course — no assignments");
    }

    #[test]
    fn backend_error_replaces_the_empty_note() {
        let mut failed = group(Some("Physics"), Some(vec![]));
        failed.error = Some("Failed to fetch assignments: forbidden".into());
        let list = render_assignments(&[failed]);
        assert_eq!(
            list.items()[0].headline(),
            "Physics — failed to load assignments: Failed to fetch assignments: forbidden"
        );
    }

    #[test]
    fn due_dates_render_as_iso_dates() {
        let mut a = homework("a1", "HW1");
        a.due_date = Some(DueDate::Iso("2025-01-09T17:00:00Z".into()));
        let mut b = homework("a2", "HW2");
        b.due_date = Some(DueDate::Parts {
            year: 2025,
            month: 12,
            day: 1,
        });
        let mut c = homework("a3", "HW3");
        c.due_date = Some(DueDate::Iso("whenever".into()));

        let list = render_assignments(&[group(Some("Math"), Some(vec![a, b, c]))]);
        let dues: Vec<&str> = list
            .items()
            .iter()
            .filter_map(|i| match i {
                DisplayItem::Assignment { due, .. } => Some(due.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(dues, ["2025-01-09", "2025-12-01", "No due date"]);
    }

    #[test]
    fn present_fields_are_shown_verbatim() {
        let a = Assignment {
            id: "a9".into(),
            title: Some("Lab report".into()),
            description: Some("Write it up".into()),
            due_date: None,
            state: Some("PUBLISHED".into()),
            work_type: Some("SHORT_ANSWER_QUESTION".into()),
        };
        let list = render_assignments(&[group(Some("Chem"), Some(vec![a]))]);
        let DisplayItem::Assignment {
            description,
            state,
            work_type,
            ..
        } = &list.items()[2]
        else {
            panic!("expected an assignment item");
        };
        assert_eq!(description, "Write it up");
        assert_eq!(state, "PUBLISHED");
        assert_eq!(work_type, "SHORT_ANSWER_QUESTION");
    }

    #[test]
    fn rendering_twice_is_identical() {
        let groups = vec![
            group(Some("Math"), Some(vec![homework("a1", "HW1")])),
            group(Some("Art"), None),
        ];
        let first = render_assignments(&groups);
        let second = render_assignments(&groups);
        assert_eq!(first, second);
        assert_eq!(second.items()[0].headline(), "Total: 1 assignments across 2 courses");
    }
}
