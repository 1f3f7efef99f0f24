use crate::models::{AlignedGrades, AssignmentLabel, GradeRecord};

/// Lines grades up with assignment labels in ascending id order.
///
/// Every label gets a slot. A label without a matching grade (or whose grade
/// is null) scores 0 and is flagged in `ungraded`, so callers can still tell
/// it apart from an earned zero. Grades for unknown assignments are dropped.
pub fn align_grades(labels: &[AssignmentLabel], grades: &[GradeRecord]) -> AlignedGrades {
    let mut ordered: Vec<&AssignmentLabel> = labels.iter().collect();
    ordered.sort_by_key(|label| label.id);

    let mut aligned = AlignedGrades {
        titles: Vec::with_capacity(ordered.len()),
        scores: Vec::with_capacity(ordered.len()),
        ungraded: Vec::with_capacity(ordered.len()),
    };

    for label in ordered {
        let score = grades
            .iter()
            .find(|grade| grade.assignment_id == label.id)
            .and_then(|grade| grade.score);

        aligned.titles.push(label.title.clone());
        aligned.scores.push(score.unwrap_or(0.0));
        aligned.ungraded.push(score.is_none());
    }

    aligned
}
