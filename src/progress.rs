//! Step completion tracking and the wizard resume point.

use chrono::Utc;

use crate::model::{Document, StepCompletion};

/// Mark a step completed on the document.
///
/// `last_completed_step` only ever rises: re-saving an earlier step after a
/// later one does not move the resume point backwards.
pub fn mark_completed(document: &mut Document, step: u32) {
    document.step_completion.insert(
        step,
        StepCompletion {
            completed: true,
            updated_at: Utc::now(),
        },
    );
    document.last_completed_step = document.last_completed_step.max(step);
}

/// Where the wizard should reopen a draft: the step after the furthest
/// completed one, clamped to the document's step range. Purely a UI hint,
/// no bearing on validation or submission.
pub fn resume_step(document: &Document, total_steps: u32) -> u32 {
    (document.last_completed_step + 1).clamp(1, total_steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, OwnerRef};

    fn doc() -> Document {
        Document::new(DocumentKind::InvestorProfile, OwnerRef::User("u1".into()))
    }

    #[test]
    fn test_mark_completed_records_step() {
        let mut doc = doc();
        mark_completed(&mut doc, 2);
        assert!(doc.step_completion[&2].completed);
        assert_eq!(doc.last_completed_step, 2);
    }

    #[test]
    fn test_last_completed_is_monotonic() {
        let mut doc = doc();
        for step in [3, 5, 1, 4] {
            mark_completed(&mut doc, step);
        }
        assert_eq!(doc.last_completed_step, 5);
        assert!(doc.step_completion[&1].completed);
    }

    #[test]
    fn test_resume_step_is_next_after_furthest() {
        let mut doc = doc();
        assert_eq!(resume_step(&doc, 7), 1);

        mark_completed(&mut doc, 3);
        assert_eq!(resume_step(&doc, 7), 4);
    }

    #[test]
    fn test_resume_step_clamps_to_total() {
        let mut doc = doc();
        mark_completed(&mut doc, 7);
        assert_eq!(resume_step(&doc, 7), 7);
    }
}
