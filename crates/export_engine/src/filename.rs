//! Output filename construction

use capture::QualityTier;
use chrono::NaiveDate;

/// Build the deterministic export filename:
/// `{student}_{TIER}_Report_{YYYY-MM-DD}.pdf`, with spaces in the student
/// name replaced by underscores and the tier uppercased.
pub fn report_file_name(student_name: &str, tier: QualityTier, date: NaiveDate) -> String {
    let student = student_name.trim().replace(' ', "_");
    format!(
        "{}_{}_Report_{}.pdf",
        student,
        tier.label().to_uppercase(),
        date.format("%Y-%m-%d")
    )
}
