//! Roster generation.

use askboard_common::Student;

pub const DEFAULT_ROSTER_SIZE: usize = 20;
pub const DEFAULT_ENROLLMENT_PREFIX: &str = "2024";

/// `count` students: ids `s1..`, names `Student 1..`, enrollment numbers
/// `<prefix>0001..` (index zero-padded to four digits).
pub fn generate_students(count: usize, enrollment_prefix: &str) -> Vec<Student> {
    (1..=count)
        .map(|i| Student::new(format!("s{i}"), format!("Student {i}"), format!("{enrollment_prefix}{i:04}")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_enrollment_numbers() {
        let roster = generate_students(20, DEFAULT_ENROLLMENT_PREFIX);
        assert_eq!(roster.len(), 20);
        assert_eq!(roster[0].student_id, "20240001");
        assert_eq!(roster[19].student_id, "20240020");
        assert_eq!(roster[0].id, "s1");
        assert_eq!(roster[0].name, "Student 1");
    }

    #[test]
    fn test_enrollment_numbers_are_unique() {
        let roster = generate_students(150, "2025");
        let ids: HashSet<_> = roster.iter().map(|s| s.student_id.as_str()).collect();
        assert_eq!(ids.len(), 150);
    }

    #[test]
    fn test_zero_students() {
        assert!(generate_students(0, "2024").is_empty());
    }
}
