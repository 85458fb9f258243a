use askboard_common::Student;

/// Student `n` in the shape the roster generator produces.
pub fn student(n: usize) -> Student {
    Student::new(format!("s{n}"), format!("Student {n}"), format!("2024{n:04}"))
}

pub fn roster(count: usize) -> Vec<Student> {
    (1..=count).map(student).collect()
}
