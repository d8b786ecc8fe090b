//! The canonical sample datasets.
//!
//! Five fully-described students with one exam's worth of grades each,
//! plus an extended batch with deterministically generated scores so that
//! repeated runs seed identical data.

use gradebook_core::model::{Grade, Student};

const SUBJECTS: [&str; 5] = ["语文", "数学", "英语", "物理", "化学"];
const EXAM_TYPE: &str = "期末考试";
const EXAM_DATE: &str = "2024-12-01";

fn student(
  student_id: &str,
  name: &str,
  class_name: &str,
  gender: &str,
  age: u32,
  phone: &str,
  email: Option<&str>,
  address: Option<&str>,
) -> Student {
  Student {
    id:         None,
    student_id: student_id.into(),
    name:       name.into(),
    class_name: class_name.into(),
    gender:     Some(gender.into()),
    age:        Some(age),
    phone:      Some(phone.into()),
    email:      email.map(Into::into),
    address:    address.map(Into::into),
  }
}

fn grade(student_id: &str, subject: &str, score: f64) -> Grade {
  Grade {
    id:         None,
    student_id: student_id.into(),
    subject:    subject.into(),
    score,
    exam_type:  Some(EXAM_TYPE.into()),
    exam_date:  Some(EXAM_DATE.parse().expect("valid seed date")),
  }
}

/// The five canonical students.
pub fn sample_students() -> Vec<Student> {
  vec![
    student(
      "2024001",
      "张三",
      "高一(1)班",
      "male",
      16,
      "13800138001",
      Some("zhangsan@example.com"),
      Some("北京市海淀区中关村大街1号"),
    ),
    student(
      "2024002",
      "李四",
      "高一(1)班",
      "male",
      15,
      "13800138002",
      Some("lisi@example.com"),
      Some("北京市朝阳区望京街2号"),
    ),
    student(
      "2024003",
      "王五",
      "高一(2)班",
      "female",
      16,
      "13800138003",
      Some("wangwu@example.com"),
      Some("北京市西城区金融街3号"),
    ),
    student(
      "2024004",
      "赵六",
      "高一(2)班",
      "male",
      17,
      "13800138004",
      Some("zhaoliu@example.com"),
      Some("北京市东城区王府井4号"),
    ),
    student(
      "2024005",
      "钱七",
      "高一(1)班",
      "female",
      16,
      "13800138005",
      Some("qianqi@example.com"),
      Some("北京市丰台区科技园5号"),
    ),
  ]
}

/// One final exam's grades for the five canonical students.
pub fn sample_grades() -> Vec<Grade> {
  let scores: [(&str, [f64; 5]); 5] = [
    ("2024001", [92.0, 88.0, 95.0, 85.0, 90.0]),
    ("2024002", [78.0, 95.0, 82.0, 91.0, 88.0]),
    ("2024003", [96.0, 72.0, 98.0, 68.0, 75.0]),
    ("2024004", [85.0, 90.0, 88.0, 92.0, 86.0]),
    ("2024005", [94.0, 76.0, 91.0, 79.0, 83.0]),
  ];

  scores
    .iter()
    .flat_map(|(student_id, per_subject)| {
      SUBJECTS
        .iter()
        .zip(per_subject)
        .map(|(subject, &score)| grade(student_id, subject, score))
    })
    .collect()
}

/// The extended batch of students.
pub fn extra_students() -> Vec<Student> {
  let rows: [(&str, &str, &str, &str, u32, &str); 8] = [
    ("2024006", "孙八", "高一(1)班", "male", 16, "13800138006"),
    ("2024007", "周九", "高一(2)班", "female", 15, "13800138007"),
    ("2024008", "吴十", "高一(1)班", "male", 17, "13800138008"),
    ("2024009", "郑十一", "高一(2)班", "female", 16, "13800138009"),
    ("2024010", "冯十二", "高一(1)班", "male", 15, "13800138010"),
    ("2024011", "陈十三", "高一(2)班", "male", 16, "13800138011"),
    ("2024012", "褚十四", "高一(1)班", "female", 17, "13800138012"),
    ("2024013", "卫十五", "高一(2)班", "male", 16, "13800138013"),
  ];

  rows
    .iter()
    .map(|&(student_id, name, class_name, gender, age, phone)| {
      student(student_id, name, class_name, gender, age, phone, None, None)
    })
    .collect()
}

/// Five per-subject grades for one extended-batch student.
///
/// Scores are spread over [60, 100] from the student's position in the
/// batch instead of drawn at random, so seeding is repeatable.
pub fn generated_grades(student_id: &str, index: usize) -> Vec<Grade> {
  SUBJECTS
    .iter()
    .enumerate()
    .map(|(subject_index, subject)| {
      let score = 60 + (index * 7 + subject_index * 11) % 41;
      grade(student_id, subject, score as f64)
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::{extra_students, generated_grades, sample_grades, sample_students};

  #[test]
  fn sample_grades_cover_every_student_and_subject() {
    let students = sample_students();
    let grades = sample_grades();
    assert_eq!(grades.len(), students.len() * 5);
    for grade in &grades {
      assert!(students.iter().any(|s| s.student_id == grade.student_id));
      assert!((0.0..=100.0).contains(&grade.score));
    }
  }

  #[test]
  fn student_numbers_are_unique_across_both_batches() {
    let mut numbers: Vec<String> = sample_students()
      .into_iter()
      .chain(extra_students())
      .map(|s| s.student_id)
      .collect();
    let total = numbers.len();
    numbers.sort();
    numbers.dedup();
    assert_eq!(numbers.len(), total);
  }

  #[test]
  fn generated_grades_are_deterministic_and_in_range() {
    let first = generated_grades("2024006", 0);
    let again = generated_grades("2024006", 0);
    assert_eq!(first, again);
    for grade in generated_grades("2024013", 7) {
      assert!((60.0..=100.0).contains(&grade.score));
    }
  }
}
