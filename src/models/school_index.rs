//! 基于外键的内存索引
//!
//! 实体之间不互相持有引用，反向关系（班组的学生、教师的科目、学生/科目的成绩）
//! 通过这里的 ID 映射表查询。

use std::collections::{HashMap, HashSet};

use crate::models::grades::entities::Grade;
use crate::models::students::entities::Student;
use crate::models::subjects::entities::Subject;

#[derive(Debug, Default, Clone)]
pub struct SchoolIndex {
    students_by_group: HashMap<i64, Vec<i64>>,
    subjects_by_teacher: HashMap<i64, Vec<i64>>,
    grades_by_student: HashMap<i64, Vec<i64>>,
    grades_by_subject: HashMap<i64, Vec<i64>>,
    ungrouped_students: Vec<i64>,
    dangling_grades: Vec<i64>,
}

impl SchoolIndex {
    /// 从已加载的行构建索引，ID 列表保持输入顺序
    pub fn build(students: &[Student], subjects: &[Subject], grades: &[Grade]) -> Self {
        let mut index = Self::default();

        for student in students {
            match student.group_id {
                Some(group_id) => index
                    .students_by_group
                    .entry(group_id)
                    .or_default()
                    .push(student.id),
                None => index.ungrouped_students.push(student.id),
            }
        }

        for subject in subjects {
            if let Some(teacher_id) = subject.teacher_id {
                index
                    .subjects_by_teacher
                    .entry(teacher_id)
                    .or_default()
                    .push(subject.id);
            }
        }

        let student_ids: HashSet<i64> = students.iter().map(|s| s.id).collect();
        let subject_ids: HashSet<i64> = subjects.iter().map(|s| s.id).collect();

        for grade in grades {
            if !student_ids.contains(&grade.student_id) || !subject_ids.contains(&grade.subject_id)
            {
                index.dangling_grades.push(grade.id);
                continue;
            }
            index
                .grades_by_student
                .entry(grade.student_id)
                .or_default()
                .push(grade.id);
            index
                .grades_by_subject
                .entry(grade.subject_id)
                .or_default()
                .push(grade.id);
        }

        index
    }

    pub fn students_in_group(&self, group_id: i64) -> &[i64] {
        self.students_by_group
            .get(&group_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn subjects_of_teacher(&self, teacher_id: i64) -> &[i64] {
        self.subjects_by_teacher
            .get(&teacher_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn grades_of_student(&self, student_id: i64) -> &[i64] {
        self.grades_by_student
            .get(&student_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn grades_of_subject(&self, subject_id: i64) -> &[i64] {
        self.grades_by_subject
            .get(&subject_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 没有班组的学生
    pub fn ungrouped_students(&self) -> &[i64] {
        &self.ungrouped_students
    }

    /// 学生或科目不存在的成绩 ID
    pub fn dangling_grades(&self) -> &[i64] {
        &self.dangling_grades
    }

    /// 每个班组的学生人数，按班组 ID 排序
    pub fn group_sizes(&self) -> Vec<(i64, usize)> {
        let mut sizes: Vec<(i64, usize)> = self
            .students_by_group
            .iter()
            .map(|(group_id, ids)| (*group_id, ids.len()))
            .collect();
        sizes.sort_unstable();
        sizes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn student(id: i64, group_id: Option<i64>) -> Student {
        Student {
            id,
            first_name: format!("First{id}"),
            last_name: format!("Last{id}"),
            email: format!("student{id}@example.edu"),
            phone: None,
            group_id,
        }
    }

    fn subject(id: i64, teacher_id: Option<i64>) -> Subject {
        Subject {
            id,
            name: format!("Subject {id}"),
            teacher_id,
        }
    }

    fn grade(id: i64, student_id: i64, subject_id: i64) -> Grade {
        Grade {
            id,
            student_id,
            subject_id,
            grade: 80.0,
            date_received: Utc::now(),
        }
    }

    #[test]
    fn test_reverse_lookups() {
        let students = vec![student(1, Some(10)), student(2, Some(10)), student(3, None)];
        let subjects = vec![subject(5, Some(7)), subject(6, Some(7)), subject(8, None)];
        let grades = vec![grade(100, 1, 5), grade(101, 1, 6), grade(102, 2, 5)];

        let index = SchoolIndex::build(&students, &subjects, &grades);

        assert_eq!(index.students_in_group(10), &[1, 2]);
        assert!(index.students_in_group(11).is_empty());
        assert_eq!(index.ungrouped_students(), &[3]);
        assert_eq!(index.subjects_of_teacher(7), &[5, 6]);
        assert_eq!(index.grades_of_student(1), &[100, 101]);
        assert_eq!(index.grades_of_subject(5), &[100, 102]);
        assert!(index.grades_of_subject(8).is_empty());
        assert_eq!(index.group_sizes(), vec![(10, 2)]);
        assert!(index.dangling_grades().is_empty());
    }

    #[test]
    fn test_dangling_grades_are_reported() {
        let students = vec![student(1, Some(10))];
        let subjects = vec![subject(5, None)];
        let grades = vec![grade(100, 1, 5), grade(101, 2, 5), grade(102, 1, 9)];

        let index = SchoolIndex::build(&students, &subjects, &grades);

        assert_eq!(index.dangling_grades(), &[101, 102]);
        assert_eq!(index.grades_of_student(1), &[100]);
    }
}
