use tracing::{debug, info, warn};

use super::SeedService;
use crate::errors::Result;
use crate::models::SchoolIndex;

pub async fn verify_integrity(service: &SeedService) -> Result<SchoolIndex> {
    let storage = service.get_storage();

    let students = storage.list_students().await?;
    let subjects = storage.list_subjects().await?;
    let grades = storage.list_grades().await?;
    let index = SchoolIndex::build(&students, &subjects, &grades);

    for (group_id, size) in index.group_sizes() {
        info!("Group {} has {} students", group_id, size);
    }
    for teacher in storage.list_teachers().await? {
        debug!(
            "Teacher {} teaches {} subjects",
            teacher.full_name(),
            index.subjects_of_teacher(teacher.id).len()
        );
    }
    for subject in &subjects {
        debug!(
            "Subject '{}' has {} grades",
            subject.name,
            index.grades_of_subject(subject.id).len()
        );
    }
    if !index.ungrouped_students().is_empty() {
        warn!(
            "{} students are not assigned to any group",
            index.ungrouped_students().len()
        );
    }
    if !index.dangling_grades().is_empty() {
        warn!(
            "{} grades reference missing students or subjects",
            index.dangling_grades().len()
        );
    }

    Ok(index)
}
