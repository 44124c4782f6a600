use tracing::debug;

use super::ReportService;
use crate::errors::Result;
use crate::models::reports::responses::{ReportParams, SchoolReport};

pub async fn build_report(service: &ReportService, params: ReportParams) -> Result<SchoolReport> {
    let storage = service.get_storage();

    debug!(
        "Building report for subject {}, group {}, teacher {}",
        params.subject_id, params.group_id, params.teacher_id
    );

    let top_students = storage.top_students_by_average().await?;
    let top_student_in_subject = storage.top_student_in_subject(params.subject_id).await?;
    let group_averages_in_subject = storage.group_averages_in_subject(params.subject_id).await?;
    let overall_average = storage.overall_average_grade().await?;
    let teacher_subjects = storage.subjects_taught_by(params.teacher_id).await?;
    let group_students = storage.students_in_group(params.group_id).await?;
    let group_subject_grades = storage
        .group_subject_grades(params.group_id, params.subject_id)
        .await?;

    Ok(SchoolReport {
        params,
        top_students,
        top_student_in_subject,
        group_averages_in_subject,
        overall_average,
        teacher_subjects,
        group_students,
        group_subject_grades,
    })
}
