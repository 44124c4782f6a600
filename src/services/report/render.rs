//! 报表输出：comfy-table 表格或 JSON

use comfy_table::{Cell, Table as ComfyTable, presets::UTF8_FULL};
use std::str::FromStr;

use crate::errors::{Result, SchoolError};
use crate::models::reports::responses::SchoolReport;

const NO_DATA: &str = "No data found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
}

impl FromStr for ReportFormat {
    type Err = SchoolError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(ReportFormat::Table),
            "json" => Ok(ReportFormat::Json),
            other => Err(SchoolError::validation(format!(
                "Unknown report format '{other}', expected 'table' or 'json'"
            ))),
        }
    }
}

pub fn render_report(report: &SchoolReport, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Table => Ok(render_tables(report)),
    }
}

fn render_tables(report: &SchoolReport) -> String {
    let params = report.params;
    let mut out = String::new();

    section(&mut out, "Top 5 students by average grade", {
        let rows = report
            .top_students
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                vec![
                    (rank + 1).to_string(),
                    entry.student.full_name(),
                    entry.student.email.clone(),
                    format_average(entry.avg_grade),
                ]
            })
            .collect();
        table(&["#", "Student", "Email", "Average"], rows)
    });

    section(
        &mut out,
        &format!("Top student in subject {}", params.subject_id),
        report.top_student_in_subject.as_ref().map(|entry| {
            let mut t = new_table(&["Student", "Email", "Average"]);
            t.add_row(vec![
                Cell::new(entry.student.full_name()),
                Cell::new(&entry.student.email),
                Cell::new(format_average(entry.avg_grade)),
            ]);
            t
        }),
    );

    section(
        &mut out,
        &format!("Group averages in subject {}", params.subject_id),
        {
            let rows = report
                .group_averages_in_subject
                .iter()
                .map(|g| vec![g.group_name.clone(), format_average(g.avg_grade)])
                .collect();
            table(&["Group", "Average"], rows)
        },
    );

    push_section(
        &mut out,
        "Overall average grade",
        &report
            .overall_average
            .map_or_else(|| NO_DATA.to_string(), format_average),
    );

    section(
        &mut out,
        &format!("Subjects taught by teacher {}", params.teacher_id),
        table(
            &["Subject"],
            report
                .teacher_subjects
                .iter()
                .map(|name| vec![name.clone()])
                .collect(),
        ),
    );

    section(&mut out, &format!("Students in group {}", params.group_id), {
        let rows = report
            .group_students
            .iter()
            .map(|s| {
                vec![
                    s.id.to_string(),
                    s.full_name(),
                    s.email.clone(),
                    s.phone.clone().unwrap_or_default(),
                ]
            })
            .collect();
        table(&["ID", "Student", "Email", "Phone"], rows)
    });

    section(
        &mut out,
        &format!(
            "Grades of group {} in subject {}",
            params.group_id, params.subject_id
        ),
        {
            let rows = report
                .group_subject_grades
                .iter()
                .map(|g| {
                    vec![
                        g.first_name.clone(),
                        g.last_name.clone(),
                        format!("{}", g.grade),
                    ]
                })
                .collect();
            table(&["First name", "Last name", "Grade"], rows)
        },
    );

    out
}

fn section(out: &mut String, title: &str, body: Option<ComfyTable>) {
    let body = body.map_or_else(|| NO_DATA.to_string(), |t| t.to_string());
    push_section(out, title, &body);
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(&format!("== {title} ==\n{body}\n\n"));
}

// 空结果返回 None
fn table(header: &[&str], rows: Vec<Vec<String>>) -> Option<ComfyTable> {
    if rows.is_empty() {
        return None;
    }
    let mut t = new_table(header);
    for row in rows {
        t.add_row(row.into_iter().map(Cell::new));
    }
    Some(t)
}

fn new_table(header: &[&str]) -> ComfyTable {
    let mut t = ComfyTable::new();
    t.load_preset(UTF8_FULL);
    t.set_header(header.iter().map(|h| Cell::new(h)));
    t
}

fn format_average(value: f64) -> String {
    format!("{value:.2}")
}
