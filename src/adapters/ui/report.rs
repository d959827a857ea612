//! Report rendering for the aggregated hierarchy and for raw worklogs.
//!
//! Text for humans, JSON and semicolon-delimited CSV for scripts.

use crate::domain::{ProjectRecord, WorklogEntry};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// `3600` -> `1h 00m`, `59` -> `0h 00m`.
pub fn format_duration(seconds: u64) -> String {
    format!("{}h {:02}m", seconds / 3600, (seconds % 3600) / 60)
}

/// Indented project -> task tree with the day total at the bottom.
pub fn render_text(date: NaiveDate, projects: &[ProjectRecord]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Work log for {}", date.format("%Y-%m-%d"));

    if projects.is_empty() {
        out.push_str("\nNo worklogs found.\n");
        return out;
    }

    let mut total = 0;
    for project in projects {
        let day = project.day_seconds();
        total += day;
        let _ = writeln!(out, "\n{} ({})  {}", project.name, project.id, format_duration(day));
        for task in &project.tasks {
            let _ = write!(
                out,
                "  {:<12} {}  {}",
                task.issue_key,
                format_duration(task.day_seconds),
                task.summary
            );
            if let Some(tracked) = task.tracked_seconds {
                let _ = write!(out, "  [issue total {}]", format_duration(tracked));
            }
            out.push('\n');
        }
    }

    let _ = writeln!(out, "\nTotal: {}", format_duration(total));
    out
}

/// Plain listing of unreconciled worklogs.
pub fn render_worklogs_text(date: NaiveDate, entries: &[WorklogEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Worklogs for {}", date.format("%Y-%m-%d"));
    for entry in entries {
        let _ = writeln!(
            out,
            "  {:<12} {}",
            entry.issue_key,
            format_duration(entry.seconds)
        );
    }
    let total: u64 = entries.iter().map(|e| e.seconds).sum();
    let _ = writeln!(out, "Total: {} in {} worklog(s)", format_duration(total), entries.len());
    out
}

/// Pretty JSON of any serializable result.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

/// One row per task: `Project;ProjectId;Issue;Summary;DaySeconds;AllSeconds`.
pub fn projects_to_csv(projects: &[ProjectRecord]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["Project", "ProjectId", "Issue", "Summary", "DaySeconds", "AllSeconds"])?;
    for project in projects {
        for task in &project.tasks {
            let day = task.day_seconds.to_string();
            let all = task.all_seconds.to_string();
            wtr.write_record([
                project.name.as_str(),
                project.id.as_str(),
                task.issue_key.as_str(),
                task.summary.as_str(),
                day.as_str(),
                all.as_str(),
            ])?;
        }
    }
    into_string(wtr)
}

/// One row per worklog: `Issue;IssueId;Seconds;StartDate`.
pub fn worklogs_to_csv(entries: &[WorklogEntry]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(["Issue", "IssueId", "Seconds", "StartDate"])?;
    for entry in entries {
        let start = entry
            .start_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        let seconds = entry.seconds.to_string();
        wtr.write_record([
            entry.issue_key.as_str(),
            entry.issue_id.as_str(),
            seconds.as_str(),
            start.as_str(),
        ])?;
    }
    into_string(wtr)
}

fn into_string(mut wtr: csv::Writer<Vec<u8>>) -> Result<String, csv::Error> {
    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;
    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{IssueMetadata, TaskRecord};

    fn projects() -> Vec<ProjectRecord> {
        let meta = IssueMetadata {
            id: "10001".into(),
            key: "KEY-1".into(),
            summary: "Fix; \"login\"".into(),
            tracked_seconds: Some(7200),
            project_name: "Core".into(),
            project_id: "1".into(),
        };
        vec![ProjectRecord::new(TaskRecord::new("10001", &meta, 5400))]
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0h 00m");
        assert_eq!(format_duration(5400), "1h 30m");
        assert_eq!(format_duration(36_059), "10h 00m");
    }

    #[test]
    fn test_render_text_tree() {
        let text = render_text(day(), &projects());
        assert!(text.starts_with("Work log for 2024-01-15"));
        assert!(text.contains("Core (1)  1h 30m"));
        assert!(text.contains("KEY-1"));
        assert!(text.contains("[issue total 2h 00m]"));
        assert!(text.trim_end().ends_with("Total: 1h 30m"));
    }

    #[test]
    fn test_render_text_empty() {
        assert!(render_text(day(), &[]).contains("No worklogs found."));
    }

    #[test]
    fn test_projects_to_csv_escapes() {
        let csv = projects_to_csv(&projects()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("Project;ProjectId;Issue;Summary;DaySeconds;AllSeconds")
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("Core;1;KEY-1;"));
        assert!(row.contains("\"Fix; \"\"login\"\"\""));
        assert!(row.ends_with(";5400;5400"));
    }

    #[test]
    fn test_worklogs_to_csv() {
        let entries = vec![WorklogEntry {
            worklog_id: None,
            issue_key: "KEY-1".into(),
            issue_id: "10001".into(),
            seconds: 900,
            start_date: Some(day()),
        }];
        let csv = worklogs_to_csv(&entries).unwrap();
        assert!(csv.contains("KEY-1;10001;900;2024-01-15"));
        assert!(render_worklogs_text(day(), &entries).contains("Total: 0h 15m in 1 worklog(s)"));
    }

    #[test]
    fn test_render_json_hierarchy() {
        let json = render_json(&projects()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["id"], "1");
        assert_eq!(value[0]["tasks"][0]["day_seconds"], 5400);
    }
}
