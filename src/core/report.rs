use std::path::PathBuf;

use serde::Serialize;

use crate::core::file_type::FileType;

/// Result of validating a single input path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    /// The file is valid; warnings (e.g. a missing index) do not fail it
    Passed { warnings: Vec<String> },
    /// The input path does not exist; reported as a warning, not a failure
    Skipped { reason: String },
    /// The file failed validation
    Failed { error: String },
}

/// Per-file validation report.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub file_type: FileType,
    pub extension: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

impl FileReport {
    #[must_use]
    pub fn is_failed(&self) -> bool {
        matches!(self.outcome, FileOutcome::Failed { .. })
    }

    /// Text lines for this report, in print order.
    #[must_use]
    pub fn text_lines(&self) -> Vec<String> {
        let path = self.path.display();
        match &self.outcome {
            FileOutcome::Passed { warnings } => warnings
                .iter()
                .map(|w| format!("Warning: {path} {w}"))
                .chain(std::iter::once(format!(
                    "Input: {path} is valid {}",
                    self.file_type
                )))
                .collect(),
            FileOutcome::Skipped { reason } => vec![
                format!("Warning: {path} {reason}"),
                format!("Input: {path} is valid {}", self.file_type),
            ],
            FileOutcome::Failed { error } => vec![format!("Error: {path} {error}")],
        }
    }
}

/// Reports for a whole run, in input order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationSummary {
    pub reports: Vec<FileReport>,
}

impl ValidationSummary {
    /// False if any file failed. Skipped paths do not count as failures.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.reports.iter().any(FileReport::is_failed)
    }

    #[must_use]
    pub fn count(&self, status: fn(&FileOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| status(&r.outcome)).count()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Passed { .. }))
    }

    #[must_use]
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Failed { .. }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: FileOutcome) -> FileReport {
        FileReport {
            path: PathBuf::from("sample.bam"),
            file_type: FileType::Bam,
            extension: ".bam".to_string(),
            outcome,
        }
    }

    #[test]
    fn test_text_lines_passed_with_warning() {
        let r = report(FileOutcome::Passed {
            warnings: vec!["index missing".to_string()],
        });
        assert_eq!(
            r.text_lines(),
            vec![
                "Warning: sample.bam index missing".to_string(),
                "Input: sample.bam is valid file-bam".to_string(),
            ]
        );
    }

    #[test]
    fn test_text_lines_skipped_still_reports_valid() {
        let r = report(FileOutcome::Skipped {
            reason: "No such file or directory".to_string(),
        });
        assert_eq!(
            r.text_lines(),
            vec![
                "Warning: sample.bam No such file or directory".to_string(),
                "Input: sample.bam is valid file-bam".to_string(),
            ]
        );
    }

    #[test]
    fn test_text_lines_failed() {
        let r = report(FileOutcome::Failed {
            error: "bam check failed.".to_string(),
        });
        assert_eq!(r.text_lines(), vec!["Error: sample.bam bam check failed."]);
    }

    #[test]
    fn test_summary_counts() {
        let summary = ValidationSummary {
            reports: vec![
                report(FileOutcome::Passed { warnings: vec![] }),
                report(FileOutcome::Skipped {
                    reason: "missing".to_string(),
                }),
            ],
        };
        assert!(summary.all_passed());
        assert_eq!(summary.passed(), 1);
        assert_eq!(summary.skipped(), 1);
        assert_eq!(summary.failed(), 0);

        let mut failing = summary.clone();
        failing.reports.push(report(FileOutcome::Failed {
            error: "bad".to_string(),
        }));
        assert!(!failing.all_passed());
        assert_eq!(failing.failed(), 1);
    }

    #[test]
    fn test_json_shape() {
        let r = report(FileOutcome::Failed {
            error: "bad".to_string(),
        });
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "bad");
        assert_eq!(value["file_type"], "file-bam");
    }
}
