//! Transfer objects for JSON output (CLI `--json` and the HTTP surface).
//!
//! Dependencies are emitted sorted so that the same tree always serialises
//! to the same document.

use crate::app::coordinator::AnalysisChain;
use crate::app::stream::ClassEvent;
use crate::domain::dependency::Dependency;
use crate::domain::error::{AnalysisError, ErrorKind};
use crate::domain::report::{ClassReport, PackageReport, ProjectReport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: ErrorKind,
}

impl From<&AnalysisError> for ErrorResponse {
    fn from(err: &AnalysisError) -> Self {
        Self {
            error: err.to_string(),
            kind: err.kind(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassReportDto {
    pub class_name: String,
    pub dependencies: Vec<Dependency>,
}

impl From<&ClassReport> for ClassReportDto {
    fn from(report: &ClassReport) -> Self {
        Self {
            class_name: report.class_name().to_string(),
            dependencies: report.sorted_dependencies().into_iter().cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReportDto {
    pub package_name: String,
    pub class_reports: Vec<ClassReportDto>,
}

impl From<&PackageReport> for PackageReportDto {
    fn from(report: &PackageReport) -> Self {
        Self {
            package_name: report.package_name().to_string(),
            class_reports: report.class_reports().iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReportDto {
    pub project_name: String,
    pub dependency_count: usize,
    pub package_reports: Vec<PackageReportDto>,
}

impl From<&ProjectReport> for ProjectReportDto {
    fn from(report: &ProjectReport) -> Self {
        Self {
            project_name: report.project_name().to_string(),
            dependency_count: report.dependency_count(),
            package_reports: report.package_reports().iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDto {
    pub class: ClassReportDto,
    pub package: PackageReportDto,
    pub project: ProjectReportDto,
}

impl From<&AnalysisChain> for ChainDto {
    fn from(chain: &AnalysisChain) -> Self {
        Self {
            class: (&chain.class).into(),
            package: (&chain.package).into(),
            project: (&chain.project).into(),
        }
    }
}

/// Payload of a `class` stream event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEventDto {
    pub class_name: String,
    pub imports: Vec<String>,
}

impl From<ClassEvent> for ClassEventDto {
    fn from(event: ClassEvent) -> Self {
        Self {
            class_name: event.class_name,
            imports: event.imports,
        }
    }
}

/// Payload of the terminal `complete` stream event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSummary {
    pub files: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dependency::DependencyKind;

    #[test]
    fn test_class_dto_sorts_dependencies() {
        let mut report = ClassReport::new("p.Foo");
        report.add_dependency(Dependency::new("p.Foo", "q.Z", DependencyKind::Field, "field Z", 5));
        report.add_dependency(Dependency::new("p.Foo", "q.A", DependencyKind::Import, "import q.A;", 2));

        let dto = ClassReportDto::from(&report);
        let targets: Vec<_> = dto.dependencies.iter().map(|d| d.target_type.as_str()).collect();
        assert_eq!(targets, vec!["q.A", "q.Z"]);

        let json = serde_json::to_value(&dto).unwrap();
        assert_eq!(json["dependencies"][0]["kind"], "IMPORT");
        assert_eq!(json["dependencies"][1]["line"], 5);
    }

    #[test]
    fn test_error_response_carries_kind() {
        let body = ErrorResponse::from(&AnalysisError::invalid_path("/nope"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kind"], "invalid_path");
        assert_eq!(json["error"], "Invalid path: /nope");
    }
}
