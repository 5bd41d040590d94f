// Artifact export helpers
//
// The core hands back raw UTF-8 text; the caller picks where it lands.
// These helpers supply the conventional filename and MIME type per
// artifact kind and write bytes exactly, so an exported file re-reads
// byte-identical to the state it came from.

use std::fs;
use std::io;
use std::path::Path;

use crate::reflection::types::{Language, TaskSpec};

/// Caller-facing export metadata for one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSpec {
    pub file_name: String,
    pub mime: &'static str,
}

/// Default export name for a run's refined artifact.
pub fn artifact_export(spec: &TaskSpec) -> ExportSpec {
    match spec {
        TaskSpec::Code { language, .. } => ExportSpec {
            file_name: format!("refined_code.{}", language.file_extension()),
            mime: "text/plain",
        },
        TaskSpec::Content { .. } => ExportSpec {
            file_name: "refined_content.md".to_string(),
            mime: "text/markdown",
        },
    }
}

/// Export name for the code path's production-hardened artifact.
pub fn finalized_export(language: Language) -> ExportSpec {
    ExportSpec {
        file_name: format!("production_code.{}", language.file_extension()),
        mime: "text/plain",
    }
}

/// Export name for generated test cases.
pub fn tests_export(language: Language) -> ExportSpec {
    ExportSpec {
        file_name: format!("generated_tests.{}", language.file_extension()),
        mime: "text/plain",
    }
}

/// Write artifact text to `path` exactly as held in state.
pub fn write_artifact(path: &Path, text: &str) -> io::Result<()> {
    fs::write(path, text)
}
