//! Generation error types and diagnostics.

use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Fatal error during project generation.
///
/// Any of these aborts the whole run; no partial project is ever returned,
/// since a malformed project is worse than none.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum GenerateError {
    /// A target references a path outside every known package root.
    #[error("target `{target}` references `{path}` outside every package root")]
    #[diagnostic(
        code(drydock::generate::dangling_reference),
        help("Check the package root paths in the graph snapshot")
    )]
    DanglingReference { target: String, path: PathBuf },

    /// A declared dependency name matches no target in the graph.
    #[error("target `{target}` depends on `{dependency}`, which no package provides")]
    #[diagnostic(
        code(drydock::generate::unresolvable_dependency),
        help("Run `drydock inspect` to list the targets the graph declares")
    )]
    UnresolvableDependency { target: String, dependency: String },

    /// Two targets collide on the name used for cross-linking.
    #[error("two targets named `{name}`")]
    #[diagnostic(
        code(drydock::generate::duplicate_target_name),
        help("Rename one of the targets; target names must be unique across the whole graph")
    )]
    DuplicateTargetName { name: String },
}

impl GenerateError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            GenerateError::DanglingReference { target, path } => {
                Diagnostic::error(format!("dangling reference in target `{}`", target))
                    .with_location(path.clone())
                    .with_context(format!(
                        "`{}` is not under any package root",
                        path.display()
                    ))
                    .with_suggestion(suggestions::DANGLING_REFERENCE)
            }

            GenerateError::UnresolvableDependency { target, dependency } => {
                Diagnostic::error(format!(
                    "unresolvable dependency `{}` of target `{}`",
                    dependency, target
                ))
                .with_context("no target with this name exists anywhere in the graph")
                .with_suggestion(suggestions::UNRESOLVABLE_DEPENDENCY)
            }

            GenerateError::DuplicateTargetName { name } => {
                Diagnostic::error(format!("two targets named `{}`", name))
                    .with_context("target names are the identifier space for dependency links")
                    .with_suggestion(suggestions::DUPLICATE_TARGET)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_carries_suggestion() {
        let err = GenerateError::DuplicateTargetName {
            name: "Utils".to_string(),
        };
        let diag = err.to_diagnostic();
        assert!(diag.format(false).contains("two targets named `Utils`"));
        assert!(!diag.suggestions.is_empty());
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = GenerateError::UnresolvableDependency {
            target: "Bar".to_string(),
            dependency: "Missing".to_string(),
        };
        assert!(err.to_string().contains("Bar"));
        assert!(err.to_string().contains("Missing"));
    }
}
