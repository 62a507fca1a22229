//! File and path utilities

use crate::{CliError, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Utilities for working with files and paths
pub struct FileUtils;

impl FileUtils {
    /// Find all files under `dir` whose path relative to `dir` matches the
    /// include patterns (all files when empty) and none of the exclude patterns.
    pub fn find_files(
        dir: &Path,
        include_patterns: &[String],
        exclude_patterns: &[String],
    ) -> Result<Vec<PathBuf>> {
        let include_set = Self::build_glob_set(include_patterns)?;
        let exclude_set = Self::build_glob_set(exclude_patterns)?;

        let mut files = Vec::new();

        for entry in WalkDir::new(dir).follow_links(false).sort_by_file_name() {
            let entry = entry.map_err(|e| CliError::Io(e.into()))?;
            let path = entry.path();

            if !entry.file_type().is_file() {
                continue;
            }

            let relative_path = path
                .strip_prefix(dir)
                .map_err(|_| CliError::InvalidInput("Invalid path structure".to_string()))?;

            if !include_patterns.is_empty() && !include_set.is_match(relative_path) {
                continue;
            }

            if !exclude_patterns.is_empty() && exclude_set.is_match(relative_path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        Ok(files)
    }

    /// Expand the command-line paths into the list of scripts to check.
    /// Files named explicitly are always kept; directories are walked for
    /// `extensions`.
    pub fn collect_sources(
        paths: &[PathBuf],
        extensions: &[String],
        exclude_patterns: &[String],
    ) -> Result<Vec<PathBuf>> {
        let include: Vec<String> = extensions.iter().map(|ext| format!("**/*.{ext}")).collect();

        let mut sources = Vec::new();
        for path in paths {
            if path.is_dir() {
                sources.extend(Self::find_files(path, &include, exclude_patterns)?);
            } else if path.is_file() {
                if !Self::has_extension(path, extensions) {
                    tracing::warn!("checking {} despite its extension", path.display());
                }
                sources.push(path.clone());
            } else {
                return Err(CliError::InvalidInput(format!(
                    "No such file or directory: {}",
                    path.display()
                )));
            }
        }
        Ok(sources)
    }

    /// Check if a file has one of `extensions`
    pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
    }

    fn build_glob_set(patterns: &[String]) -> Result<GlobSet> {
        let mut builder = GlobSetBuilder::new();

        for pattern in patterns {
            let glob = Glob::new(pattern).map_err(|e| {
                CliError::InvalidInput(format!("Invalid glob pattern '{}': {}", pattern, e))
            })?;
            builder.add(glob);
        }

        builder
            .build()
            .map_err(|e| CliError::InvalidInput(format!("Failed to build glob set: {}", e)))
    }
}
