//! Whole-tree conversion.
//!
//! The source tree is walked folder by folder. Markdown files are copied
//! verbatim everywhere. A folder with one map gets its topics from the
//! [`MapAssembler`] and ignores everything else; a folder without maps has
//! its topics converted standalone and rejects any other file. A second map
//! in the same folder aborts the run.

use super::map::MapAssembler;
use super::topic::{convert_topic_to_file, copy_markdown};
use crate::build_options::{BuildOptions, OutputStrategy};
use crate::detect::{detect_file_kind, FileKind};
use crate::error::{Error, Result};
use std::fs;
use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outputs produced by a site build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Standalone topics converted in map-less folders
    pub converted: Vec<PathBuf>,
    /// Files produced from map references
    pub assembled: Vec<PathBuf>,
    /// Markdown files copied verbatim
    pub copied: Vec<PathBuf>,
    /// Maps that drove their folder
    pub maps: Vec<PathBuf>,
}

impl BuildReport {
    /// Returns the total number of files written.
    pub fn output_count(&self) -> usize {
        self.converted.len() + self.assembled.len() + self.copied.len()
    }

    /// Iterates over every written file.
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.converted
            .iter()
            .chain(self.assembled.iter())
            .chain(self.copied.iter())
    }

    /// Rewrites output paths under `from` to live under `to`.
    fn rebase(mut self, from: &Path, to: &Path) -> Self {
        for path in self
            .converted
            .iter_mut()
            .chain(self.assembled.iter_mut())
            .chain(self.copied.iter_mut())
        {
            if let Ok(relative) = path.strip_prefix(from) {
                *path = to.join(relative);
            }
        }
        self
    }
}

/// Converts a source tree into an output tree.
#[derive(Debug, Clone, Copy)]
pub struct SiteBuilder<'a> {
    options: &'a BuildOptions,
}

impl<'a> SiteBuilder<'a> {
    /// Creates a builder for the given options.
    pub fn new(options: &'a BuildOptions) -> Self {
        Self { options }
    }

    /// Runs the build.
    ///
    /// Stops at the first error. With [`OutputStrategy::WipeInPlace`] files
    /// written before the error stay in the output root; with
    /// [`OutputStrategy::AtomicSwap`] the previous output is left untouched.
    pub fn build(&self) -> Result<BuildReport> {
        let options = absolute_roots(self.options)?;
        validate_roots(&options)?;

        info!("Source: {}", options.source_root.display());
        info!("Docs:   {}", options.output_root.display());

        match options.output_strategy {
            OutputStrategy::WipeInPlace => {
                clean_output_root(&options.output_root)?;
                convert_tree(&options, &[options.output_root.clone()])
            }
            OutputStrategy::AtomicSwap => build_atomic(&options),
        }
    }
}

/// Converts `options.source_root` into `options.output_root`.
pub fn build_site(options: &BuildOptions) -> Result<BuildReport> {
    SiteBuilder::new(options).build()
}

fn absolute_roots(options: &BuildOptions) -> Result<BuildOptions> {
    let mut resolved = options.clone();
    resolved.source_root = normalize_path(&std::path::absolute(&options.source_root)?);
    resolved.output_root = normalize_path(&std::path::absolute(&options.output_root)?);
    Ok(resolved)
}

/// Removes `.` and `..` components without touching the filesystem.
///
/// `std::path::absolute` keeps `..` on Unix, so `docs/../..` would
/// otherwise compare as a child of the source root.
fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

fn validate_roots(options: &BuildOptions) -> Result<()> {
    if !options.source_root.is_dir() {
        return Err(Error::Config(format!(
            "source directory {} does not exist",
            options.source_root.display()
        )));
    }
    if options.source_root.starts_with(&options.output_root) {
        return Err(Error::Config(format!(
            "output directory {} would remove the source directory {}",
            options.output_root.display(),
            options.source_root.display()
        )));
    }
    Ok(())
}

/// Removes everything inside the output root, keeping the root itself.
fn clean_output_root(output_root: &Path) -> Result<()> {
    if output_root.exists() {
        warn!("Removing existing content of {}", output_root.display());
        for entry in fs::read_dir(output_root)? {
            let path = entry?.path();
            let removed = if path.is_dir() {
                fs::remove_dir_all(&path)
            } else {
                fs::remove_file(&path)
            };
            removed.map_err(|e| Error::from(e).in_file(&path))?;
        }
    } else {
        fs::create_dir_all(output_root).map_err(|e| Error::from(e).in_file(output_root))?;
    }
    Ok(())
}

fn build_atomic(options: &BuildOptions) -> Result<BuildReport> {
    let staging = options.staging_root();
    if staging.exists() {
        debug!("Removing stale staging directory {}", staging.display());
        fs::remove_dir_all(&staging).map_err(|e| Error::from(e).in_file(&staging))?;
    }
    fs::create_dir_all(&staging).map_err(|e| Error::from(e).in_file(&staging))?;

    let staged = options.redirected(&staging);
    let skipped = [options.output_root.clone(), staging.clone()];
    let report = match convert_tree(&staged, &skipped) {
        Ok(report) => report,
        Err(e) => {
            if let Err(cleanup) = fs::remove_dir_all(&staging) {
                warn!("Could not remove {}: {}", staging.display(), cleanup);
            }
            return Err(e);
        }
    };

    if options.output_root.exists() {
        warn!("Replacing {}", options.output_root.display());
        fs::remove_dir_all(&options.output_root)
            .map_err(|e| Error::from(e).in_file(&options.output_root))?;
    }
    fs::rename(&staging, &options.output_root)
        .map_err(|e| Error::from(e).in_file(&options.output_root))?;

    Ok(report.rebase(&staging, &options.output_root))
}

/// Walks the source tree top-down and converts each folder, never
/// descending into `skipped`.
fn convert_tree(options: &BuildOptions, skipped: &[PathBuf]) -> Result<BuildReport> {
    let mut report = BuildReport::default();

    let folders = WalkDir::new(&options.source_root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !skipped.iter().any(|s| e.path() == s));

    for entry in folders {
        let entry = entry?;
        if entry.file_type().is_dir() {
            convert_folder(entry.path(), options, &mut report)?;
        }
    }

    info!("Wrote {} file(s)", report.output_count());
    Ok(report)
}

/// Applies the map-driven or folder-driven strategy to one folder.
fn convert_folder(dir: &Path, options: &BuildOptions, report: &mut BuildReport) -> Result<()> {
    let files = list_files(dir)?;
    let maps: Vec<&PathBuf> = files
        .iter()
        .filter(|f| detect_file_kind(f) == FileKind::Map)
        .collect();

    let map = match maps.as_slice() {
        [] => None,
        [map] => Some(*map),
        _ => return Err(Error::MultipleMaps(dir.to_path_buf())),
    };

    let output_dir = options.output_dir_for(dir).ok_or_else(|| {
        Error::Config(format!("{} is outside the source root", dir.display()))
    })?;

    let mut written = HashSet::new();

    // Markdown is copied in every folder; topics next to a map are only
    // reachable through the map.
    for file in &files {
        let Some(name) = file.file_name() else {
            continue;
        };
        let destination = output_dir.join(name);
        let relative = file.strip_prefix(&options.source_root).unwrap_or(file);

        match (detect_file_kind(file), map) {
            (FileKind::Markdown, _) => {
                claim_output(&mut written, &destination, file)?;
                copy_markdown(file, &destination)?;
                info!("[MD] Copied {}", relative.display());
                report.copied.push(destination);
            }
            (FileKind::Topic, None) => {
                let destination = destination.with_extension("md");
                claim_output(&mut written, &destination, file)?;
                convert_topic_to_file(file, &destination, &options.render)?;
                info!("[DITA] Converted {}", relative.display());
                report.converted.push(destination);
            }
            (FileKind::Unsupported, None) => {
                return Err(Error::UnsupportedFileType(file.clone()));
            }
            (kind, Some(_)) if kind != FileKind::Map => {
                debug!("Skipping {} ({}) in map-driven folder", relative.display(), kind);
            }
            _ => {}
        }
    }

    if let Some(map) = map {
        debug!("{} is map-driven by {}", dir.display(), map.display());
        let assembled = MapAssembler::new(options).assemble(map)?;
        for output in &assembled {
            claim_output(&mut written, output, map)?;
        }
        report.maps.push(map.to_path_buf());
        report.assembled.extend(assembled);
    }

    Ok(())
}

/// Records `destination` as written by `source`; two sources of one folder
/// may not produce the same output file.
fn claim_output(written: &mut HashSet<PathBuf>, destination: &Path, source: &Path) -> Result<()> {
    if written.insert(destination.to_path_buf()) {
        Ok(())
    } else {
        Err(Error::OutputCollision {
            output: destination.to_path_buf(),
            origin: source.to_path_buf(),
        })
    }
}

/// Regular files directly inside `dir`, sorted by name.
fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.path().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
