//! The incremental build engine.
//!
//! Per bucket file the pipeline is strictly sequential: deserialize →
//! flatten → delta → translate → merge → serialize → lock update. Jobs run
//! per (file, target locale) and fan out over rayon, grouped by target path:
//! jobs that write the same file (shared-file formats hold every locale in
//! one document) run back to back on one thread, so each merge sees the
//! previous locale's write. Every job returns its lock update as data and
//! the read-modify-write of the lockfile happens once, serially, at the end.
//!
//! Failure is per file and idempotent: when any locale of a file fails, none
//! of that file's checksums are committed, so the next run recomputes exactly
//! the same outstanding keys. There is no retry machinery and no partial
//! commit.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use rayon::prelude::*;

use crate::buckets::flatten::{apply_flat, flatten_value};
use crate::buckets::{BucketFormat, BucketParser};
use crate::delta::{Delta, Lockfile, calculate_delta, checksums_for};

pub mod pattern;
pub mod translator;

pub use pattern::{BucketPattern, LOCALE_PLACEHOLDER};
pub use translator::{PseudoTranslator, TranslateRequest, Translator};

/// Everything one run needs, threaded explicitly; the engine keeps no global
/// state.
pub struct EngineParams<'a> {
    pub root: PathBuf,
    pub pattern: BucketPattern,
    pub format: BucketFormat,
    pub source_locale: String,
    pub target_locales: Vec<String>,
    /// Optional cap on how many keys go to the translator per call, purely to
    /// bound request size. `None` sends each file's outstanding map whole.
    pub batch_cap: Option<usize>,
    pub translator: &'a dyn Translator,
    /// Compute deltas only: nothing is translated, written, or locked.
    pub dry_run: bool,
}

/// Outcome of one successfully processed (file, target locale) job.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub source_path: String,
    pub target_path: String,
    pub target_locale: String,
    /// Keys sent to the translator (added + updated).
    pub translated: usize,
    /// Keys whose translation was carried over by a rename.
    pub renamed: usize,
    /// Target keys dropped because their source key is gone.
    pub removed: usize,
}

impl FileReport {
    pub fn up_to_date(&self) -> bool {
        self.translated == 0 && self.renamed == 0 && self.removed == 0
    }
}

/// A job that was aborted; its lock entry is untouched so the next run
/// retries exactly the same keys.
#[derive(Debug, Clone)]
pub struct FileFailure {
    pub source_path: String,
    pub target_locale: String,
    pub error: String,
}

#[derive(Debug, Default)]
pub struct RunResult {
    pub reports: Vec<FileReport>,
    pub failures: Vec<FileFailure>,
}

impl RunResult {
    /// Total keys needing (re)translation across all reports.
    pub fn pending(&self) -> usize {
        self.reports.iter().map(|r| r.translated).sum()
    }

    pub fn up_to_date(&self) -> bool {
        self.failures.is_empty() && self.reports.iter().all(FileReport::up_to_date)
    }
}

struct JobOutcome {
    /// Lock sub-map key of the job's file, when the path delocalizes. Used
    /// to withhold the file's checksums if any sibling locale failed.
    file_key: Option<String>,
    report: Result<FileReport, FileFailure>,
    lock_update: Option<(String, IndexMap<String, String>)>,
}

/// Runs the pipeline over every matched bucket file and target locale.
pub fn run(params: &EngineParams) -> Result<RunResult> {
    validate(params)?;

    let files = matched_files(params)?;
    if files.is_empty() {
        bail!(
            "No files matched pattern '{}' for source locale '{}'",
            params.pattern.raw(),
            params.source_locale
        );
    }

    let lock = Lockfile::load(&params.root);

    // Jobs sharing a target file must not interleave their read-merge-write,
    // so they are grouped by target path; groups fan out in parallel, jobs
    // within a group run in order.
    let mut groups: IndexMap<String, Vec<(&String, &String)>> = IndexMap::new();
    for file in &files {
        for locale in &params.target_locales {
            groups
                .entry(target_rel_for(params, file, locale))
                .or_default()
                .push((file, locale));
        }
    }
    let groups: Vec<Vec<(&String, &String)>> = groups.into_values().collect();

    let outcomes: Vec<JobOutcome> = groups
        .par_iter()
        .flat_map_iter(|group| {
            group
                .iter()
                .map(|&(file, locale)| process_file(params, &lock, file, locale))
        })
        .collect();

    // Single-writer section: fold the per-job lock updates and write once. A
    // file's checksums are committed only when no locale of that file failed;
    // otherwise the failed locale's keys would read as translated and never
    // be retried.
    let mut lock = lock;
    let mut result = RunResult::default();
    let mut updates: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    let mut failed_files: HashSet<String> = HashSet::new();
    for outcome in outcomes {
        match outcome.report {
            Ok(report) => result.reports.push(report),
            Err(failure) => {
                if let Some(file_key) = outcome.file_key {
                    failed_files.insert(file_key);
                }
                result.failures.push(failure);
            }
        }
        if let Some((file_key, checksums)) = outcome.lock_update {
            updates.insert(file_key, checksums);
        }
    }
    let mut dirty = false;
    for (file_key, checksums) in updates {
        if failed_files.contains(&file_key) {
            continue;
        }
        lock.record(file_key, checksums);
        dirty = true;
    }
    if dirty && !params.dry_run {
        lock.save(&params.root)?;
    }

    Ok(result)
}

fn validate(params: &EngineParams) -> Result<()> {
    let shared_file = matches!(
        params.format,
        BucketFormat::JsonRoot(_) | BucketFormat::YamlRoot(_) | BucketFormat::Plurals(_)
    );
    if !params.pattern.has_placeholder() && !shared_file {
        bail!(
            "Pattern '{}' must contain the {} placeholder for the '{}' format",
            params.pattern.raw(),
            LOCALE_PLACEHOLDER,
            params.format
        );
    }
    if params.target_locales.is_empty() {
        bail!("At least one target locale is required");
    }
    if params.target_locales.contains(&params.source_locale) {
        bail!(
            "Source locale '{}' cannot also be a target locale",
            params.source_locale
        );
    }
    Ok(())
}

/// Source files matched by the localized pattern, as root-relative paths.
fn matched_files(params: &EngineParams) -> Result<Vec<String>> {
    let localized = params.pattern.localize(&params.source_locale);
    let absolute = params.root.join(&localized);
    let glob_pattern = absolute.to_string_lossy().to_string();

    let mut files = Vec::new();
    for entry in glob::glob(&glob_pattern)
        .with_context(|| format!("Invalid glob pattern: {glob_pattern}"))?
    {
        let path = entry.context("Failed to read a matched path")?;
        if path.is_file() {
            files.push(relative_path(&params.root, &path));
        }
    }
    files.sort();
    Ok(files)
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

/// The path a job will write to, used to group jobs that share a target.
/// A path that fails to delocalize groups by itself; its job fails anyway.
fn target_rel_for(params: &EngineParams, source_rel: &str, target_locale: &str) -> String {
    match params.pattern.delocalize(source_rel) {
        Some(delocalized) => delocalized.replace(LOCALE_PLACEHOLDER, target_locale),
        None => source_rel.to_string(),
    }
}

fn process_file(
    params: &EngineParams,
    lock: &Lockfile,
    source_rel: &str,
    target_locale: &str,
) -> JobOutcome {
    let file_key = params
        .pattern
        .delocalize(source_rel)
        .map(|delocalized| Lockfile::file_key(&delocalized));
    match process_file_inner(params, lock, source_rel, target_locale) {
        Ok((report, lock_update)) => JobOutcome {
            file_key,
            report: Ok(report),
            lock_update,
        },
        Err(err) => JobOutcome {
            file_key,
            report: Err(FileFailure {
                source_path: source_rel.to_string(),
                target_locale: target_locale.to_string(),
                error: format!("{err:#}"),
            }),
            lock_update: None,
        },
    }
}

fn process_file_inner(
    params: &EngineParams,
    lock: &Lockfile,
    source_rel: &str,
    target_locale: &str,
) -> Result<(FileReport, Option<(String, IndexMap<String, String>)>)> {
    let format = &params.format;
    let delocalized = params.pattern.delocalize(source_rel).with_context(|| {
        format!(
            "Path '{}' does not match pattern '{}'",
            source_rel,
            params.pattern.raw()
        )
    })?;
    let file_key = Lockfile::file_key(&delocalized);
    let target_rel = delocalized.replace(LOCALE_PLACEHOLDER, target_locale);

    let source_raw = fs::read_to_string(params.root.join(source_rel))
        .with_context(|| format!("Failed to read {source_rel}"))?;
    let source_value = format
        .deserialize(&params.source_locale, &source_raw)
        .with_context(|| format!("{source_rel}: failed to parse as {format}"))?;
    let source_flat = flatten_value(&source_value);

    let target_path = params.root.join(&target_rel);
    let existing_raw = match fs::read_to_string(&target_path) {
        Ok(raw) => Some(raw),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {target_rel}"));
        }
    };
    let target_flat = match &existing_raw {
        Some(raw) => flatten_value(
            &format
                .deserialize_target(target_locale, raw, &source_value)
                .with_context(|| format!("{target_rel}: failed to parse as {format}"))?,
        ),
        None => IndexMap::new(),
    };

    let delta = calculate_delta(&source_flat, &target_flat, &lock.checksums_for_file(&file_key));

    let report = FileReport {
        source_path: source_rel.to_string(),
        target_path: target_rel.clone(),
        target_locale: target_locale.to_string(),
        translated: delta.keys_to_translate().count(),
        renamed: delta.renamed.len(),
        removed: delta.removed.len(),
    };

    if params.dry_run {
        return Ok((report, None));
    }
    if report.up_to_date() && existing_raw.is_some() {
        return Ok((report, None));
    }

    let outstanding: IndexMap<String, String> = delta
        .keys_to_translate()
        .map(|key| (key.to_string(), source_flat[key].clone()))
        .collect();
    let request = TranslateRequest {
        source_locale: &params.source_locale,
        target_locale,
    };
    let translated = translate_batched(params, &outstanding, &request)
        .with_context(|| format!("{source_rel}: translation to '{target_locale}' failed"))?;

    let final_flat = merge_translations(&source_flat, &target_flat, &delta, &translated);
    let target_value = apply_flat(&source_value, &final_flat);
    let rendered = format
        .serialize(target_locale, &target_value, existing_raw.as_deref())
        .with_context(|| format!("{target_rel}: failed to render as {format}"))?;

    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(&target_path, rendered)
        .with_context(|| format!("Failed to write {target_rel}"))?;

    Ok((report, Some((file_key, checksums_for(&source_flat)))))
}

fn translate_batched(
    params: &EngineParams,
    outstanding: &IndexMap<String, String>,
    request: &TranslateRequest,
) -> Result<IndexMap<String, String>> {
    if outstanding.is_empty() {
        return Ok(IndexMap::new());
    }
    let cap = match params.batch_cap {
        Some(cap) if cap > 0 && cap < outstanding.len() => cap,
        _ => return params.translator.translate_map(outstanding, request),
    };

    let mut translated = IndexMap::new();
    let entries: Vec<(&String, &String)> = outstanding.iter().collect();
    for batch in entries.chunks(cap) {
        let batch_map: IndexMap<String, String> = batch
            .iter()
            .map(|(k, v)| ((*k).clone(), (*v).clone()))
            .collect();
        translated.extend(params.translator.translate_map(&batch_map, request)?);
    }
    Ok(translated)
}

/// Builds the final target map: every source key resolves, in order, to its
/// fresh translation, a value carried over by rename, or the existing target
/// value. Removed keys vanish because only source keys are emitted.
fn merge_translations(
    source: &IndexMap<String, String>,
    target: &IndexMap<String, String>,
    delta: &Delta,
    translated: &IndexMap<String, String>,
) -> IndexMap<String, String> {
    let renamed_from: HashMap<&str, &str> = delta
        .renamed
        .iter()
        .map(|(old, new)| (new.as_str(), old.as_str()))
        .collect();

    source
        .iter()
        .map(|(key, source_text)| {
            let value = translated
                .get(key)
                .or_else(|| {
                    renamed_from
                        .get(key.as_str())
                        .and_then(|old| target.get(*old))
                })
                .or_else(|| target.get(key))
                .unwrap_or(source_text);
            (key.clone(), value.clone())
        })
        .collect()
}
