use crate::config::ScanConfig;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use walkdir::DirEntry;
use walkdir::WalkDir;

/// Files found under the input paths, ready to be read.
#[derive(Debug, Default)]
pub(crate) struct ScannedFiles {
    pub files: Vec<PathBuf>,
    pub num_skipped: usize,
    pub walk_errors: Vec<walkdir::Error>,
}

/// Discovers the source files to audit beneath a set of paths.
#[derive(Debug)]
pub(crate) struct FileScanner {
    exclude: Vec<String>,
    extensions: HashSet<String>,
    max_files: Option<usize>,
}
impl FileScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            exclude: config.exclude.clone(),
            extensions: config.extensions.iter()
                .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            max_files: config.max_files,
        }
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        // The roots themselves are always walked.
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.exclude.iter().any(|pattern| match pattern.strip_prefix('*') {
            Some(suffix) => name.ends_with(suffix),
            None => name == pattern.as_str(),
        })
    }

    fn has_wanted_extension(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }

    pub fn scan(&self, roots: &[PathBuf]) -> ScannedFiles {
        log::debug!("Scanning {} input paths...", roots.len());

        let mut scanned = ScannedFiles::default();
        let mut found = BTreeSet::new();
        for root in roots {
            // A single file named explicitly is audited whatever its
            // extension.
            if root.is_file() {
                found.insert(root.clone());
                continue;
            }

            let walker = WalkDir::new(root)
                .follow_links(true)
                .into_iter()
                .filter_entry(|entry| !self.is_excluded(entry));
            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() => {
                        if self.has_wanted_extension(entry.path()) {
                            log::trace!("Found file at {:?}.", entry.path());
                            found.insert(entry.into_path());
                        } else {
                            scanned.num_skipped += 1;
                        }
                    },
                    Ok(_) => (),
                    Err(err) => {
                        log::trace!(
                            "Encountered an error while walking the filesystem \
                            at/under {root:?}: {err}"
                        );
                        scanned.walk_errors.push(err);
                    },
                }
            }
        }

        scanned.files = found.into_iter().collect();
        if let Some(max_files) = self.max_files
            && scanned.files.len() > max_files {
            log::warn!(
                "Found {} files but `max_files` is {max_files}; ignoring the rest.",
                scanned.files.len(),
            );
            scanned.num_skipped += scanned.files.len() - max_files;
            scanned.files.truncate(max_files);
        }

        log::debug!(
            "Found {} files to audit ({} skipped).",
            scanned.files.len(),
            scanned.num_skipped,
        );
        scanned
    }
}

/// The text of every readable file, plus the files that were skipped.
#[derive(Debug, Default)]
pub(crate) struct ReadSources {
    pub sources: Vec<(PathBuf, String)>,
    pub unreadable: Vec<PathBuf>,
}

/// Reads every file in parallel. Files that cannot be read as UTF-8 text are
/// skipped with a warning and listed in [`ReadSources::unreadable`].
pub(crate) fn read_sources(files: &[PathBuf]) -> ReadSources {
    let results: Vec<Result<(PathBuf, String), PathBuf>> = files.par_iter()
        .map(|path| match std::fs::read_to_string(path) {
            Ok(source) => Ok((path.clone(), source)),
            Err(err) => {
                log::warn!("Skipping unreadable file {}: {err}", path.display());
                Err(path.clone())
            },
        })
        .collect();

    let mut read = ReadSources::default();
    for result in results {
        match result {
            Ok(source) => read.sources.push(source),
            Err(path) => read.unreadable.push(path),
        }
    }
    read
}
