use crate::config::AuditToml;
use crate::config::FailOn;
use crate::config::ScanConfig;
use crate::file_scanner::FileScanner;
use crate::file_scanner::read_sources;
use crate::snapshot_loader::SnapshotLoader;
use crate::snapshot_loader::SnapshotSource;
use anyhow::Result;
use libgqlaudit::audit::Auditor;
use libgqlaudit::audit::extract_files;
use libgqlaudit::extract::FileExtraction;
use libgqlaudit::schema::SchemaSnapshot;
use std::path::PathBuf;

/// Source discovery options shared by every command that reads a codebase.
#[derive(Debug, clap::Args)]
pub(crate) struct ScanArgs {
    #[arg(
        help="Additional file or directory names to skip. A leading `*` \
             matches by suffix.",
        long,
        value_delimiter=',',
    )]
    exclude: Vec<String>,

    #[arg(
        help="File extensions to scan within directories. Overrides the \
             config file's `scan.extensions`.",
        long="ext",
        value_delimiter=',',
    )]
    extensions: Vec<String>,

    #[arg(
        help="Least severe finding that makes the run exit with status 1.",
        long,
        value_enum,
    )]
    fail_on: Option<FailOn>,

    #[arg(help="Stop after this many files.", long)]
    max_files: Option<usize>,

    #[arg(
        help="Paths to source files, or directories to search for source \
             files.",
        name="PATHS",
        required=true,
    )]
    paths: Vec<PathBuf>,
}
impl ScanArgs {
    fn scan_config(&self, base: &ScanConfig) -> ScanConfig {
        let mut config = base.clone();
        config.exclude.extend(self.exclude.iter().cloned());
        if !self.extensions.is_empty() {
            config.extensions = self.extensions.clone();
        }
        if self.max_files.is_some() {
            config.max_files = self.max_files;
        }
        config
    }

    pub fn fail_on(&self, config: &AuditToml) -> FailOn {
        self.fail_on.unwrap_or(config.report.fail_on)
    }

    /// Discovers, reads and extracts every source file under the input
    /// paths. Paths that cannot be walked are fatal.
    pub fn extract(&self, config: &AuditToml) -> Result<ScannedExtractions> {
        let scanner = FileScanner::new(&self.scan_config(&config.scan));
        let scanned = scanner.scan(&self.paths);
        if !scanned.walk_errors.is_empty() {
            let errors = scanned.walk_errors.iter()
                .map(|err| format!("  * {err}"))
                .collect::<Vec<_>>()
                .join("\n");
            anyhow::bail!("Failed to scan input paths:\n{errors}");
        }

        let read = read_sources(&scanned.files);
        let extractions = extract_files(&read.sources);
        Ok(ScannedExtractions {
            extractions,
            num_skipped: scanned.num_skipped,
            unreadable: read.unreadable,
        })
    }
}

pub(crate) struct ScannedExtractions {
    pub extractions: Vec<FileExtraction>,

    /// Files left out because of their extension.
    pub num_skipped: usize,

    /// Files with an accepted extension that could not be read as text.
    pub unreadable: Vec<PathBuf>,
}

/// The two schema snapshots of a comparison.
#[derive(Debug, clap::Args)]
pub(crate) struct SnapshotArgs {
    #[arg(
        help="Directory in which loaded snapshots are cached, keyed by \
             version label.",
        long,
    )]
    cache_dir: Option<PathBuf>,

    #[arg(
        help="Schema the code was written against: introspection JSON, or \
             SDL when the extension is .graphql, .graphqls or .gql.",
        long,
    )]
    old: Option<PathBuf>,

    #[arg(help="Version label of the old schema. Defaults to its file stem.", long)]
    old_version: Option<String>,

    #[arg(help="Schema the code is moving to.", long)]
    new: Option<PathBuf>,

    #[arg(help="Version label of the new schema. Defaults to its file stem.", long)]
    new_version: Option<String>,
}
impl SnapshotArgs {
    pub fn load(&self) -> Result<LoadedSnapshots> {
        let loader = SnapshotLoader::new(self.cache_dir.clone());
        let old = self.old.clone()
            .map(|path| SnapshotSource::new(path, self.old_version.clone()));
        let new = self.new.clone()
            .map(|path| SnapshotSource::new(path, self.new_version.clone()));

        Ok(match (old, new) {
            (Some(old), Some(new)) => {
                let (old, new) = loader.load_pair(&old, &new)?;
                LoadedSnapshots { old: Some(old), new: Some(new) }
            },
            (old, new) => LoadedSnapshots {
                old: old.map(|source| loader.load(&source)).transpose()?,
                new: new.map(|source| loader.load(&source)).transpose()?,
            },
        })
    }
}

#[derive(Debug, Default)]
pub(crate) struct LoadedSnapshots {
    pub old: Option<SchemaSnapshot>,
    pub new: Option<SchemaSnapshot>,
}
impl LoadedSnapshots {
    /// Hands whichever snapshots were loaded to the auditor. A missing one
    /// surfaces as the auditor's own fatal error.
    pub fn attach<'a>(&'a self, mut auditor: Auditor<'a>) -> Auditor<'a> {
        if let Some(old) = &self.old {
            auditor = auditor.with_old_snapshot(old);
        }
        if let Some(new) = &self.new {
            auditor = auditor.with_new_snapshot(new);
        }
        auditor
    }
}
