use anyhow::Context;
use anyhow::Result;
use libgqlaudit::schema::SchemaSnapshot;
use std::hash::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;
use std::path::Path;
use std::path::PathBuf;

const SDL_EXTENSIONS: &[&str] = &["gql", "graphql", "graphqls"];
const CACHE_EXTENSION: &str = "snapshot";

/// Where to find one schema snapshot and what to call it.
#[derive(Clone, Debug)]
pub(crate) struct SnapshotSource {
    pub path: PathBuf,
    pub version: String,
}
impl SnapshotSource {
    /// `version` defaults to the file stem (`schema_v2.json` → `schema_v2`).
    pub fn new(path: PathBuf, version: Option<String>) -> Self {
        let version = version.unwrap_or_else(|| {
            path.file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string())
        });
        Self { path, version }
    }

    fn is_sdl(&self) -> bool {
        self.path.extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
            .is_some_and(|ext| SDL_EXTENSIONS.contains(&ext.as_str()))
    }
}

/// Loads schema snapshots from introspection JSON or SDL files, optionally
/// through an on-disk cache of encoded snapshots keyed by version label and
/// source file location.
#[derive(Clone, Debug, Default)]
pub(crate) struct SnapshotLoader {
    cache_dir: Option<PathBuf>,
}
impl SnapshotLoader {
    pub fn new(cache_dir: Option<PathBuf>) -> Self {
        Self { cache_dir }
    }

    /// Loads both snapshots of a comparison concurrently.
    pub fn load_pair(
        &self,
        old: &SnapshotSource,
        new: &SnapshotSource,
    ) -> Result<(SchemaSnapshot, SchemaSnapshot)> {
        let (old, new) = rayon::join(|| self.load(old), || self.load(new));
        Ok((old?, new?))
    }

    pub fn load(&self, source: &SnapshotSource) -> Result<SchemaSnapshot> {
        if let Some(snapshot) = self.read_cached(source) {
            return Ok(snapshot);
        }

        let text = std::fs::read_to_string(&source.path)
            .with_context(|| format!("Failed to read schema file {}", source.path.display()))?;
        let snapshot = if source.is_sdl() {
            SchemaSnapshot::from_sdl_str(source.version.as_str(), &text)
        } else {
            SchemaSnapshot::from_introspection_str(source.version.as_str(), &text)
        }.with_context(|| format!("Failed to load schema {}", source.path.display()))?;

        log::debug!(
            "Loaded schema `{}` from {}: {} types, {} fields.",
            snapshot.version(),
            source.path.display(),
            snapshot.types().len(),
            snapshot.field_count(),
        );
        self.write_cached(source, &snapshot)?;
        Ok(snapshot)
    }

    /// Two sources share an entry only when both the version label and the
    /// resolved schema file match.
    fn cache_path(&self, source: &SnapshotSource) -> Option<PathBuf> {
        let cache_dir = self.cache_dir.as_ref()?;
        let sanitized: String = source.version.chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') { c } else { '_' })
            .collect();
        let mut hasher = DefaultHasher::new();
        resolved_source_path(&source.path).hash(&mut hasher);
        Some(cache_dir.join(format!("{sanitized}-{:016x}.{CACHE_EXTENSION}", hasher.finish())))
    }

    /// A cache entry is used only when it is newer than the schema file it
    /// was built from.
    fn read_cached(&self, source: &SnapshotSource) -> Option<SchemaSnapshot> {
        let cache_path = self.cache_path(source)?;
        if !is_fresher(&cache_path, &source.path) {
            return None;
        }
        let bytes = std::fs::read(&cache_path).ok()?;
        match SchemaSnapshot::decode(&bytes) {
            Ok(snapshot) if snapshot.version() == source.version => {
                log::debug!("Using cached schema `{}` from {}.", source.version, cache_path.display());
                Some(snapshot)
            },
            Ok(_) => None,
            Err(err) => {
                log::warn!("Ignoring unreadable schema cache {}: {err}", cache_path.display());
                None
            },
        }
    }

    fn write_cached(&self, source: &SnapshotSource, snapshot: &SchemaSnapshot) -> Result<()> {
        let Some(cache_path) = self.cache_path(source) else {
            return Ok(());
        };
        if let Some(dir) = cache_path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
        }
        let bytes = snapshot.encode()?;
        std::fs::write(&cache_path, bytes)
            .with_context(|| format!("Failed to write schema cache {}", cache_path.display()))?;
        log::debug!("Cached schema `{}` at {}.", snapshot.version(), cache_path.display());
        Ok(())
    }
}

/// The absolute path of `path` with its directory canonicalized. The file
/// itself need not exist, so a cached snapshot outlives its source.
fn resolved_source_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    match (absolute.parent(), absolute.file_name()) {
        (Some(dir), Some(name)) => dir.canonicalize()
            .map(|dir| dir.join(name))
            .unwrap_or(absolute),
        _ => absolute,
    }
}

fn is_fresher(cache_path: &Path, source_path: &Path) -> bool {
    let modified = |path: &Path| std::fs::metadata(path).and_then(|meta| meta.modified()).ok();
    match (modified(cache_path), modified(source_path)) {
        (Some(cached_at), Some(source_at)) => cached_at >= source_at,
        (Some(_), None) => true,
        _ => false,
    }
}
