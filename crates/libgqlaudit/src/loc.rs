use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

const SCHEMA_FILE_PREFIX: &str = "schema://";

/// A 1-based line/column position within a file.
///
/// Columns count characters, not bytes. Locations produced for aggregate
/// schema comparisons (see [`SourceLocation::for_schema`]) use line `0` and
/// column `0`.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub line: usize,
    pub col: usize,
}
impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, line: usize, col: usize) -> Self {
        Self {
            file: file.into(),
            line,
            col,
        }
    }

    /// A location that refers to a schema version as a whole rather than to
    /// any position in a source file.
    pub fn for_schema(version: &str) -> Self {
        Self {
            file: PathBuf::from(format!("{SCHEMA_FILE_PREFIX}{version}")),
            line: 0,
            col: 0,
        }
    }

    pub fn is_schema_level(&self) -> bool {
        self.line == 0
            && self.file.to_string_lossy().starts_with(SCHEMA_FILE_PREFIX)
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_schema_level() {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}:{}", self.file.display(), self.line, self.col)
        }
    }
}

/// Maps byte offsets within a single source text to [`SourceLocation`]s.
#[derive(Clone, Debug)]
pub struct LineIndex<'src> {
    file: PathBuf,
    line_starts: Vec<usize>,
    source: &'src str,
}
impl<'src> LineIndex<'src> {
    pub fn new(file: &Path, source: &'src str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            memchr::memchr_iter(b'\n', source.as_bytes()).map(|nl| nl + 1)
        );
        Self {
            file: file.to_path_buf(),
            line_starts,
            source,
        }
    }

    pub fn file(&self) -> &Path {
        self.file.as_path()
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Returns the 1-based (line, column) of `offset`. Offsets past the end
    /// of the source clamp to the end.
    pub fn line_col(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.source.len());
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let line_start = self.line_starts[line_idx];
        let col = match self.source.get(line_start..offset) {
            Some(prefix) => prefix.chars().count(),
            // Offset falls inside a multi-byte char; count bytes instead.
            None => offset - line_start,
        };
        (line_idx + 1, col + 1)
    }

    pub fn location(&self, offset: usize) -> SourceLocation {
        let (line, col) = self.line_col(offset);
        SourceLocation {
            file: self.file.clone(),
            line,
            col,
        }
    }
}
