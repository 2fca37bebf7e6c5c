use std::path::Path;
use std::path::PathBuf;
use std::sync::OnceLock;

pub const EXPECTED_MARKER: &str = "# EXPECTED:";
pub const OLD_SCHEMA_FILE: &str = "old.graphqls";
pub const NEW_SCHEMA_FILE: &str = "new.graphqls";

pub fn get_fixtures_dir() -> &'static Path {
    static FIXTURES_DIR: OnceLock<PathBuf> = OnceLock::new();
    FIXTURES_DIR.get_or_init(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("src/test/golden_tests/fixtures")
    })
}

/// Issue codes declared by `# EXPECTED: <CODE>` lines, in file order.
pub fn parse_expected_codes(source: &str) -> Vec<String> {
    source.lines()
        .filter_map(|line| line.trim().strip_prefix(EXPECTED_MARKER))
        .map(|code| code.trim().to_string())
        .collect()
}
