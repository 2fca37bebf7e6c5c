use crate::test::golden_tests::utils;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

/// One source file of a suite with the issue codes it expects.
#[derive(Clone, Debug)]
pub struct GoldenSourceFile {
    /// Path relative to the suite directory. Issues are reported against
    /// this path.
    pub relative_path: PathBuf,
    pub source: String,
    pub expected_codes: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct GoldenTestCase {
    pub name: String,
    pub suite_dir: PathBuf,
    pub sources: Vec<GoldenSourceFile>,
    pub old_schema: Option<String>,
    pub new_schema: Option<String>,
}

impl GoldenTestCase {
    /// Discovers every suite directory under `fixtures_dir`, sorted by name.
    pub fn discover_all(fixtures_dir: &Path) -> Vec<Self> {
        let Ok(entries) = fs::read_dir(fixtures_dir) else {
            return Vec::new();
        };

        let mut cases: Vec<Self> = entries
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if !path.is_dir() {
                    return None;
                }
                Self::load(&path)
            })
            .collect();
        cases.sort_by(|a, b| a.name.cmp(&b.name));
        cases
    }

    fn load(suite_dir: &Path) -> Option<Self> {
        let name = suite_dir.file_name()?.to_str()?.to_string();
        let old_schema = fs::read_to_string(suite_dir.join(utils::OLD_SCHEMA_FILE)).ok();
        let new_schema = fs::read_to_string(suite_dir.join(utils::NEW_SCHEMA_FILE)).ok();

        let mut file_paths = vec![];
        collect_files(suite_dir, &mut file_paths);
        file_paths.sort();

        let sources = file_paths.into_iter()
            .filter_map(|path| {
                let relative_path = path.strip_prefix(suite_dir).ok()?.to_path_buf();
                if relative_path == Path::new(utils::OLD_SCHEMA_FILE)
                    || relative_path == Path::new(utils::NEW_SCHEMA_FILE) {
                    return None;
                }
                let source = fs::read_to_string(&path).ok()?;
                let expected_codes = utils::parse_expected_codes(&source);
                Some(GoldenSourceFile {
                    relative_path,
                    source,
                    expected_codes,
                })
            })
            .collect();

        Some(Self {
            name,
            suite_dir: suite_dir.to_path_buf(),
            sources,
            old_schema,
            new_schema,
        })
    }
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out);
        } else {
            out.push(path);
        }
    }
}
