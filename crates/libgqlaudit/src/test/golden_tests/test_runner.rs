use crate::audit::AuditConfig;
use crate::audit::Auditor;
use crate::audit::extract_files;
use crate::schema::SchemaSnapshot;
use crate::test::golden_tests::golden_test_case::GoldenTestCase;
use rayon::prelude::IntoParallelRefIterator;
use rayon::prelude::ParallelIterator;
use std::path::PathBuf;

#[derive(Debug)]
pub struct GoldenTestResult {
    pub test_name: String,
    pub passed: bool,
    pub error_message: Option<String>,
    pub file_path: PathBuf,
}

#[derive(Debug, Default)]
pub struct GoldenTestResults {
    pub results: Vec<GoldenTestResult>,
}

impl GoldenTestResults {
    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn failure_report(&self) -> String {
        let failures: Vec<_> = self.results.iter().filter(|r| !r.passed).collect();
        let failures_text = failures.iter()
            .map(|r| {
                let message = r.error_message.as_deref().unwrap_or("error");
                format!("❌ {}\n   File: {}\n   {message}", r.test_name, r.file_path.display())
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "{} of {} golden tests failed:\n\n{failures_text}",
            failures.len(),
            self.results.len(),
        )
    }

    pub fn summary(&self) -> String {
        let total = self.results.len();
        let failed = self.results.iter().filter(|r| !r.passed).count();
        let emoji = if failed == 0 { "✅" } else { "❌" };
        format!(
            "{emoji} GOLDEN TEST SUMMARY\nTotal tests: {total}\nPassed: {}\nFailed: {failed}",
            total - failed,
        )
    }
}

/// Runs every discovered suite, one suite per rayon worker.
pub fn run_golden_tests(fixtures_dir: &std::path::Path) -> GoldenTestResults {
    let test_cases = GoldenTestCase::discover_all(fixtures_dir);

    let results = test_cases
        .par_iter()
        .flat_map_iter(run_test_case)
        .collect();

    GoldenTestResults { results }
}

fn run_test_case(test_case: &GoldenTestCase) -> Vec<GoldenTestResult> {
    let suite_failure = |message: String| vec![GoldenTestResult {
        test_name: test_case.name.clone(),
        passed: false,
        error_message: Some(message),
        file_path: test_case.suite_dir.clone(),
    }];

    let snapshots = match (&test_case.old_schema, &test_case.new_schema) {
        (Some(old), Some(new)) => {
            let old = SchemaSnapshot::from_sdl_str("old", old);
            let new = SchemaSnapshot::from_sdl_str("new", new);
            match (old, new) {
                (Ok(old), Ok(new)) => Some((old, new)),
                (Err(err), _) | (_, Err(err)) =>
                    return suite_failure(format!("Failed to load schema: {err}")),
            }
        },
        _ => None,
    };

    let sources: Vec<_> = test_case.sources.iter()
        .map(|file| (file.relative_path.clone(), file.source.as_str()))
        .collect();
    let extractions = extract_files(&sources);

    let config = AuditConfig::default().with_schema_evolution(snapshots.is_some());
    let mut auditor = Auditor::new(config);
    if let Some((old, new)) = &snapshots {
        auditor = auditor.with_snapshots(old, new);
    }
    let report = match auditor.run(&extractions) {
        Ok(report) => report,
        Err(err) => return suite_failure(format!("Audit failed: {err}")),
    };

    test_case.sources.iter()
        .map(|file| {
            let actual: Vec<&str> = report.issues().iter()
                .filter(|issue| issue.location.file == file.relative_path)
                .map(|issue| issue.code.as_str())
                .collect();
            let passed = actual == file.expected_codes;
            let error_message = (!passed).then(|| format!(
                "Expected: {:?}\nGot: {actual:?}",
                file.expected_codes,
            ));
            GoldenTestResult {
                test_name: format!("{}/{}", test_case.name, file.relative_path.display()),
                passed,
                error_message,
                file_path: test_case.suite_dir.join(&file.relative_path),
            }
        })
        .collect()
}
