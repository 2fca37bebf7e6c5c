//! File-based golden tests that run the whole audit pipeline over fixture
//! suites.
//!
//! Every directory under `fixtures/` is one suite. Source files in a suite
//! declare the issue codes they expect, in report order, with
//! `# EXPECTED: <CODE>` comment lines. A file without such lines expects no
//! issues. A suite that contains both `old.graphqls` and `new.graphqls` also
//! runs schema-evolution checks against those two snapshots.

mod golden_test_case;
mod test_runner;
mod utils;

#[cfg(test)]
mod tests {
    use crate::test::golden_tests::test_runner;
    use crate::test::golden_tests::utils;

    #[test]
    fn verify_golden_fixtures() {
        let results = test_runner::run_golden_tests(utils::get_fixtures_dir());

        if !results.all_passed() {
            eprintln!("{}", results.failure_report());
        }
        println!("{}", results.summary());

        assert!(!results.results.is_empty(), "No golden fixture suites were found");
        assert!(
            results.all_passed(),
            "Golden fixture tests failed:\n{}",
            results.failure_report(),
        );
    }
}
