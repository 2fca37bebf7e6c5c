mod config_tests;
mod file_scanner_tests;
