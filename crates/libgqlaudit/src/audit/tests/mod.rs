mod extract_files_tests;
