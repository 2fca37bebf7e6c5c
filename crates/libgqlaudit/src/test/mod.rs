mod golden_tests;
