mod nesting_depth_tests;
