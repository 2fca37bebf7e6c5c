mod constraint_compat_tests;
mod operation_validator_tests;
