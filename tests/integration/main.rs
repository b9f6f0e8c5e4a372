mod common;
mod config_test;
mod exit_codes_test;
mod strata_test;
