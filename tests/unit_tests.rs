// Unit tests extracted from implementation files for better readability
// This file acts as the entry point for all unit tests in tests/unit/

mod unit {
    mod config_tests;
    mod placement_tests;
}
