// Main integration test file that includes all test modules

mod integration {
    pub mod scanner_tests;
    pub mod script_tests;
    pub mod search_tests;
    pub mod validate_tests;
}

mod helpers {
    pub mod test_utils;
}
