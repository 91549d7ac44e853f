
/// Transaction handling tests
pub mod transaction_tests;
