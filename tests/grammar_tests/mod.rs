pub mod arithmetic_test;
pub mod comment_test;
pub mod indentation_test;
pub mod list_test;
