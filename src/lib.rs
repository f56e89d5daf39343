pub mod apis;
pub mod date_range;
pub mod prompt;
pub mod tools;
