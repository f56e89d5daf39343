pub mod execute_queries;
pub mod usage;
