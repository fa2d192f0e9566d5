pub mod driver;
pub mod global_variables;
pub mod scan;
