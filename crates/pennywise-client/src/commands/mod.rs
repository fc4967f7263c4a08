pub mod budget;
pub mod common;
pub mod report;
pub mod transaction;
pub mod user;
