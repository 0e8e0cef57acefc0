//! Business logic: query execution and response reshaping

pub mod reshape;
pub mod search;
