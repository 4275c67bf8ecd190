// src/lib.rs

//! leakview: browse a catalog of resource-leak defects and view each
//! defect's source file with the offending region highlighted.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
