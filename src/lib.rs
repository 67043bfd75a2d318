// src/lib.rs

//! Open Practice Library bot library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
