//! Application layer for Registry Queue

pub mod service;
