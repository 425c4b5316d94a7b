//! Application layer for Batch Import

pub mod service;
