//! Application layer for Bulk Transfer

pub mod service;
