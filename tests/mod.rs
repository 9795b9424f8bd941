//! Test suite for Quillfeed
//!
//! This module organizes all tests. Everything runs against the in-memory
//! store, so no database is needed.

pub mod integration;
