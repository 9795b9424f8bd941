//! Integration tests
//!
//! End-to-end tests through the full router.
