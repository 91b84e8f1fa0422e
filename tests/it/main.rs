//! Single test binary entry point.
//!
//! This consolidates all tests into a single binary following matklad's best practices,
//! reducing linking overhead.
//!
//! Structure:
//! - helpers: Scene builder and recording nodes shared by the tests
//! - integration: Multi-component workflow tests (view + nodes + surfaces)
//! - unit: Single-component unit tests

mod helpers;
mod unit;
