//! Unit tests for stview.

mod selection_tests;
