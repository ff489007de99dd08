//! Unit tests for the pipeline module.

mod fixtures;
mod notifier_tests;
