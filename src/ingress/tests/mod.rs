//! Unit tests for inbound routing.
