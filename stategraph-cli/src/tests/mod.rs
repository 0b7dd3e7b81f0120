//! Unit tests for stategraph-cli, organized by module.
//!
//! Tests are BDD-style with Given/When/Then in doc comments and descriptive names.
//! Each submodule documents the behaviour under test.
