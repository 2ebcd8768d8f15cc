//! Unit tests

mod fake;
