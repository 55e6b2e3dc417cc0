//! Shared helpers for the cache simulator test suite.
