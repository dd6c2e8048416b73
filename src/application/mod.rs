//! Application layer orchestrating queries against a transaction source.
//!
//! This module defines the `TransactionQueryEngine`, which pairs the
//! `TransactionSource` port with the pure functions in `domain::queries`.

pub mod engine;
