//! Adapters implementing the `TransactionSource` port.

pub mod file;
pub mod in_memory;
