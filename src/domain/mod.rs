//! Domain layer: the transaction record, the immutable snapshot it lives in,
//! the pure query functions over it, and the port through which records are
//! obtained.

pub mod ports;
pub mod queries;
pub mod snapshot;
pub mod transaction;
