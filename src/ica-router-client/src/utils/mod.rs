//! Shared helpers for packing account fields the way the router does.

pub mod bytes;
