//! Raw message parsing.

pub mod mime;
