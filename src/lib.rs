//! Library surface for the grange binary and its tests.

pub mod engine;
