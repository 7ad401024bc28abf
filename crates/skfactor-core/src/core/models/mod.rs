//! Data structures describing a single trajectory snapshot.

pub mod frame;
