//! Integration test crate for ChainID. The tests live in `tests/`.
