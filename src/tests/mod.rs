//! Route-level tests: the full router, an in-memory student store and an in-memory session store.

pub mod helpers;
