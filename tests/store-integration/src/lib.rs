//! Integration-test support for the palmtrade stores.
//!
//! The [`harness`] module provides a scripted-scenario wrapper around a
//! [`palmtrade_store::Market`] so the `tests/` files read as flows rather
//! than struct-literal noise.
