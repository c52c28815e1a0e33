//! HTTP middleware stack.

pub mod trace;
