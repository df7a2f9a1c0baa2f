//! Request middleware for cross-cutting lifecycle concerns.

pub mod request_log;

pub use request_log::RequestLog;
