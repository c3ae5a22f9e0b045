//! Server services.

pub mod uploads;
