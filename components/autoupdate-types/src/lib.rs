#![deny(warnings)]

pub mod interval;
pub mod job_config;
pub mod schedule;

pub use self::job_config::JobConfig;
