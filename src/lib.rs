#![doc = include_str!("../README.md")]

pub mod analytics;
pub mod bridge;
