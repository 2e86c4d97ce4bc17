//! Source composition for the options layers.

pub mod service;
