//! Platform path helpers.

pub mod xdg_root;
