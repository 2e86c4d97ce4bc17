//! Integration tests driving the generator against real directory trees

pub mod support;

mod inventory_modes;
mod keyword_numbering;
mod options_file;
mod prune_flow;
mod reference_tree;
