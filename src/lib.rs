//! Rebuilds a directory tree from a transcript of `cd`/`ls` commands and
//! answers size queries over it.

#![allow(clippy::enum_variant_names)]

pub mod application;
pub mod cli;
mod ext;
pub mod filesystem;
pub mod input;
pub mod report;
pub mod transcript;
