//! Core types shared by the parser, the resolver, and the pages.

pub mod errors;
pub mod model;
pub mod signal;
