//! Application layer orchestrating domain logic and infrastructure.

pub mod menu;
pub mod pages;
pub mod picker;
pub mod query;
pub mod resolver;
pub mod scan;
pub mod search;
pub mod selection;
pub mod store;
