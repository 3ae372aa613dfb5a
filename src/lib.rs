#![allow(clippy::doc_markdown)]

pub mod analysis;
pub mod catalog;
pub mod comparison;
pub mod plan;
pub mod prelude;
pub mod quantity;
