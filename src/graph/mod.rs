pub mod canonical;
pub mod collector;
pub mod error;
pub mod graph_model;
pub mod parse;
pub mod source;
