pub mod pipeline;
pub mod reverser;
