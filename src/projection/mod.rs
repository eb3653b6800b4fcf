pub mod clean;
pub mod extract;
pub mod projector;
pub mod view;
