pub mod container;
pub mod errors;
