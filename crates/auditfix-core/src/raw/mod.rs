pub mod node;
pub mod read;
