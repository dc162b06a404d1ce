pub mod poll;
pub mod retrieve;
pub mod submit;
pub mod usage;
pub mod workflow;
