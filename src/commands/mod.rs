pub mod bootstrap;
pub mod check;
mod common;
pub mod deps;
pub mod validate;
