pub mod assets;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod fade;
pub mod frame;
pub mod input;
