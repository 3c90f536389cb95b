pub mod env;
pub mod pipeline;
pub mod publish;
pub mod render;
