//! promptsite: render prompt templates, optionally enrich them through a
//! text generation API, and publish the results to a beta or prod namespace.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    ConfigOverrides, PublishOptions, RenderOptions, load_config, publish, publish_with_config,
    render, render_with_config, select_env, select_env_with_config,
};
pub use domain::{AppConfig, AppError, Environment, FailureKind, RunReport};
