//! Configuration loading for strongroom.
//!
//! Discovery order: `./strongroom.{toml,json}` (project-local), then
//! `~/.config/strongroom/strongroom.{toml,json}`. Missing or malformed
//! files fall back to compiled defaults; configuration is never fatal.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{clear_config_dir, config_dir, discover_and_load, load_config, set_config_dir},
    schema::{DomainsConfig, EndpointsConfig, PaymentsConfig, StorageConfig, StrongroomConfig},
};
