//! Configuration persistence

mod json_config;

pub use json_config::{
    parse_config, render_config, resolve_config_path, JsonConfigRepository, CONFIG_PATH_ENV,
    DEFAULT_CONFIG_PATH,
};
