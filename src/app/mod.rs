/// Application module - Gateway

mod config;

pub use config::{
    get_config_dir, init_config, load_config, save_config, AssistantConfig, Config, ServiceConfig,
};
