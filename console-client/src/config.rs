use serde::{Deserialize, Serialize};
use tictactoe_engine::GameSettings;
use tictactoe_engine::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};

const CONFIG_FILE_NAME: &str = "tictactoe_console_config.yaml";

pub fn get_config_path() -> String {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME).to_string_lossy().into_owned();
    }
    CONFIG_FILE_NAME.to_string()
}

pub fn get_config_manager(
    path: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, ClientConfig, YamlConfigSerializer> {
    match path {
        Some(path) => ConfigManager::from_yaml_file(path),
        None => ConfigManager::from_yaml_file(get_config_path()),
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize, Clone)]
pub struct ClientConfig {
    #[serde(default)]
    pub game: GameSettings,
    #[serde(default)]
    pub use_log_prefix: bool,
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()
    }
}
