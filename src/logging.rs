use std::fs::File;

use simplelog::{ConfigBuilder, WriteLogger};

use crate::config::Config;

/// Route `log` records to a file. The terminal is in raw mode while the app
/// runs, so nothing may go to stderr.
pub fn init(config: &Config) -> Result<String, String> {
    let path = config
        .log_file()
        .ok_or_else(|| "no log directory available".to_string())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("cannot create {}: {}", parent.display(), e))?;
    }
    let file =
        File::create(&path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;

    let log_config = ConfigBuilder::new()
        .set_target_level(log::LevelFilter::Error)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    WriteLogger::init(config.log_level(), log_config, file).map_err(|e| e.to_string())?;

    Ok(path.display().to_string())
}
