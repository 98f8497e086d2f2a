use std::path::PathBuf;

use log::LevelFilter;
use serde::Deserialize;

const DEFAULT_CONFIG: &str = include_str!("../config.toml");

#[derive(Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    editor: EditorConfig,
    #[serde(default)]
    logging: LoggingConfig,
    #[serde(default)]
    output: OutputConfig,
}

#[derive(Deserialize, Default)]
struct EditorConfig {
    title: Option<String>,
    no_params_message: Option<String>,
    invalid_model_message: Option<String>,
    emit_label: Option<String>,
}

#[derive(Deserialize, Default)]
struct LoggingConfig {
    level: Option<String>,
    file: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct OutputConfig {
    pretty: Option<bool>,
    print_on_exit: Option<bool>,
}

/// Text shown by the editor pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTexts {
    pub title: String,
    pub no_params: String,
    pub invalid_model: String,
    pub emit_label: String,
}

impl Default for EditorTexts {
    fn default() -> Self {
        Self {
            title: "Parameter editor".to_string(),
            no_params: "No parameters available".to_string(),
            invalid_model: "Invalid model".to_string(),
            emit_label: "Print model to console".to_string(),
        }
    }
}

pub struct Config {
    file: ConfigFile,
}

impl Config {
    pub fn load() -> Self {
        let user = user_config_path()
            .filter(|path| path.exists())
            .and_then(|path| std::fs::read_to_string(path).ok());
        Self::from_sources(DEFAULT_CONFIG, user.as_deref())
    }

    /// Parse the base config and overlay whatever fields the user file sets
    fn from_sources(base: &str, user: Option<&str>) -> Self {
        let mut file: ConfigFile = toml::from_str(base).unwrap_or_default();
        if let Some(user) = user.and_then(|s| toml::from_str::<ConfigFile>(s).ok()) {
            merge(&mut file, user);
        }
        Config { file }
    }

    pub fn editor_texts(&self) -> EditorTexts {
        let fallback = EditorTexts::default();
        let editor = &self.file.editor;
        EditorTexts {
            title: editor.title.clone().unwrap_or(fallback.title),
            no_params: editor.no_params_message.clone().unwrap_or(fallback.no_params),
            invalid_model: editor
                .invalid_model_message
                .clone()
                .unwrap_or(fallback.invalid_model),
            emit_label: editor.emit_label.clone().unwrap_or(fallback.emit_label),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.file
            .logging
            .level
            .as_deref()
            .and_then(|level| level.parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info)
    }

    pub fn log_file(&self) -> Option<PathBuf> {
        self.file
            .logging
            .file
            .clone()
            .or_else(|| dirs::cache_dir().map(|d| d.join("paramedit").join("paramedit.log")))
    }

    pub fn pretty_output(&self) -> bool {
        self.file.output.pretty.unwrap_or(false)
    }

    pub fn print_on_exit(&self) -> bool {
        self.file.output.print_on_exit.unwrap_or(true)
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paramedit").join("config.toml"))
}

fn merge(base: &mut ConfigFile, user: ConfigFile) {
    if user.editor.title.is_some() {
        base.editor.title = user.editor.title;
    }
    if user.editor.no_params_message.is_some() {
        base.editor.no_params_message = user.editor.no_params_message;
    }
    if user.editor.invalid_model_message.is_some() {
        base.editor.invalid_model_message = user.editor.invalid_model_message;
    }
    if user.editor.emit_label.is_some() {
        base.editor.emit_label = user.editor.emit_label;
    }
    if user.logging.level.is_some() {
        base.logging.level = user.logging.level;
    }
    if user.logging.file.is_some() {
        base.logging.file = user.logging.file;
    }
    if user.output.pretty.is_some() {
        base.output.pretty = user.output.pretty;
    }
    if user.output.print_on_exit.is_some() {
        base.output.print_on_exit = user.output.print_on_exit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_embedded_config() {
        let config = Config::from_sources(DEFAULT_CONFIG, None);
        assert_eq!(config.editor_texts(), EditorTexts::default());
        assert_eq!(config.log_level(), LevelFilter::Info);
        assert!(!config.pretty_output());
        assert!(config.print_on_exit());
    }

    #[test]
    fn test_user_overrides_only_set_fields() {
        let user = r#"
            [editor]
            title = "Редактор параметров"

            [output]
            pretty = true
        "#;
        let config = Config::from_sources(DEFAULT_CONFIG, Some(user));
        let texts = config.editor_texts();
        assert_eq!(texts.title, "Редактор параметров");
        assert_eq!(texts.invalid_model, "Invalid model");
        assert!(config.pretty_output());
        assert!(config.print_on_exit());
    }

    #[test]
    fn test_broken_user_file_ignored() {
        let config = Config::from_sources(DEFAULT_CONFIG, Some("[editor\ntitle ="));
        assert_eq!(config.editor_texts().title, "Parameter editor");
    }

    #[test]
    fn test_explicit_log_file() {
        let config = Config::from_sources(DEFAULT_CONFIG, Some("[logging]\nfile = \"/tmp/p.log\""));
        assert_eq!(config.log_file(), Some(PathBuf::from("/tmp/p.log")));
    }

    #[test]
    fn test_log_levels() {
        let level = |value: &str| {
            let user = format!("[logging]\nlevel = \"{}\"", value);
            Config::from_sources(DEFAULT_CONFIG, Some(&user)).log_level()
        };
        assert_eq!(level("warn"), LevelFilter::Warn);
        assert_eq!(level("DEBUG"), LevelFilter::Debug);
        assert_eq!(level("off"), LevelFilter::Off);
        assert_eq!(level("loud"), LevelFilter::Info);
    }
}
