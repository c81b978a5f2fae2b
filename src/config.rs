use std::path::PathBuf;
use std::str::FromStr;

use crate::models::language::Language;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;
const TRANSLATIONS_PATH: &str = "data/translations.json";
const SESSION_IDLE_MINUTES: u32 = 60;
const MAX_SESSIONS: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub translations_path: PathBuf,
    /// JSON catalog to serve instead of the built-in one
    pub catalog_path: Option<PathBuf>,
    pub default_language: Language,
    pub session_idle_minutes: u32,
    pub max_sessions: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: HOST.to_string(),
            port: PORT,
            translations_path: PathBuf::from(TRANSLATIONS_PATH),
            catalog_path: None,
            default_language: Language::default(),
            session_idle_minutes: SESSION_IDLE_MINUTES,
            max_sessions: MAX_SESSIONS,
        }
    }
}

/// Positive integer from the environment, or `default` with a warning.
fn positive_var<T>(name: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + std::fmt::Display + Copy,
{
    match std::env::var(name) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(value) if value > T::default() => value,
            _ => {
                log::warn!("Invalid {} {:?}, using {}", name, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

impl AppConfig {
    /// Read settings from the environment, keeping the default for anything
    /// missing or unparseable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                log::warn!("Invalid PORT {:?}, using {}", raw, defaults.port);
                defaults.port
            }),
            Err(_) => defaults.port,
        };

        let default_language = match std::env::var("DEFAULT_LANGUAGE") {
            Ok(raw) => raw.parse().unwrap_or_else(|err| {
                log::warn!("{}, using {}", err, defaults.default_language);
                defaults.default_language
            }),
            Err(_) => defaults.default_language,
        };

        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port,
            translations_path: std::env::var("TRANSLATIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.translations_path),
            catalog_path: std::env::var("CATALOG_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            default_language,
            session_idle_minutes: positive_var("SESSION_IDLE_MINUTES", defaults.session_idle_minutes),
            max_sessions: positive_var("MAX_SESSIONS", defaults.max_sessions),
        }
    }
}
