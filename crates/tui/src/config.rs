use std::env;
use std::path::PathBuf;

pub const DEFAULT_BACKEND: &str = "popdesk-backend";
pub const DEFAULT_CONSOLE_HEIGHT: u16 = 10;
pub const DEFAULT_LOG_FILTER: &str = "popdesk_tui=info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendCommand {
    pub program: String,
    pub args: Vec<String>,
}

/// Startup settings. Command-line flags override environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub backend: BackendCommand,
    pub console_height: u16,
    pub console_collapsed: bool,
    pub use_tls: bool,
    pub log_file: Option<PathBuf>,
    pub log_filter: String,
    /// Problems found while reading the settings; shown in the transcript at startup.
    pub warnings: Vec<String>,
}

fn truthy(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

fn parse_bool_like(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_args(value: &str, warnings: &mut Vec<String>) -> Vec<String> {
    match shell_words::split(value) {
        Ok(parts) => parts.into_iter().filter(|part| !part.is_empty()).collect(),
        Err(error) => {
            warnings.push(format!(
                "backend args parse warning ({error}); falling back to whitespace split"
            ));
            value
                .split_whitespace()
                .map(|part| part.to_string())
                .collect()
        }
    }
}

fn parse_height(value: &str, source: &str, warnings: &mut Vec<String>) -> Option<u16> {
    match value.trim().parse::<u16>() {
        Ok(height) => Some(height),
        Err(_) => {
            warnings.push(format!(
                "ignoring invalid console height {value:?} from {source}; using {DEFAULT_CONSOLE_HEIGHT}"
            ));
            None
        }
    }
}

#[derive(Default)]
struct CliArgs {
    backend: Option<String>,
    backend_args: Option<String>,
    console_height: Option<String>,
    console_collapsed: bool,
    no_tls: bool,
    log_file: Option<String>,
}

fn parse_cli(
    args: impl IntoIterator<Item = impl AsRef<str>>,
    warnings: &mut Vec<String>,
) -> CliArgs {
    let mut args = args
        .into_iter()
        .map(|arg| arg.as_ref().to_string())
        .peekable();
    let mut cli = CliArgs::default();
    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => {
                (flag.to_string(), Some(value.to_string()))
            }
            _ => (arg.clone(), None),
        };
        let slot = match flag.as_str() {
            "--backend" => &mut cli.backend,
            "--backend-args" => &mut cli.backend_args,
            "--console-height" => &mut cli.console_height,
            "--log-file" => &mut cli.log_file,
            "--console-collapsed" => {
                cli.console_collapsed = inline.as_deref().map_or(true, |value| {
                    parse_bool_like(value).unwrap_or(false)
                });
                continue;
            }
            "--no-tls" => {
                cli.no_tls = true;
                continue;
            }
            _ => {
                warnings.push(format!("ignoring unknown argument {arg:?}"));
                continue;
            }
        };
        match inline {
            Some(value) => *slot = Some(value),
            None => match args.peek() {
                Some(next) if !next.starts_with("--") => *slot = args.next(),
                _ => warnings.push(format!("{flag} expects a value")),
            },
        }
    }
    cli
}

impl Config {
    pub fn load() -> Self {
        Self::from_sources(env::args().skip(1), |key| env::var(key).ok())
    }

    pub fn from_sources(
        args: impl IntoIterator<Item = impl AsRef<str>>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let mut warnings = Vec::new();
        let cli = parse_cli(args, &mut warnings);
        let env_value = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let program = cli
            .backend
            .or_else(|| env_value("POPDESK_BACKEND_CMD"))
            .unwrap_or_else(|| DEFAULT_BACKEND.to_string());
        let backend_args = match cli.backend_args.or_else(|| env_value("POPDESK_BACKEND_ARGS")) {
            Some(value) => split_args(&value, &mut warnings),
            None => Vec::new(),
        };

        let console_height = match cli.console_height {
            Some(value) => parse_height(&value, "--console-height", &mut warnings),
            None => env_value("POPDESK_CONSOLE_HEIGHT")
                .and_then(|value| parse_height(&value, "POPDESK_CONSOLE_HEIGHT", &mut warnings)),
        }
        .unwrap_or(DEFAULT_CONSOLE_HEIGHT);

        let console_collapsed = cli.console_collapsed
            || env_value("POPDESK_CONSOLE_COLLAPSED")
                .as_deref()
                .map(truthy)
                .unwrap_or(false);

        let use_tls = if cli.no_tls {
            false
        } else {
            match env_value("POPDESK_TLS") {
                Some(value) => parse_bool_like(&value).unwrap_or_else(|| {
                    warnings.push(format!("ignoring invalid POPDESK_TLS value {value:?}"));
                    true
                }),
                None => true,
            }
        };

        let log_file = cli
            .log_file
            .or_else(|| env_value("POPDESK_LOG_FILE"))
            .map(PathBuf::from);
        let log_filter = env_value("POPDESK_LOG")
            .or_else(|| env_value("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            backend: BackendCommand {
                program,
                args: backend_args,
            },
            console_height,
            console_collapsed,
            use_tls,
            log_file,
            log_filter,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, DEFAULT_BACKEND, DEFAULT_CONSOLE_HEIGHT, DEFAULT_LOG_FILTER};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config(args: &[&str], env: &[(&str, &str)]) -> Config {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_sources(args.iter(), |key| env.get(key).cloned())
    }

    #[test]
    fn defaults_without_arguments_or_environment() {
        let config = config(&[], &[]);
        assert_eq!(config.backend.program, DEFAULT_BACKEND);
        assert!(config.backend.args.is_empty());
        assert_eq!(config.console_height, DEFAULT_CONSOLE_HEIGHT);
        assert!(!config.console_collapsed);
        assert!(config.use_tls);
        assert_eq!(config.log_file, None);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn cli_overrides_environment() {
        let config = config(
            &["--backend", "./pop-bridge", "--console-height=14", "--no-tls"],
            &[
                ("POPDESK_BACKEND_CMD", "other"),
                ("POPDESK_CONSOLE_HEIGHT", "3"),
                ("POPDESK_TLS", "yes"),
            ],
        );
        assert_eq!(config.backend.program, "./pop-bridge");
        assert_eq!(config.console_height, 14);
        assert!(!config.use_tls);
    }

    #[test]
    fn backend_args_are_shell_split() {
        let config = config(
            &[],
            &[("POPDESK_BACKEND_ARGS", "--verbose --name 'pop bridge'")],
        );
        assert_eq!(
            config.backend.args,
            vec!["--verbose", "--name", "pop bridge"]
        );
    }

    #[test]
    fn environment_flags_and_log_settings() {
        let config = config(
            &[],
            &[
                ("POPDESK_CONSOLE_COLLAPSED", "TRUE"),
                ("POPDESK_TLS", "off"),
                ("POPDESK_LOG_FILE", "/tmp/popdesk.log"),
                ("RUST_LOG", "debug"),
            ],
        );
        assert!(config.console_collapsed);
        assert!(!config.use_tls);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/popdesk.log")));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn invalid_values_fall_back_with_warnings() {
        let config = config(
            &["--console-height", "tall", "--frobnicate"],
            &[("POPDESK_TLS", "maybe")],
        );
        assert_eq!(config.console_height, DEFAULT_CONSOLE_HEIGHT);
        assert!(config.use_tls);
        assert_eq!(config.warnings.len(), 3);
    }
}
