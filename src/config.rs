use std::path::{Path, PathBuf};

use crate::error::RichTextError;

pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Markdown source; `None` reads stdin.
    pub input: Option<PathBuf>,
    /// HTML destination; `None` writes stdout.
    pub output: Option<PathBuf>,
    pub max_input_bytes: usize,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            log_level: "info".into(),
        }
    }
}

impl Config {
    /// Resolves the configuration from `lookup`, which maps a variable name
    /// to its raw value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, RichTextError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("/tmp"));

        let input = var("RICHTEXT_INPUT")
            .filter(|s| s != "-")
            .map(|s| expand_home(&s, &home));

        let output = var("RICHTEXT_OUTPUT")
            .filter(|s| s != "-")
            .map(|s| expand_home(&s, &home));

        if let (Some(input), Some(output)) = (&input, &output) {
            if same_file(input, output) {
                return Err(RichTextError::Config(format!(
                    "RICHTEXT_INPUT and RICHTEXT_OUTPUT both point to {}",
                    input.display()
                )));
            }
        }

        let max_input_bytes = match var("RICHTEXT_MAX_INPUT_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    RichTextError::Config(format!(
                        "RICHTEXT_MAX_INPUT_BYTES must be a positive integer, got {raw:?}"
                    ))
                })?,
            None => DEFAULT_MAX_INPUT_BYTES,
        };

        let log_level = var("RICHTEXT_LOG_LEVEL").unwrap_or_else(|| "info".into());

        Ok(Config {
            input,
            output,
            max_input_bytes,
            log_level,
        })
    }
}

fn expand_home(path: &str, home: &Path) -> PathBuf {
    if let Some(stripped) = path.strip_prefix('~') {
        home.join(stripped.trim_start_matches('/'))
    } else {
        PathBuf::from(path)
    }
}

// Compares resolved paths when both exist, so `./a.md` and `a.md` collide.
fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Loads the configuration from the process environment, after applying any
/// `.env` file.
pub fn load_config() -> Result<Config, RichTextError> {
    dotenvy::dotenv().ok();
    Config::from_lookup(|key| std::env::var(key).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, RichTextError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_paths() {
        let config = config_from(&[
            ("RICHTEXT_INPUT", " /tmp/in.md "),
            ("RICHTEXT_OUTPUT", "/tmp/out.html"),
        ])
        .unwrap();
        assert_eq!(config.input, Some(PathBuf::from("/tmp/in.md")));
        assert_eq!(config.output, Some(PathBuf::from("/tmp/out.html")));
    }

    #[test]
    fn test_dash_and_blank_mean_stdio() {
        let config = config_from(&[("RICHTEXT_INPUT", "-"), ("RICHTEXT_OUTPUT", "  ")]).unwrap();
        assert!(config.input.is_none());
        assert!(config.output.is_none());
    }

    #[test]
    fn test_expand_home() {
        let home = Path::new("/home/user");
        assert_eq!(
            expand_home("~/notes/a.md", home),
            PathBuf::from("/home/user/notes/a.md")
        );
        assert_eq!(expand_home("~", home), PathBuf::from("/home/user"));
        assert_eq!(expand_home("rel/a.md", home), PathBuf::from("rel/a.md"));
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let result = config_from(&[
            ("RICHTEXT_INPUT", "/tmp/a.md"),
            ("RICHTEXT_OUTPUT", "/tmp/a.md"),
        ]);
        let err = result.unwrap_err();
        assert!(matches!(err, RichTextError::Config(_)));
        assert!(err.to_string().contains("/tmp/a.md"));
    }

    #[test]
    fn test_same_file_through_different_spellings_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.md");
        std::fs::write(&input, "**x**").unwrap();
        let output = dir.path().join(".").join("sub").join("..").join("a.md");
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let result = config_from(&[
            ("RICHTEXT_INPUT", input.to_str().unwrap()),
            ("RICHTEXT_OUTPUT", output.to_str().unwrap()),
        ]);
        assert!(matches!(result, Err(RichTextError::Config(_))));
    }

    #[test]
    fn test_distinct_existing_files_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("a.md");
        let output = dir.path().join("a.html");
        std::fs::write(&input, "x").unwrap();
        std::fs::write(&output, "y").unwrap();

        let config = config_from(&[
            ("RICHTEXT_INPUT", input.to_str().unwrap()),
            ("RICHTEXT_OUTPUT", output.to_str().unwrap()),
        ])
        .unwrap();
        assert_eq!(config.input, Some(input));
    }

    #[test]
    fn test_max_input_bytes() {
        let config = config_from(&[("RICHTEXT_MAX_INPUT_BYTES", "2048")]).unwrap();
        assert_eq!(config.max_input_bytes, 2048);
    }

    #[test]
    fn test_max_input_bytes_invalid() {
        for raw in ["0", "-5", "lots"] {
            let err = config_from(&[("RICHTEXT_MAX_INPUT_BYTES", raw)]).unwrap_err();
            assert!(err.to_string().contains("RICHTEXT_MAX_INPUT_BYTES"));
        }
    }

    #[test]
    fn test_log_level() {
        let config = config_from(&[("RICHTEXT_LOG_LEVEL", "debug")]).unwrap();
        assert_eq!(config.log_level, "debug");
    }
}
