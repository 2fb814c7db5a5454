use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct Logging {
    /// Logging directives, same syntax as `RUST_LOG`. When unset,
    /// `RUST_LOG` applies, then the built-in default level.
    pub targets: Option<String>,

    #[serde(default)]
    pub style: LoggingStyle,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoggingStyle {
    #[default]
    Full,
    Compact,
    Pretty,
}
