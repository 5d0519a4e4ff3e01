use std::fmt;
use std::str::FromStr;

/// Severity of a log record, mirroring the level set used by the host
/// logging framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Default for Level {
    fn default() -> Self {
        Self::Info
    }
}

impl Level {
    /// Canonical upper-case rendering used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TRACE" => Ok(Self::Trace),
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARN" | "WARNING" => Ok(Self::Warn),
            "ERROR" => Ok(Self::Error),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Level::Trace, "TRACE")]
    #[case(Level::Debug, "DEBUG")]
    #[case(Level::Info, "INFO")]
    #[case(Level::Warn, "WARN")]
    #[case(Level::Error, "ERROR")]
    fn displays_canonical_form(#[case] level: Level, #[case] expected: &str) {
        assert_eq!(level.to_string(), expected);
        assert_eq!(level.as_str(), expected);
    }

    #[rstest]
    #[case("error", Level::Error)]
    #[case("WARNING", Level::Warn)]
    #[case("Info", Level::Info)]
    fn parses_case_insensitively(#[case] input: &str, #[case] expected: Level) {
        assert_eq!(input.parse::<Level>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_levels() {
        assert!("FATAL".parse::<Level>().is_err());
    }
}
