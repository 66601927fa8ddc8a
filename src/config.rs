//! Application-level configuration constants and count validation.

use std::fmt;

// Arena
pub const CANVAS_WIDTH: f64 = 500.0;
pub const CANVAS_HEIGHT: f64 = 400.0;
pub const TARGET_RADIUS: f64 = 25.0;
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

// Timing
pub const TICK_MS: u32 = 100;
pub const TICKS_PER_SECOND: u32 = 1_000 / TICK_MS;
pub const FADE_MS: u32 = 1_500;

// Default values for input fields
pub const DEFAULT_COUNT: u32 = 10;

// Min/Max limits for input fields
pub const MIN_COUNT: u32 = 1;
pub const MAX_COUNT: u32 = 1_000;

/// Settings applied on the next `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    /// Number of targets, which is also the number to reach to win.
    pub count: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_COUNT,
        }
    }
}

impl fmt::Display for GameConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.count)
    }
}

impl GameConfig {
    /// Build a config from raw input text, rejecting anything outside `MIN_COUNT..=MAX_COUNT`.
    pub fn from_input(input: &str) -> Result<Self, ConfigError> {
        parse_count(input).map(|count| Self { count })
    }
}

/// Reasons a count typed by the player is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Empty,
    NotANumber(String),
    TooSmall { min: u32 },
    TooLarge { max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Empty => write!(f, "Point count cannot be empty"),
            ConfigError::NotANumber(raw) => {
                write!(f, "Point count must be a whole number, got '{}'", raw)
            }
            ConfigError::TooSmall { min } => write!(f, "Point count must be at least {}", min),
            ConfigError::TooLarge { max } => write!(f, "Point count cannot exceed {}", max),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Generic bounded integer validation shared by numeric inputs.
pub fn validate_bounded(input: &str, min: u32, max: u32) -> Result<u32, ConfigError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::Empty);
    }

    // Negative input is a number, just too small.
    if let Ok(signed) = trimmed.parse::<i64>() {
        if signed < min as i64 {
            return Err(ConfigError::TooSmall { min });
        }
        if signed > max as i64 {
            return Err(ConfigError::TooLarge { max });
        }
        return Ok(signed as u32);
    }

    Err(ConfigError::NotANumber(trimmed.to_string()))
}

/// Validate the "Point" input.
pub fn parse_count(input: &str) -> Result<u32, ConfigError> {
    validate_bounded(input, MIN_COUNT, MAX_COUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_counts_in_range() {
        assert_eq!(parse_count("1"), Ok(1));
        assert_eq!(parse_count(" 42 "), Ok(42));
        assert_eq!(parse_count("1000"), Ok(1000));
    }

    #[test]
    fn rejects_out_of_range_counts() {
        assert_eq!(parse_count("0"), Err(ConfigError::TooSmall { min: MIN_COUNT }));
        assert_eq!(parse_count("-3"), Err(ConfigError::TooSmall { min: MIN_COUNT }));
        assert_eq!(parse_count("1001"), Err(ConfigError::TooLarge { max: MAX_COUNT }));
        assert_eq!(
            parse_count("99999999999999999999"),
            Err(ConfigError::NotANumber("99999999999999999999".to_string()))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_count("   "), Err(ConfigError::Empty));
        assert_eq!(parse_count("ten"), Err(ConfigError::NotANumber("ten".to_string())));
        assert_eq!(parse_count("2.5"), Err(ConfigError::NotANumber("2.5".to_string())));
    }

    #[test]
    fn error_messages_name_the_limit() {
        assert_eq!(
            ConfigError::TooLarge { max: 1000 }.to_string(),
            "Point count cannot exceed 1000"
        );
        assert_eq!(
            GameConfig::from_input("7").map(|c| c.count),
            Ok(7)
        );
        assert_eq!(GameConfig::default().count, DEFAULT_COUNT);
        assert_eq!(GameConfig { count: 12 }.to_string(), "12");
    }
}
