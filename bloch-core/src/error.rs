/// Error types for config loading and drawing surfaces
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BlochError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("drawing surface not found: {0}")]
    SurfaceNotFound(String),

    #[error("surface error: {0}")]
    Surface(String),
}

pub type BlochResult<T> = Result<T, BlochError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/bloch.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/bloch.toml");

        let err = ConfigError::ValidationError("sphere_radius must be positive".into());
        assert_eq!(
            err.to_string(),
            "config validation error: sphere_radius must be positive"
        );
    }

    #[test]
    fn bloch_error_from_config() {
        let err: BlochError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, BlochError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn bloch_error_surface_variants() {
        let err = BlochError::SurfaceNotFound("maincanvas".into());
        assert_eq!(err.to_string(), "drawing surface not found: maincanvas");

        let err = BlochError::Surface("no 2d context".into());
        assert_eq!(err.to_string(), "surface error: no 2d context");
    }
}
