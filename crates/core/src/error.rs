//! Error types for the flowfield core.

use thiserror::Error;

/// Errors produced by configuration and build-time operations.
///
/// The per-frame path is total by design: every variant here is raised while
/// building a gradient, selecting a curve, or committing a parameter — never
/// in the middle of a frame.
#[derive(Debug, Error)]
pub enum FlowError {
    /// A color string could not be parsed as a 6-digit hex triplet.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A gradient map was empty or carried a non-positive weight.
    #[error("invalid gradient: {0}")]
    InvalidGradient(String),

    /// A requested curve name was not one of the known fields.
    #[error("unknown curve: {0}")]
    UnknownCurve(String),

    /// A requested color mode name was not recognized.
    #[error("unknown color mode: {0}")]
    UnknownColorMode(String),

    /// Surface width or height was zero or non-finite.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// A parameter value fell outside its documented bounds.
    #[error("parameter '{name}' out of range: {value} not in [{min}, {max}]")]
    ParamOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// An I/O failure while writing a snapshot.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_color_includes_offending_input() {
        let err = FlowError::InvalidColor("zzzzzz".into());
        let msg = format!("{err}");
        assert!(msg.contains("zzzzzz"), "missing input in: {msg}");
    }

    #[test]
    fn unknown_curve_includes_name() {
        let err = FlowError::UnknownCurve("Spirals".into());
        let msg = format!("{err}");
        assert!(msg.contains("Spirals"), "missing name in: {msg}");
    }

    #[test]
    fn param_out_of_range_includes_all_fields() {
        let err = FlowError::ParamOutOfRange {
            name: "speed",
            value: 1.5,
            min: 0.0,
            max: 1.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("speed"), "missing param name in: {msg}");
        assert!(msg.contains("1.5"), "missing value in: {msg}");
    }

    #[test]
    fn invalid_gradient_includes_message() {
        let err = FlowError::InvalidGradient("no stops".into());
        assert!(format!("{err}").contains("no stops"));
    }

    #[test]
    fn flow_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FlowError>();
    }

    #[test]
    fn flow_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<FlowError>();
    }
}
