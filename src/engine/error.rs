//! Error types for viewer initialization and configuration.

use std::fmt;
use thiserror::Error;

/// Which pipeline stage a shader source belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The matching `glCreateShader` kind.
    pub fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

/// Everything that can stop a session from reaching the render loop.
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("could not get an OpenGL graphics context: {0}")]
    ContextAcquisition(String),
    #[error("error in {stage} shader: {diagnostic}")]
    ShaderCompile {
        stage: ShaderStage,
        diagnostic: String,
    },
    #[error("link error in program: {diagnostic}")]
    Link {
        diagnostic: String,
    },
    #[error("malformed mesh: {0}")]
    MalformedMesh(String),
    #[error("GPU object creation failed: {0}")]
    GpuResource(String),
}

impl ViewerError {
    /// The message shown to the user in place of the rendered surface.
    pub fn user_message(&self) -> String {
        match self {
            ViewerError::ContextAcquisition(_) => {
                "Sorry, could not get an OpenGL graphics context.".to_string()
            }
            other => format!("Sorry, could not initialize the OpenGL graphics context: {other}"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_error_names_stage() {
        let err = ViewerError::ShaderCompile {
            stage: ShaderStage::Fragment,
            diagnostic: "0:3: syntax error".into(),
        };
        assert_eq!(err.to_string(), "error in fragment shader: 0:3: syntax error");
    }

    #[test]
    fn context_failure_has_static_user_message() {
        let err = ViewerError::ContextAcquisition("no display".into());
        assert_eq!(err.user_message(), "Sorry, could not get an OpenGL graphics context.");
    }

    #[test]
    fn other_failures_include_cause_in_user_message() {
        let err = ViewerError::Link { diagnostic: "varying mismatch".into() };
        assert!(err.user_message().contains("link error in program: varying mismatch"));
    }
}
