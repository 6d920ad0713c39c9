use log::{ debug, info };

use super::gl_api::GlApi;
use crate::engine::error::{ ShaderStage, ViewerError };

fn compile_shader<G: GlApi>(
    gl: &G,
    stage: ShaderStage,
    source: &str
) -> Result<G::Shader, ViewerError> {
    let shader = gl
        .create_shader(stage.gl_kind())
        .map_err(|e| ViewerError::GpuResource(format!("{stage} shader object: {e}")))?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let diagnostic = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(ViewerError::ShaderCompile { stage, diagnostic });
    }
    debug!("{stage} shader compiled");
    Ok(shader)
}

/// Compiles both stages and links them into a program.
///
/// The returned program has both shaders attached and is linked, but is not
/// made current. Nothing is retried: a failure here is a startup failure.
pub fn build_program<G: GlApi>(
    gl: &G,
    vertex_source: &str,
    fragment_source: &str
) -> Result<G::Program, ViewerError> {
    let vertex = compile_shader(gl, ShaderStage::Vertex, vertex_source)?;
    let fragment = match compile_shader(gl, ShaderStage::Fragment, fragment_source) {
        Ok(shader) => shader,
        Err(e) => {
            gl.delete_shader(vertex);
            return Err(e);
        }
    };

    let program = match gl.create_program() {
        Ok(program) => program,
        Err(e) => {
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);
            return Err(ViewerError::GpuResource(format!("program object: {e}")));
        }
    };
    gl.attach_shader(program, vertex);
    gl.attach_shader(program, fragment);
    gl.link_program(program);

    // Attached shaders are only flagged for deletion; they stay attached.
    gl.delete_shader(vertex);
    gl.delete_shader(fragment);

    if !gl.get_program_link_status(program) {
        let diagnostic = gl.get_program_info_log(program);
        gl.delete_program(program);
        return Err(ViewerError::Link { diagnostic });
    }

    info!("✅ Shader program linked");
    Ok(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rendering::fake_gl::{ FakeGl, GlCall, FAKE_COMPILE_LOG, FAKE_LINK_LOG };

    const VALID: &str = "#version 330 core\nvoid main() {}";
    const INVALID: &str = "#version 330 core\nvoid mian() {}";

    #[test]
    fn valid_sources_link() {
        let gl = FakeGl::new();
        let program = build_program(&gl, VALID, VALID).unwrap();

        let calls = gl.calls();
        let attached = calls
            .iter()
            .filter(|c| matches!(c, GlCall::AttachShader { program: p, .. } if *p == program))
            .count();
        assert_eq!(attached, 2);
        assert!(calls.contains(&GlCall::LinkProgram(program)));
        assert!(!calls.iter().any(|c| matches!(c, GlCall::UseProgram(_))));
    }

    #[test]
    fn invalid_vertex_source_reports_vertex_stage() {
        let gl = FakeGl::new();
        match build_program(&gl, INVALID, VALID) {
            Err(ViewerError::ShaderCompile { stage, diagnostic }) => {
                assert_eq!(stage, ShaderStage::Vertex);
                assert!(!diagnostic.is_empty());
                assert_eq!(diagnostic, FAKE_COMPILE_LOG);
            }
            other => panic!("expected vertex compile error, got {other:?}"),
        }
        // The fragment stage is never attempted.
        let compiles = gl.calls().iter().filter(|c| matches!(c, GlCall::CompileShader(_))).count();
        assert_eq!(compiles, 1);
    }

    #[test]
    fn invalid_fragment_source_reports_fragment_stage() {
        let gl = FakeGl::new();
        match build_program(&gl, VALID, INVALID) {
            Err(ViewerError::ShaderCompile { stage, diagnostic }) => {
                assert_eq!(stage, ShaderStage::Fragment);
                assert!(!diagnostic.is_empty());
            }
            other => panic!("expected fragment compile error, got {other:?}"),
        }
        let deleted = gl.calls().iter().filter(|c| matches!(c, GlCall::DeleteShader(_))).count();
        assert_eq!(deleted, 2);
    }

    #[test]
    fn link_failure_carries_linker_log() {
        let mut gl = FakeGl::new();
        gl.fail_link = true;
        match build_program(&gl, VALID, VALID) {
            Err(ViewerError::Link { diagnostic }) => assert_eq!(diagnostic, FAKE_LINK_LOG),
            other => panic!("expected link error, got {other:?}"),
        }
        assert!(gl.calls().iter().any(|c| matches!(c, GlCall::DeleteProgram(_))));
    }
}
