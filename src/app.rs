//! Windowed host: owns the event loop state and drives the render session.
//!
//! Lifecycle is `Uninitialized -> Running -> (exit)`, or `Uninitialized ->
//! Failed` when the context or session cannot be built. A failed viewer
//! never retries.

use glutin::config::{ Config, ConfigTemplateBuilder };
use glutin::context::{ ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version };
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{ Surface, SurfaceAttributesBuilder, WindowSurface };
use glutin_winit::DisplayBuilder;
use log::{ debug, error, info };
use raw_window_handle::HasWindowHandle;
use std::ffi::CString;
use std::num::NonZeroU32;
use winit::application::ApplicationHandler;
use winit::dpi::{ LogicalSize, PhysicalPosition };
use winit::event::{ ElementState, KeyEvent, MouseButton, WindowEvent };
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{ Key, NamedKey };
use winit::window::{ Window, WindowId };

use crate::engine::config::ViewerConfig;
use crate::engine::error::ViewerError;
use crate::engine::rendering::{ RenderSession, ShaderSources };
use crate::engine::systems::{ LightInputFields, LightInputHandler, PointerDragHandler };

struct GlTarget {
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    gl: glow::Context,
}

// Field order is drop order: GL objects go before the surface, the context
// and finally the window.
struct RunningViewer {
    session: RenderSession<glow::Context>,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
    cursor: PhysicalPosition<f64>,
}

enum ViewerState {
    Uninitialized,
    Running(Box<RunningViewer>),
    /// Holds the window, if one was created, so the error title stays visible.
    Failed {
        _window: Option<Window>,
    },
}

pub struct ViewerApp {
    config: ViewerConfig,
    sources: ShaderSources<'static>,
    light_fields: LightInputFields,
    state: ViewerState,
}

impl ViewerApp {
    pub fn new(config: ViewerConfig) -> Self {
        Self::with_sources(config, ShaderSources::bundled())
    }

    pub fn with_sources(config: ViewerConfig, sources: ShaderSources<'static>) -> Self {
        let light_fields = LightInputFields::new(config.light_position);
        Self {
            config,
            sources,
            light_fields,
            state: ViewerState::Uninitialized,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, window: Option<Window>, err: &ViewerError) {
        if present_failure(window.as_ref(), err) {
            event_loop.exit();
        }
        self.state = ViewerState::Failed { _window: window };
    }
}

/// Somewhere a startup failure can be shown to the user.
trait FailureTitle {
    fn show_failure(&self, message: &str);
}

impl FailureTitle for Window {
    fn show_failure(&self, message: &str) {
        self.set_title(message);
    }
}

/// Logs `err` and puts its user message on `window`. Returns `true` when
/// there is no window to show it on and the loop should exit.
fn present_failure<W: FailureTitle>(window: Option<&W>, err: &ViewerError) -> bool {
    let message = err.user_message();
    error!("[INIT] {err}");
    error!("[INIT] {message}");

    match window {
        Some(window) => {
            window.show_failure(&message);
            false
        }
        None => true,
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self.state, ViewerState::Uninitialized) {
            return;
        }

        let (window, gl_config) = match create_window(event_loop, &self.config) {
            Ok(created) => created,
            Err(e) => {
                self.fail(event_loop, None, &e);
                return;
            }
        };
        let GlTarget { context, surface, gl } = match create_gl_context(&window, &gl_config) {
            Ok(target) => target,
            Err(e) => {
                self.fail(event_loop, Some(window), &e);
                return;
            }
        };

        match RenderSession::initialize(gl, &self.sources, &self.config) {
            Ok(mut session) => {
                let size = window.inner_size();
                session.resize(size.width, size.height);
                window.set_title(&window_title(&self.config, &self.light_fields));
                window.request_redraw();

                info!("[INIT] Viewer running");
                self.state = ViewerState::Running(
                    Box::new(RunningViewer {
                        session,
                        surface,
                        context,
                        window,
                        cursor: PhysicalPosition::new(0.0, 0.0),
                    })
                );
            }
            Err(e) => {
                drop(surface);
                drop(context);
                self.fail(event_loop, Some(window), &e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ViewerState::Running(viewer) = &mut self.state else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                    viewer.surface.resize(&viewer.context, width, height);
                    viewer.session.resize(size.width, size.height);
                    viewer.window.request_redraw();
                }
            }

            WindowEvent::RedrawRequested => {
                viewer.session.redraw();
                if let Err(e) = viewer.surface.swap_buffers(&viewer.context) {
                    error!("[RENDER] swap_buffers failed, ending session: {e}");
                    event_loop.exit();
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                viewer.cursor = position;
                let moved = PointerDragHandler::new(&mut viewer.session)
                    .on_move(position.x as f32, position.y as f32);
                if moved {
                    viewer.window.request_redraw();
                }
            }

            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                let (x, y) = (viewer.cursor.x as f32, viewer.cursor.y as f32);
                let mut drag = PointerDragHandler::new(&mut viewer.session);
                match state {
                    ElementState::Pressed => drag.on_press(x, y),
                    ElementState::Released => drag.on_release(),
                };
            }

            WindowEvent::KeyboardInput { event, .. } => {
                match edit_light_fields(&mut self.light_fields, &event) {
                    FieldEdit::Text => {
                        LightInputHandler::new(&mut viewer.session).on_input(&self.light_fields);
                        viewer.window.request_redraw();
                    }
                    FieldEdit::Focus => {}
                    FieldEdit::None => return,
                }
                viewer.window.set_title(&window_title(&self.config, &self.light_fields));
            }

            _ => {}
        }
    }
}

fn window_title(config: &ViewerConfig, fields: &LightInputFields) -> String {
    format!("{} | light {}  (Tab: next field)", config.window.title, fields.summary())
}

enum FieldEdit {
    Text,
    Focus,
    None,
}

fn edit_light_fields(fields: &mut LightInputFields, event: &KeyEvent) -> FieldEdit {
    if event.state != ElementState::Pressed {
        return FieldEdit::None;
    }

    let changed = match &event.logical_key {
        Key::Named(NamedKey::Tab) => {
            fields.focus_next();
            debug!("light field {} focused", fields.active());
            return FieldEdit::Focus;
        }
        Key::Named(NamedKey::Backspace) => fields.backspace(),
        Key::Named(NamedKey::Escape) => fields.clear_active(),
        _ => match &event.text {
            Some(text) if !text.chars().any(char::is_control) => {
                fields.push_str(text);
                true
            }
            _ => false,
        },
    };

    if changed { FieldEdit::Text } else { FieldEdit::None }
}

fn context_error(stage: &str, e: impl std::fmt::Display) -> ViewerError {
    ViewerError::ContextAcquisition(format!("{stage}: {e}"))
}

/// Creates the window and picks a GL config with a depth buffer.
fn create_window(event_loop: &ActiveEventLoop, config: &ViewerConfig) -> Result<(Window, Config), ViewerError> {
    let window_attributes = Window::default_attributes()
        .with_title(config.window.title.clone())
        .with_inner_size(LogicalSize::new(config.window.width, config.window.height));

    let template = ConfigTemplateBuilder::new().with_depth_size(24);
    let (window, gl_config) = DisplayBuilder::new()
        .with_window_attributes(Some(window_attributes.clone()))
        .build(event_loop, template, |mut configs| {
            // find_configs returns an error instead of an empty list.
            configs.next().expect("GL display offered no configs")
        })
        .map_err(|e| context_error("display", e))?;

    let window = match window {
        Some(window) => window,
        None => glutin_winit::finalize_window(event_loop, window_attributes, &gl_config)
            .map_err(|e| context_error("window", e))?,
    };

    Ok((window, gl_config))
}

/// Creates a GL 3.3 core context and window surface for `window` and makes
/// it current. On failure the caller still owns the window.
fn create_gl_context(window: &Window, gl_config: &Config) -> Result<GlTarget, ViewerError> {
    let raw_window_handle = window
        .window_handle()
        .map_err(|e| context_error("window handle", e))?
        .as_raw();

    let display = gl_config.display();
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
        .build(Some(raw_window_handle));
    let not_current = unsafe { display.create_context(gl_config, &context_attributes) }
        .map_err(|e| context_error("context", e))?;

    let size = window.inner_size();
    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
        NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN)
    );
    let surface = unsafe { display.create_window_surface(gl_config, &surface_attributes) }
        .map_err(|e| context_error("surface", e))?;
    let context = not_current
        .make_current(&surface)
        .map_err(|e| context_error("make current", e))?;

    let gl = unsafe {
        glow::Context::from_loader_function(|symbol| {
            CString::new(symbol)
                .map(|symbol| display.get_proc_address(&symbol))
                .unwrap_or(std::ptr::null())
        })
    };

    info!("[INIT] OpenGL context ready ({}x{})", size.width, size.height);
    Ok(GlTarget { context, surface, gl })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordedTitle(RefCell<Option<String>>);

    impl FailureTitle for RecordedTitle {
        fn show_failure(&self, message: &str) {
            *self.0.borrow_mut() = Some(message.to_string());
        }
    }

    #[test]
    fn context_failure_with_window_sets_apology_title() {
        let window = RecordedTitle::default();
        let err = ViewerError::ContextAcquisition("surface: no config".to_string());

        let exit = present_failure(Some(&window), &err);

        assert!(!exit);
        assert_eq!(
            window.0.borrow().as_deref(),
            Some("Sorry, could not get an OpenGL graphics context.")
        );
    }

    #[test]
    fn session_failure_with_window_shows_its_message() {
        let window = RecordedTitle::default();
        let err = ViewerError::Link { diagnostic: "undefined symbol".to_string() };

        assert!(!present_failure(Some(&window), &err));
        assert_eq!(window.0.borrow().clone(), Some(err.user_message()));
    }

    #[test]
    fn failure_without_window_exits() {
        let err = ViewerError::ContextAcquisition("display: none".to_string());
        assert!(present_failure::<RecordedTitle>(None, &err));
    }
}
