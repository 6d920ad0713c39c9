//! Kiss Surface viewer.
//!
//! Usage: `kiss-surface [config.json]`
//!
//! - Left drag: rotate the surface
//! - Typing: edit the focused light field; Tab moves focus, Backspace
//!   deletes, Escape clears

use kiss_surface::app::ViewerApp;
use kiss_surface::engine::config::ViewerConfig;
use log::info;
use winit::event_loop::EventLoop;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => {
            info!("[CONFIG] Loading {path}");
            ViewerConfig::load(&path)?
        }
        None => ViewerConfig::default(),
    };

    let event_loop = EventLoop::new()?;
    let mut app = ViewerApp::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
