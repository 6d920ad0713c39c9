//! Event handlers the host loop calls with a borrowed session.
//!
//! Each handler returns `true` when the event changed something visible and
//! the caller should request a redraw.

use log::{ debug, warn };

use super::light_input::LightInputFields;
use crate::engine::rendering::gl_api::GlApi;
use crate::engine::rendering::session::RenderSession;

pub struct PointerDragHandler<'a, G: GlApi> {
    session: &'a mut RenderSession<G>,
}

impl<'a, G: GlApi> PointerDragHandler<'a, G> {
    pub fn new(session: &'a mut RenderSession<G>) -> Self {
        Self { session }
    }

    pub fn on_press(&mut self, x: f32, y: f32) -> bool {
        self.session.rotator_mut().begin_drag(x, y);
        false
    }

    pub fn on_release(&mut self) -> bool {
        self.session.rotator_mut().end_drag();
        false
    }

    pub fn on_move(&mut self, x: f32, y: f32) -> bool {
        self.session.rotator_mut().drag_to(x, y)
    }
}

pub struct LightInputHandler<'a, G: GlApi> {
    session: &'a mut RenderSession<G>,
}

impl<'a, G: GlApi> LightInputHandler<'a, G> {
    pub fn new(session: &'a mut RenderSession<G>) -> Self {
        Self { session }
    }

    /// Re-reads all three fields and stores the resulting light position.
    pub fn on_input(&mut self, fields: &LightInputFields) -> bool {
        let previous = self.session.light_position();
        let (position, rejected) = fields.parse(previous);
        for axis in rejected {
            warn!(
                "light {axis} input {:?} is not a number; keeping {}",
                fields.text(axis),
                previous[axis.index()]
            );
        }

        debug!("light position {position:?}");
        self.session.set_light_position(position);
        position != previous
    }
}
