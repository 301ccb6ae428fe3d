use linkboard::CommandBuffer;
use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod logging;

pub use logging::init_logging;

/// Browser handle on one editing session. Draw commands produced by input
/// are buffered until the page drains them with `take_draw_commands`.
#[wasm_bindgen]
pub struct Editor {
    pub(crate) inner: linkboard::Editor,
    pub(crate) surface: CommandBuffer,
}

impl Editor {
    pub(crate) fn rs_wrap(inner: linkboard::Editor) -> Editor {
        Editor { inner, surface: CommandBuffer::new() }
    }

    // Flush scene changes into the command buffer after every mutation so the
    // page never renders a half-updated scene.
    pub(crate) fn rs_sync(&mut self) {
        self.inner.render(&mut self.surface);
    }
}
