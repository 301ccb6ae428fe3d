use crate::error;
use crate::interop::{obj, str_array, to_js};
use crate::Editor;
use js_sys::{Float32Array, Uint32Array, Uint8Array};
use linkboard::{EditorConfig, Effect, InputEvent, Modifiers, NodeId, Pick, PointerTarget, SceneError, VisualId};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn parse_target(s: &str) -> Option<PointerTarget> {
    if s == "canvas" {
        return Some(PointerTarget::Canvas);
    }
    s.parse::<VisualId>().ok().map(PointerTarget::from)
}

fn effect_res(r: Result<Effect, SceneError>) -> JsValue {
    match r {
        Ok(fx) => error::ok(to_js(&fx)),
        Err(e) => error::scene(&e),
    }
}

#[wasm_bindgen]
impl Editor {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Editor {
        Editor::rs_wrap(linkboard::Editor::default())
    }

    /// Build from a (partial) config object; throws an error object on
    /// invalid input.
    pub fn with_config(cfg: JsValue) -> Result<Editor, JsValue> {
        let cfg: EditorConfig = serde_wasm_bindgen::from_value(cfg).map_err(|e| error::invalid_config(e.to_string()))?;
        linkboard::Editor::new(cfg).map(Editor::rs_wrap).map_err(|e| error::invalid_config(e.to_string()))
    }

    pub fn config(&self) -> JsValue {
        to_js(self.inner.config())
    }

    pub fn node_count(&self) -> u32 {
        self.inner.scene().node_count() as u32
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.scene().edge_count() as u32
    }
    pub fn undo_depth(&self) -> u32 {
        self.inner.undo_depth() as u32
    }
    pub fn is_dragging(&self) -> bool {
        self.inner.drag_state() != linkboard::DragState::Idle
    }
    pub fn trash_visible(&self) -> bool {
        self.inner.trash_visible()
    }
    /// `[x, y, width, height]` of the deletion zone.
    pub fn trash_rect(&self) -> Float32Array {
        let r = self.inner.trash_rect();
        Float32Array::from(&[r.x, r.y, r.width, r.height][..])
    }

    // Input
    pub fn pointer_down(&mut self, x: f32, y: f32, target: &str) -> JsValue {
        let Some(target) = parse_target(target) else {
            return error::invalid_target(target);
        };
        let r = self.inner.handle(InputEvent::PointerDown { x, y, target });
        self.rs_sync();
        effect_res(r)
    }
    pub fn pointer_move(&mut self, x: f32, y: f32) -> JsValue {
        let r = self.inner.handle(InputEvent::PointerMove { x, y });
        self.rs_sync();
        effect_res(r)
    }
    pub fn pointer_up(&mut self, x: f32, y: f32) -> JsValue {
        let r = self.inner.handle(InputEvent::PointerUp { x, y });
        self.rs_sync();
        effect_res(r)
    }
    pub fn key_down(&mut self, key: String, ctrl: bool, shift: bool, alt: bool, meta: bool) -> JsValue {
        let modifiers = Modifiers { ctrl, shift, alt, meta };
        let r = self.inner.handle(InputEvent::KeyDown { key, modifiers });
        self.rs_sync();
        effect_res(r)
    }
    pub fn label_input(&mut self, node: u32, text: String) -> JsValue {
        let r = self.inner.handle(InputEvent::LabelInput { node: NodeId(node), text });
        self.rs_sync();
        effect_res(r)
    }
    /// Generic entry point taking a tagged event object, e.g.
    /// `{type: "pointer_up", x: 10, y: 20}`.
    pub fn handle_event(&mut self, ev: JsValue) -> JsValue {
        let ev: InputEvent = match serde_wasm_bindgen::from_value(ev) {
            Ok(ev) => ev,
            Err(e) => return error::invalid_event(e.to_string()),
        };
        let r = self.inner.handle(ev);
        self.rs_sync();
        effect_res(r)
    }

    // Direct operations
    pub fn create_node(&mut self, x: f32, y: f32, label: Option<String>) -> Option<u32> {
        let id = self.inner.create_node(x, y, label).ok()?;
        self.rs_sync();
        Some(id.0)
    }
    pub fn create_node_res(&mut self, x: f32, y: f32, label: Option<String>) -> JsValue {
        match self.inner.create_node(x, y, label) {
            Ok(id) => {
                self.rs_sync();
                error::ok(JsValue::from_f64(id.0 as f64))
            }
            Err(e) => error::scene(&e),
        }
    }
    pub fn toggle_edge_res(&mut self, edge: &str) -> JsValue {
        let Ok(VisualId::Edge(id)) = edge.parse::<VisualId>() else {
            return error::invalid_target(edge);
        };
        match self.inner.toggle_edge(id) {
            Ok(active) => {
                self.rs_sync();
                error::ok(JsValue::from_bool(active))
            }
            Err(e) => error::scene(&e),
        }
    }
    pub fn undo(&mut self) -> bool {
        let undone = self.inner.undo();
        self.rs_sync();
        undone
    }
    pub fn resize_res(&mut self, width: f32, height: f32) -> JsValue {
        match self.inner.resize(width, height) {
            Ok(()) => error::ok(JsValue::UNDEFINED),
            Err(e) => error::scene(&e),
        }
    }

    // Rendering
    /// Drain buffered draw commands, oldest first.
    pub fn take_draw_commands(&mut self) -> JsValue {
        to_js(&self.surface.drain())
    }
    /// Queue a full redraw, e.g. after the page rebuilt its canvas.
    pub fn render_all(&mut self) {
        self.inner.render_all(&mut self.surface);
    }

    // Scene queries
    pub fn get_node(&self, id: u32) -> JsValue {
        self.inner.scene().node(NodeId(id)).map_or(JsValue::NULL, |n| to_js(n))
    }
    pub fn get_node_data(&self) -> JsValue {
        let scene = self.inner.scene();
        let ids: Vec<u32> = scene.nodes().map(|n| n.id.0).collect();
        let pos: Vec<f32> = scene.nodes().flat_map(|n| [n.position.x, n.position.y]).collect();
        let labels = str_array(scene.nodes().map(|n| n.label.clone()));
        obj(&[
            ("ids", Uint32Array::from(ids.as_slice()).into()),
            ("positions", Float32Array::from(pos.as_slice()).into()),
            ("labels", labels.into()),
        ])
    }
    /// Edges in insertion order: visual ids, `[a, b]` endpoint pairs,
    /// `[x1, y1, length, angle]` geometry rows and active flags.
    pub fn get_edge_data(&self) -> JsValue {
        let edges = self.inner.scene().edges();
        let ids = str_array(edges.iter().map(|e| VisualId::Edge(e.id).to_string()));
        let endpoints: Vec<u32> = edges.iter().flat_map(|e| [e.a.0, e.b.0]).collect();
        let geometry: Vec<f32> = edges
            .iter()
            .flat_map(|e| [e.geometry.start.x, e.geometry.start.y, e.geometry.length, e.geometry.angle])
            .collect();
        let active: Vec<u8> = edges.iter().map(|e| e.active as u8).collect();
        obj(&[
            ("ids", ids.into()),
            ("endpoints", Uint32Array::from(endpoints.as_slice()).into()),
            ("geometry", Float32Array::from(geometry.as_slice()).into()),
            ("active", Uint8Array::from(active.as_slice()).into()),
        ])
    }
    /// Hit-test at a point; `tol` defaults to the configured pick tolerance.
    pub fn pick(&self, x: f32, y: f32, tol: Option<f32>) -> JsValue {
        let tol = tol.unwrap_or(self.inner.config().pick_tolerance);
        match self.inner.scene().pick(x, y, tol) {
            Some(Pick::Node { id, dist }) => obj(&[
                ("kind", JsValue::from_str("node")),
                ("id", JsValue::from_f64(id.0 as f64)),
                ("dist", JsValue::from_f64(dist as f64)),
            ]),
            Some(Pick::Edge { id, t, dist }) => obj(&[
                ("kind", JsValue::from_str("edge")),
                ("id", JsValue::from_str(&VisualId::Edge(id).to_string())),
                ("t", JsValue::from_f64(t as f64)),
                ("dist", JsValue::from_f64(dist as f64)),
            ]),
            None => JsValue::NULL,
        }
    }
}

impl Default for Editor {
    fn default() -> Self {
        Editor::new()
    }
}
