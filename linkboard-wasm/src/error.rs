use crate::interop::obj;
use linkboard::SceneError;
use wasm_bindgen::JsValue;

pub fn ok(v: JsValue) -> JsValue {
    obj(&[("ok", JsValue::from_bool(true)), ("value", v)])
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let mut e = vec![("code", JsValue::from_str(code)), ("message", JsValue::from_str(&message.into()))];
    if let Some(d) = data { e.push(("data", d)); }
    obj(&[("ok", JsValue::from_bool(false)), ("error", obj(&e))])
}

pub fn scene(e: &SceneError) -> JsValue {
    let data = match e {
        SceneError::UnknownNode(id) => obj(&[("id", JsValue::from_f64(id.0 as f64))]),
        SceneError::UnknownEdge(id) => obj(&[("id", JsValue::from_str(&format!("edge-{}", id)))]),
        SceneError::InvalidDragState { expected, found } => obj(&[
            ("expected", JsValue::from_str(&expected.to_string())),
            ("found", JsValue::from_str(&found.to_string())),
        ]),
        SceneError::InvalidPosition { x, y } => obj(&[
            ("x", JsValue::from_f64(*x as f64)),
            ("y", JsValue::from_f64(*y as f64)),
        ]),
    };
    err(e.code(), e.to_string(), Some(data))
}

#[inline]
pub fn invalid_target(got: &str) -> JsValue {
    let d = obj(&[("got", JsValue::from_str(got))]);
    err("invalid_target", "target must be 'canvas', 'node-<id>' or 'edge-<a>-<b>'", Some(d))
}

#[inline]
pub fn invalid_config(message: impl Into<String>) -> JsValue {
    err("invalid_config", message, None)
}

#[inline]
pub fn invalid_event(message: impl Into<String>) -> JsValue {
    err("invalid_event", message, None)
}
