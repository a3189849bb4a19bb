//! `AttributePart`, generalizing the plain/property/boolean attribute
//! bindings (spec §4.5). Event-prefixed descriptors never reach here (spec
//! §3, §6, §9): the binder skips them entirely.

use wasm_bindgen::{JsValue, UnwrapThrowExt};
use web_sys::Element;

use crate::part_descriptor::AttributeKind;
use crate::value::Value;

pub struct AttributePart {
    element: Element,
    name: String,
    kind: AttributeKind,
    /// `None` for a single-value binding; `Some(statics)` for an
    /// interpolation of `statics.len() - 1` values.
    strings: Option<Vec<String>>,
    /// The last value seen for each binding slot, used both for the
    /// single-value dirty check and for `noChange` carry-forward inside an
    /// interpolation (spec §4.5). `None` means the slot has never been
    /// committed yet, so there is no "prior value" to dirty-check against —
    /// the very first commit must always write, even if that first value is
    /// `Value::Null`.
    last_values: Vec<Option<Value>>,
    /// The last full string actually written for an interpolation, so an
    /// unchanged concatenation skips the DOM write (spec §4.5).
    last_rendered: Option<String>,
    /// Carried from `render`'s `RenderOptions` (spec §6), reserved for a
    /// future event-listener part; never read here.
    #[allow(dead_code)]
    event_context: Option<JsValue>,
}

impl AttributePart {
    pub fn new(
        element: Element,
        name: String,
        kind: AttributeKind,
        strings: Option<Vec<String>>,
        event_context: Option<JsValue>,
    ) -> Self {
        let slots = strings.as_ref().map_or(1, |s| s.len() - 1);
        AttributePart {
            element,
            name,
            kind,
            strings,
            last_values: vec![None; slots],
            last_rendered: None,
            event_context,
        }
    }

    pub fn commit(&mut self, values: &[Value]) {
        if self.strings.is_some() {
            self.commit_interpolated(values);
        } else {
            self.commit_single(&values[0]);
        }
    }

    fn commit_single(&mut self, value: &Value) {
        if matches!(value, Value::NoChange) {
            return;
        }
        if matches!(value, Value::Nothing) {
            if !matches!(self.last_values[0], Some(Value::Nothing)) {
                self.remove();
                self.last_values[0] = Some(Value::Nothing);
            }
            return;
        }
        if value.is_primitive() && self.last_values[0].as_ref() == Some(value) {
            return;
        }
        self.last_values[0] = Some(value.clone());
        self.write_value(value);
    }

    fn commit_interpolated(&mut self, values: &[Value]) {
        let mut any_nothing = false;
        for (slot, value) in self.last_values.iter_mut().zip(values) {
            if matches!(value, Value::Nothing) {
                any_nothing = true;
            }
            if !matches!(value, Value::NoChange) {
                *slot = Some(value.clone());
            }
        }
        if any_nothing {
            if self.last_rendered.is_some() {
                self.remove();
            }
            return;
        }
        let rendered = self.render_concat();
        if self.last_rendered.as_deref() == Some(rendered.as_str()) {
            return;
        }
        self.write_text(&rendered);
        self.last_rendered = Some(rendered);
    }

    fn render_concat(&self) -> String {
        let statics = self.strings.as_ref().unwrap_throw();
        let mut out = String::new();
        for (i, s) in statics.iter().enumerate() {
            out.push_str(s);
            if let Some(Some(v)) = self.last_values.get(i) {
                out.push_str(&v.to_text());
            }
        }
        out
    }

    fn write_value(&self, value: &Value) {
        match self.kind {
            AttributeKind::Attr => {
                self.element
                    .set_attribute(&self.name, &value.to_text())
                    .unwrap_throw();
            }
            AttributeKind::Property => {
                js_sys::Reflect::set(
                    &self.element,
                    &JsValue::from_str(&self.name),
                    &value_to_js(value),
                )
                .unwrap_throw();
            }
            AttributeKind::Boolean => self.write_boolean(is_truthy(value)),
            AttributeKind::Event => unreachable!("event parts are never constructed"),
        }
    }

    fn write_text(&self, text: &str) {
        match self.kind {
            AttributeKind::Attr => {
                self.element.set_attribute(&self.name, text).unwrap_throw();
            }
            AttributeKind::Property => {
                js_sys::Reflect::set(
                    &self.element,
                    &JsValue::from_str(&self.name),
                    &JsValue::from_str(text),
                )
                .unwrap_throw();
            }
            AttributeKind::Boolean => self.write_boolean(!text.is_empty()),
            AttributeKind::Event => unreachable!("event parts are never constructed"),
        }
    }

    fn write_boolean(&self, present: bool) {
        if present {
            self.element.set_attribute(&self.name, "").unwrap_throw();
        } else {
            let _ = self.element.remove_attribute(&self.name);
        }
    }

    fn remove(&mut self) {
        match self.kind {
            AttributeKind::Property => {
                let _ = js_sys::Reflect::set(
                    &self.element,
                    &JsValue::from_str(&self.name),
                    &JsValue::UNDEFINED,
                );
            }
            AttributeKind::Attr | AttributeKind::Boolean => {
                let _ = self.element.remove_attribute(&self.name);
            }
            AttributeKind::Event => unreachable!("event parts are never constructed"),
        }
        self.last_rendered = None;
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null | Value::Nothing => false,
        Value::Bool(b) => *b,
        Value::Number(n) => *n != 0.0 && !n.is_nan(),
        Value::Text(s) => !s.is_empty(),
        Value::Node(_) | Value::Template(_) => true,
        Value::NoChange => unreachable!("noChange is filtered out before reaching here"),
    }
}

fn value_to_js(value: &Value) -> JsValue {
    match value {
        Value::Null => JsValue::NULL,
        Value::Bool(b) => JsValue::from_bool(*b),
        Value::Number(n) => JsValue::from_f64(*n),
        Value::Text(s) => JsValue::from_str(s),
        Value::Node(n) => n.clone().into(),
        Value::Template(_) => JsValue::UNDEFINED,
        Value::Nothing | Value::NoChange => {
            unreachable!("sentinels are handled before reaching the property write")
        }
    }
}
