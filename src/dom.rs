// browser surface: one <div> per output line inside the output element
use crate::output::LineClass;
use crate::render::Segment;
use crate::surface::Surface;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, HtmlInputElement};

pub struct DomSurface {
    document: Document,
    input: HtmlInputElement,
    output: HtmlElement,
}

fn warn(msg: &str, err: &JsValue) {
    web_sys::console::warn_2(&format!("[console] {}", msg).into(), err);
}

impl DomSurface {
    /// Looks up the input field and the output region by element id.
    pub fn from_ids(input_id: &str, output_id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let input = document
            .get_element_by_id(input_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", input_id)))?
            .dyn_into::<HtmlInputElement>()
            .map_err(|_| JsValue::from_str(&format!("#{} is not an <input>", input_id)))?;
        let output = document
            .get_element_by_id(output_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", output_id)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str(&format!("#{} is not an html element", output_id)))?;
        Ok(Self { document, input, output })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// true when `target` is the input field itself
    pub fn is_input(&self, target: Option<&EventTarget>) -> bool {
        let input: &EventTarget = self.input.as_ref();
        target.map_or(false, |t| t == input)
    }

    fn last_line(&self) -> Option<Element> {
        self.output.last_element_child()
    }

    fn link(&self, url: &str) -> Result<Element, JsValue> {
        let anchor = self.document.create_element("a")?;
        anchor.set_attribute("href", url)?;
        anchor.set_attribute("target", "_blank")?;
        anchor.set_text_content(Some(url));
        Ok(anchor)
    }

    fn fill_segments(&self, line: &Element, segments: &[Segment]) -> Result<(), JsValue> {
        line.set_text_content(None);
        for segment in segments {
            match segment {
                Segment::Text(text) => {
                    line.append_child(&self.document.create_text_node(text))?;
                }
                Segment::Link(url) => {
                    line.append_child(&self.link(url)?)?;
                }
            }
        }
        Ok(())
    }
}

impl Surface for DomSurface {
    fn set_input_enabled(&mut self, enabled: bool) {
        self.input.set_disabled(!enabled);
    }

    fn focus_input(&mut self) {
        if let Err(e) = self.input.focus() {
            warn("focus failed", &e);
        }
    }

    fn input_value(&self) -> String {
        self.input.value()
    }

    fn set_input_value(&mut self, value: &str) {
        self.input.set_value(value);
    }

    fn clear(&mut self) {
        self.output.set_inner_html("");
    }

    fn append_line(&mut self, class: LineClass, text: &str) {
        let appended = self.document.create_element("div").and_then(|div| {
            div.set_class_name(class.css_class());
            div.set_text_content(Some(text));
            self.output.append_child(&div)
        });
        if let Err(e) = appended {
            warn("could not append line", &e);
        }
    }

    fn push_char(&mut self, ch: char) {
        if let Some(line) = self.last_line() {
            let mut text = line.text_content().unwrap_or_default();
            text.push(ch);
            line.set_text_content(Some(&text));
        }
    }

    fn seal_line(&mut self, segments: &[Segment]) {
        if !segments.iter().any(|s| matches!(s, Segment::Link(_))) {
            return;
        }
        if let Some(line) = self.last_line() {
            if let Err(e) = self.fill_segments(&line, segments) {
                warn("could not linkify line", &e);
            }
        }
    }

    fn remove_last_line(&mut self) {
        if let Some(line) = self.last_line() {
            line.remove();
        }
    }

    fn scroll_to_end(&mut self) {
        // covers an output box with its own overflow as well as a plain page
        self.output.set_scroll_top(self.output.scroll_height());
        if let (Some(window), Some(body)) = (web_sys::window(), self.document.body()) {
            window.scroll_to_with_x_and_y(0.0, f64::from(body.scroll_height()));
        }
    }
}
