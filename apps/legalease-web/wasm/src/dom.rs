//! DOM helpers: element lookup, view materialization and term tooltips

use legal_view::{render_tooltip, ViewNode, LEGAL_TERM_CLASS, TOOLTIP_CLASS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, File, FileList, Node};

use crate::error::AppError;

/// Look up `#id` and cast it to the expected element type
pub fn element_by_id<T: JsCast>(
    document: &Document,
    id: &str,
    expected: &'static str,
) -> Result<T, AppError> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| AppError::MissingElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_| AppError::WrongElementType {
            id: id.to_string(),
            expected,
        })
}

/// Build real DOM nodes for a view tree.
///
/// Text is inserted as text nodes, so strings from the backend are never
/// parsed as HTML.
pub fn materialize(document: &Document, node: &ViewNode) -> Result<Node, JsValue> {
    match node {
        ViewNode::Text(text) => Ok(document.create_text_node(text).into()),
        ViewNode::Element(elem) => {
            let element = document.create_element(elem.tag)?;
            if !elem.class.is_empty() {
                element.set_class_name(&elem.class);
            }
            for (name, value) in &elem.attrs {
                element.set_attribute(name, value)?;
            }
            for child in &elem.children {
                element.append_child(&materialize(document, child)?)?;
            }
            Ok(element.into())
        }
    }
}

/// Replace all children of `container` with the materialized view
pub fn replace_children(
    document: &Document,
    container: &Element,
    view: &ViewNode,
) -> Result<(), JsValue> {
    container.set_text_content(None);
    container.append_child(&materialize(document, view)?)?;
    Ok(())
}

/// Files of an `<input type=file>` or a drop's `DataTransfer`, in order
pub fn files_of(list: Option<FileList>) -> Vec<File> {
    match list {
        Some(list) => (0..list.length()).filter_map(|i| list.item(i)).collect(),
        None => Vec::new(),
    }
}

/// The legal term under an event target, if any
pub fn term_at(target: Option<web_sys::EventTarget>) -> Option<Element> {
    let element = target?.dyn_into::<Element>().ok()?;
    element
        .closest(&format!(".{}", LEGAL_TERM_CLASS))
        .ok()
        .flatten()
}

/// Show a term's tooltip, creating it from the `title` on first hover
pub fn show_tooltip(document: &Document, term: &Element) -> Result<(), JsValue> {
    let selector = format!(".{}", TOOLTIP_CLASS);
    let tooltip = match term.query_selector(&selector)? {
        Some(existing) => existing,
        None => {
            let definition = term.get_attribute("title").unwrap_or_default();
            let node = materialize(document, &render_tooltip(&definition))?;
            term.append_child(&node)?;
            // Drop the native tooltip so only ours shows
            term.remove_attribute("title")?;
            node.dyn_into::<Element>().map_err(JsValue::from)?
        }
    };

    let classes = tooltip.class_list();
    classes.remove_1("opacity-0")?;
    classes.add_1("opacity-100")
}

pub fn hide_tooltip(term: &Element) -> Result<(), JsValue> {
    if let Some(tooltip) = term.query_selector(&format!(".{}", TOOLTIP_CLASS))? {
        let classes = tooltip.class_list();
        classes.remove_1("opacity-100")?;
        classes.add_1("opacity-0")?;
    }
    Ok(())
}
