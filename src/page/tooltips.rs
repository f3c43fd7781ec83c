//! Tooltip initialization for every element marked as a tooltip trigger.

use super::{Element, Page, TOOLTIP_ATTRIBUTE, TOOLTIP_VALUE};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TooltipError {
    #[error("Element '{0}' cannot host a tooltip")]
    Unsupported(String),
}

/// The tooltip widget library. Activating an element twice must not fail.
pub trait TooltipWidget {
    fn activate(&mut self, element: &Element) -> Result<(), TooltipError>;
}

/// Activate a tooltip on every marked element. Returns how many were activated.
///
/// A widget refusing one element is logged and does not stop the others.
pub fn init_tooltips(page: &Page, widget: &mut dyn TooltipWidget) -> usize {
    let mut activated = 0;
    for element in page.elements_with(TOOLTIP_ATTRIBUTE, TOOLTIP_VALUE) {
        match widget.activate(element) {
            Ok(()) => activated += 1,
            Err(e) => log::warn!("Tooltip skipped: {}", e),
        }
    }
    activated
}

/// Hover texts for egui widgets, keyed by element id.
#[derive(Debug, Default, Clone)]
pub struct EguiTooltips {
    texts: HashMap<String, String>,
}

impl EguiTooltips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hover text for an activated element.
    pub fn text_for(&self, id: &str) -> Option<&str> {
        self.texts.get(id).map(String::as_str)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// Attach the element's hover text to a response, if activated.
    pub fn attach(&self, id: &str, response: egui::Response) -> egui::Response {
        match self.text_for(id) {
            Some(text) => response.on_hover_text(text),
            None => response,
        }
    }
}

impl TooltipWidget for EguiTooltips {
    fn activate(&mut self, element: &Element) -> Result<(), TooltipError> {
        if element.id.is_empty() {
            return Err(TooltipError::Unsupported(element.title.clone()));
        }
        self.texts.insert(element.id.clone(), element.title.clone());
        Ok(())
    }
}
