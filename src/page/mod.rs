//! Page module - the named surfaces, controls and elements the units attach to.
//!
//! Lookups return `Option`; callers decide whether absence is an error.

mod tooltips;

pub use tooltips::{init_tooltips, EguiTooltips, TooltipWidget};

use crate::config::DashboardConfig;
use crate::upload::UploadGuard;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Attribute and value marking an element as a tooltip trigger.
pub const TOOLTIP_ATTRIBUTE: &str = "data-bs-toggle";
pub const TOOLTIP_VALUE: &str = "tooltip";

/// A named drawing region a chart attaches to.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    pub name: String,
    pub width: u32,
    pub height: u32,
}

impl Surface {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }
}

/// The file the user picked.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub path: Option<PathBuf>,
}

impl SelectedFile {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Self {
            name,
            path: Some(path.to_path_buf()),
        }
    }
}

/// A file-input control. Holds at most the current selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileInput {
    pub name: String,
    files: Vec<SelectedFile>,
}

impl FileInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: Vec::new(),
        }
    }

    /// Replace the selection; `None` models a cancelled picker.
    pub fn select(&mut self, file: Option<SelectedFile>) {
        self.files = file.into_iter().collect();
    }

    pub fn first_file(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Any other page element, identified by id and carrying attributes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub id: String,
    pub attributes: BTreeMap<String, String>,
    /// Text shown by an activated tooltip.
    pub title: String,
}

impl Element {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Shorthand for an element marked as a tooltip trigger.
    pub fn with_tooltip(self, title: impl Into<String>) -> Self {
        let mut element = self.with_attribute(TOOLTIP_ATTRIBUTE, TOOLTIP_VALUE);
        element.title = title.into();
        element
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    surfaces: Vec<Surface>,
    file_inputs: Vec<FileInput>,
    elements: Vec<Element>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// The dashboard page: both chart surfaces, the upload control and the
    /// given tooltip-bearing elements.
    pub fn dashboard(config: &DashboardConfig, elements: Vec<Element>) -> Self {
        let charts = &config.charts;
        let mut page = Self::new()
            .with_surface(Surface::new(
                &charts.vulnerability_surface,
                charts.width,
                charts.height,
            ))
            .with_surface(Surface::new(&charts.risk_surface, charts.width, charts.height))
            .with_file_input(FileInput::new(&config.upload.input_name));
        page.elements = elements;
        page
    }

    pub fn with_surface(mut self, surface: Surface) -> Self {
        self.surfaces.push(surface);
        self
    }

    pub fn with_file_input(mut self, input: FileInput) -> Self {
        self.file_inputs.push(input);
        self
    }

    #[cfg(test)]
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    pub fn surface(&self, name: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.name == name)
    }

    pub fn file_input(&self, name: &str) -> Option<&FileInput> {
        self.file_inputs.iter().find(|f| f.name == name)
    }

    pub fn file_input_mut(&mut self, name: &str) -> Option<&mut FileInput> {
        self.file_inputs.iter_mut().find(|f| f.name == name)
    }

    /// Elements whose `key` attribute equals `value`.
    pub fn elements_with(&self, key: &str, value: &str) -> impl Iterator<Item = &Element> {
        let (key, value) = (key.to_string(), value.to_string());
        self.elements
            .iter()
            .filter(move |e| e.attribute(&key) == Some(value.as_str()))
    }
}

/// Result of the page-ready hook.
pub struct Ready {
    pub guard: Option<UploadGuard>,
    pub tooltips: usize,
}

/// Page-ready hook: install the upload guard and activate tooltips.
pub fn on_ready(page: &Page, config: &DashboardConfig, widget: &mut dyn TooltipWidget) -> Ready {
    let guard = UploadGuard::install(page, &config.upload);
    let tooltips = init_tooltips(page, widget);
    log::debug!(
        "Page ready: upload guard {}, {} tooltips",
        if guard.is_some() { "installed" } else { "skipped" },
        tooltips
    );
    Ready { guard, tooltips }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookups_return_none_when_absent() {
        let page = Page::new().with_surface(Surface::new("riesgosChart", 10, 10));
        assert!(page.surface("riesgosChart").is_some());
        assert!(page.surface("vulnerabilidadesChart").is_none());
        assert!(page.file_input("archivo").is_none());
    }

    #[test]
    fn dashboard_page_has_configured_hooks() {
        let config = DashboardConfig::default();
        let page = Page::dashboard(&config, vec![Element::new("help").with_tooltip("Ayuda")]);
        assert_eq!(page.surface("vulnerabilidadesChart").map(|s| s.width), Some(800));
        assert!(page.surface("riesgosChart").is_some());
        assert!(page.file_input("archivo").is_some());
        assert_eq!(page.elements_with(TOOLTIP_ATTRIBUTE, TOOLTIP_VALUE).count(), 1);
    }

    #[test]
    fn cancelled_selection_leaves_input_empty() {
        let mut input = FileInput::new("archivo");
        input.select(Some(SelectedFile::named("scan.txt")));
        assert_eq!(input.first_file().map(|f| f.name.as_str()), Some("scan.txt"));
        input.select(None);
        assert!(input.is_empty());
    }

    #[test]
    fn selected_file_name_comes_from_path() {
        let file = SelectedFile::from_path(Path::new("/tmp/reports/Scan.TXT"));
        assert_eq!(file.name, "Scan.TXT");
    }

    #[test]
    fn on_ready_skips_missing_upload_control() {
        let config = DashboardConfig::default();
        let page = Page::new().with_element(Element::new("a").with_tooltip("x"));
        let mut widget = EguiTooltips::new();

        let ready = on_ready(&page, &config, &mut widget);
        assert!(ready.guard.is_none());
        assert_eq!(ready.tooltips, 1);
    }

    #[test]
    fn on_ready_installs_guard_when_control_present() {
        let config = DashboardConfig::default();
        let page = Page::dashboard(&config, Vec::new());
        let mut widget = EguiTooltips::new();

        let ready = on_ready(&page, &config, &mut widget);
        assert!(ready.guard.is_some());
        assert_eq!(ready.tooltips, 0);
    }
}
