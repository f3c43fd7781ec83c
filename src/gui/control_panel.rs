//! Control Panel Widget
//! Left side panel with the data source, the report upload control and export.

use crate::page::{Element, EguiTooltips};
use egui::{Color32, RichText};
use std::path::PathBuf;

pub const DATA_HELP_ID: &str = "data-help";
pub const UPLOAD_HELP_ID: &str = "archivo-help";
pub const EXPORT_HELP_ID: &str = "export-help";

/// Left side control panel.
pub struct ControlPanel {
    pub data_path: Option<PathBuf>,
    pub upload_name: Option<String>,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            data_path: None,
            upload_name: None,
            status: "Listo".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements of this panel that carry a tooltip.
    pub fn tooltip_elements(allowed_extension: &str) -> Vec<Element> {
        vec![
            Element::new(DATA_HELP_ID)
                .with_tooltip("Archivo JSON con los conteos de vulnerabilidades y riesgos"),
            Element::new(UPLOAD_HELP_ID).with_tooltip(format!(
                "Solo se aceptan archivos de texto ({})",
                allowed_extension
            )),
            Element::new(EXPORT_HELP_ID)
                .with_tooltip("Guarda ambos gráficos como imágenes PNG en una carpeta"),
        ]
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, tooltips: &EguiTooltips) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🛡 Vulnboard")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Section =====
        ui.label(RichText::new("📁 Datos").size(14.0).strong());
        ui.add_space(5.0);
        Self::file_row(
            ui,
            self.data_path
                .as_ref()
                .and_then(|p| p.file_name())
                .map(|n| n.to_string_lossy().to_string()),
        );
        let button = tooltips.attach(DATA_HELP_ID, ui.button("📂 Abrir datos"));
        if button.clicked() {
            action = ControlPanelAction::BrowseData;
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Upload Section =====
        ui.label(RichText::new("📄 Informe de escaneo").size(14.0).strong());
        ui.add_space(5.0);
        Self::file_row(ui, self.upload_name.clone());
        let button = tooltips.attach(UPLOAD_HELP_ID, ui.button("Seleccionar archivo"));
        if button.clicked() {
            action = ControlPanelAction::PickUpload;
        }

        ui.add_space(10.0);
        ui.separator();

        // ===== Export Section =====
        ui.add_enabled_ui(self.export_enabled, |ui| {
            let button = egui::Button::new(RichText::new("🖼 Exportar gráficos").size(14.0))
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if tooltips.attach(EXPORT_HELP_ID, ui.add(button)).clicked() {
                action = ControlPanelAction::ExportCharts;
            }
        });

        ui.add_space(10.0);
        ui.label(RichText::new(&self.status).size(12.0).color(Color32::GRAY));

        action
    }

    fn file_row(ui: &mut egui::Ui, name: Option<String>) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                let color = if name.is_some() {
                    ui.visuals().strong_text_color()
                } else {
                    Color32::GRAY
                };
                let text = name.unwrap_or_else(|| "Ningún archivo seleccionado".to_string());
                ui.label(RichText::new(text).size(12.0).color(color));
            });
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPanelAction {
    None,
    BrowseData,
    PickUpload,
    ExportCharts,
}
