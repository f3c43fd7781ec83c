//! Vulnboard Main Application
//! Main window with control panel and chart viewer.

use crate::charts::{render_charts, ImageFormat, PlottersClient, RenderError};
use crate::config::DashboardConfig;
use crate::data::{DashboardData, DataLoader};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::page::{on_ready, EguiTooltips, Page, SelectedFile};
use crate::upload::{DialogAlerter, GuardOutcome, UploadGuard};
use egui::SidePanel;
use std::path::Path;

/// Main application window.
pub struct DashboardApp {
    config: DashboardConfig,
    page: Page,
    guard: Option<UploadGuard>,
    tooltips: EguiTooltips,
    alerter: DialogAlerter,
    loader: DataLoader,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: DashboardConfig,
        data_path: Option<&Path>,
    ) -> Self {
        let elements = ControlPanel::tooltip_elements(&config.upload.allowed_extension);
        let page = Page::dashboard(&config, elements);
        let mut tooltips = EguiTooltips::new();
        let ready = on_ready(&page, &config, &mut tooltips);
        log::info!("Dashboard ready with {} tooltips", ready.tooltips);

        let mut app = Self {
            config,
            page,
            guard: ready.guard,
            tooltips,
            alerter: DialogAlerter::default(),
            loader: DataLoader::new(),
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
        };
        if let Some(path) = data_path {
            app.load_data(path);
        }
        app
    }

    fn load_data(&mut self, path: &Path) {
        let data = match self.loader.load_json(path) {
            Ok(data) => data.clone(),
            Err(e) => {
                log::error!("{}", e);
                self.chart_viewer.clear();
                self.control_panel.export_enabled = false;
                self.control_panel.set_status(&format!("Error: {}", e));
                return;
            }
        };

        match self.render(&data) {
            Ok(()) => {
                self.control_panel.data_path = self.loader.get_file_path().cloned();
                self.control_panel.export_enabled = !self.chart_viewer.is_empty();
                self.control_panel.set_status(&format!(
                    "{} tipos de vulnerabilidad ({} hallazgos), {} niveles de riesgo",
                    data.vulnerabilities.len(),
                    data.vulnerabilities.total(),
                    data.risks.len()
                ));
            }
            Err(e) => {
                log::error!("{}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }

    fn render(&mut self, data: &DashboardData) -> Result<(), RenderError> {
        render_charts(
            &self.config.charts,
            &self.page,
            &mut self.chart_viewer,
            &data.vulnerabilities,
            &data.risks,
        )
    }

    fn handle_browse_data(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .pick_file()
        {
            self.load_data(&path);
        }
    }

    /// Pick a report and run the upload guard on the selection.
    fn handle_pick_upload(&mut self) {
        let picked = rfd::FileDialog::new().pick_file();
        let Some(input) = self.page.file_input_mut(&self.config.upload.input_name) else {
            return;
        };
        input.select(picked.as_deref().map(SelectedFile::from_path));

        let outcome = match self.guard.as_mut() {
            Some(guard) => {
                let outcome = guard.on_page_change(&mut self.page, &mut self.alerter);
                log::debug!("Upload guard {:?} after {:?}", guard.state(), outcome);
                outcome
            }
            None => GuardOutcome::NoFile,
        };

        match outcome {
            GuardOutcome::Accepted(name) => {
                self.control_panel.set_status(&format!("Archivo listo: {}", name));
                self.control_panel.upload_name = Some(name);
            }
            GuardOutcome::Rejected(_) => {
                self.control_panel.upload_name = None;
                self.control_panel.set_status("Archivo rechazado");
            }
            GuardOutcome::NoFile => {
                self.control_panel.upload_name = self
                    .page
                    .file_input(&self.config.upload.input_name)
                    .and_then(|i| i.first_file())
                    .map(|f| f.name.clone());
            }
        }
    }

    /// Render both charts to PNG files in a chosen folder.
    fn handle_export(&mut self) {
        let data = match self.loader.get_data() {
            Some(data) if !self.chart_viewer.is_empty() => data.clone(),
            _ => {
                self.control_panel.set_status("No hay gráficos para exportar");
                return;
            }
        };
        let Some(dir) = rfd::FileDialog::new().pick_folder() else {
            return;
        };

        let mut client = PlottersClient::new(&dir, ImageFormat::Png);
        match render_charts(
            &self.config.charts,
            &self.page,
            &mut client,
            &data.vulnerabilities,
            &data.risks,
        ) {
            Ok(()) => {
                self.control_panel.set_status(&format!(
                    "{} gráficos exportados en {}",
                    client.written().len(),
                    dir.display()
                ));
                if let Err(e) = open::that(&dir) {
                    log::warn!("Could not open {}: {}", dir.display(), e);
                }
            }
            Err(e) => {
                log::error!("Export failed: {}", e);
                self.control_panel.set_status(&format!("Error: {}", e));
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui, &self.tooltips) {
                        ControlPanelAction::BrowseData => self.handle_browse_data(),
                        ControlPanelAction::PickUpload => self.handle_pick_upload(),
                        ControlPanelAction::ExportCharts => self.handle_export(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}
