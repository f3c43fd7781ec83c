//! Chart Renderer
//! Draws the vulnerability-type bar chart and the risk-level doughnut onto
//! their page surfaces through an injected chart client.

use crate::charts::{ChartClient, ChartConfig, ClientError};
use crate::config::ChartsConfig;
use crate::data::CategoryCounts;
use crate::page::{Page, Surface};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Chart surface '{0}' not found on page")]
    MissingSurface(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub struct ChartRenderer<'a> {
    config: &'a ChartsConfig,
}

impl<'a> ChartRenderer<'a> {
    pub fn new(config: &'a ChartsConfig) -> Self {
        Self { config }
    }

    /// Render both charts. Both surfaces are resolved before anything is drawn.
    pub fn render_charts(
        &self,
        page: &Page,
        client: &mut dyn ChartClient,
        vulnerability_counts: &CategoryCounts,
        risk_counts: &CategoryCounts,
    ) -> Result<(), RenderError> {
        let vuln_surface = self.surface(page, &self.config.vulnerability_surface)?;
        let risk_surface = self.surface(page, &self.config.risk_surface)?;

        let bar = ChartConfig::bar(vulnerability_counts, &self.config.bar_dataset_label);
        client.draw(vuln_surface, &bar)?;

        let doughnut = ChartConfig::doughnut(risk_counts);
        client.draw(risk_surface, &doughnut)?;

        log::info!(
            "Rendered {} vulnerability types on '{}' and {} risk levels on '{}'",
            vulnerability_counts.len(),
            vuln_surface.name,
            risk_counts.len(),
            risk_surface.name
        );
        Ok(())
    }

    fn surface<'p>(&self, page: &'p Page, name: &str) -> Result<&'p Surface, RenderError> {
        page.surface(name)
            .ok_or_else(|| RenderError::MissingSurface(name.to_string()))
    }
}

/// Render with the given chart settings.
pub fn render_charts(
    config: &ChartsConfig,
    page: &Page,
    client: &mut dyn ChartClient,
    vulnerability_counts: &CategoryCounts,
    risk_counts: &CategoryCounts,
) -> Result<(), RenderError> {
    ChartRenderer::new(config).render_charts(page, client, vulnerability_counts, risk_counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{ChartKind, LegendPosition};
    use crate::config::DashboardConfig;

    /// Records every draw call instead of rendering.
    #[derive(Default)]
    struct RecordingClient {
        drawn: Vec<(String, ChartConfig)>,
        fail_on: Option<String>,
    }

    impl ChartClient for RecordingClient {
        fn draw(&mut self, surface: &Surface, config: &ChartConfig) -> Result<(), ClientError> {
            if self.fail_on.as_deref() == Some(surface.name.as_str()) {
                return Err(ClientError::Draw {
                    surface: surface.name.clone(),
                    message: "backend unavailable".to_string(),
                });
            }
            self.drawn.push((surface.name.clone(), config.clone()));
            Ok(())
        }
    }

    fn counts(pairs: &[(&str, u64)]) -> CategoryCounts {
        pairs.iter().map(|&(l, c)| (l, c)).collect()
    }

    fn dashboard() -> (DashboardConfig, Page) {
        crate::logging::initialize_for_tests();
        let config = DashboardConfig::default();
        let page = Page::dashboard(&config, Vec::new());
        (config, page)
    }

    #[test]
    fn bar_chart_scenario() {
        let (config, page) = dashboard();
        let mut client = RecordingClient::default();

        render_charts(
            &config.charts,
            &page,
            &mut client,
            &counts(&[("SQLi", 3), ("XSS", 5)]),
            &counts(&[("Alto", 1)]),
        )
        .unwrap();

        let (surface, bar) = &client.drawn[0];
        assert_eq!(surface, "vulnerabilidadesChart");
        assert_eq!(bar.kind, ChartKind::Bar);
        assert_eq!(bar.labels, vec!["SQLi", "XSS"]);
        assert_eq!(bar.primary().unwrap().values, vec![3, 5]);
        let axis = bar.y_axis.as_ref().unwrap();
        assert!(axis.begin_at_zero);
        assert_eq!(axis.step_size, Some(1));
    }

    #[test]
    fn doughnut_scenario() {
        let (config, page) = dashboard();
        let mut client = RecordingClient::default();

        render_charts(
            &config.charts,
            &page,
            &mut client,
            &counts(&[("SQLi", 3)]),
            &counts(&[("Alto", 2), ("Medio", 4), ("Bajo", 1)]),
        )
        .unwrap();

        let (surface, ring) = &client.drawn[1];
        assert_eq!(surface, "riesgosChart");
        assert_eq!(ring.kind, ChartKind::Doughnut);
        assert_eq!(ring.labels, vec!["Alto", "Medio", "Bajo"]);
        assert_eq!(ring.primary().unwrap().values, vec![2, 4, 1]);
        assert_eq!(ring.legend, LegendPosition::Bottom);
    }

    #[test]
    fn empty_mappings_still_render() {
        let (config, page) = dashboard();
        let mut client = RecordingClient::default();

        render_charts(
            &config.charts,
            &page,
            &mut client,
            &CategoryCounts::new(),
            &CategoryCounts::new(),
        )
        .unwrap();

        assert_eq!(client.drawn.len(), 2);
        assert!(client.drawn.iter().all(|(_, c)| c.labels.is_empty()));
    }

    #[test]
    fn missing_surface_fails_before_drawing() {
        let config = DashboardConfig::default();
        let page = Page::new().with_surface(Surface::new("vulnerabilidadesChart", 10, 10));
        let mut client = RecordingClient::default();

        let err = render_charts(
            &config.charts,
            &page,
            &mut client,
            &counts(&[("SQLi", 3)]),
            &counts(&[("Alto", 2)]),
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::MissingSurface(ref name) if name == "riesgosChart"));
        assert!(client.drawn.is_empty());
    }

    #[test]
    fn client_errors_propagate() {
        let (config, page) = dashboard();
        let mut client = RecordingClient {
            fail_on: Some("riesgosChart".to_string()),
            ..Default::default()
        };

        let err = render_charts(
            &config.charts,
            &page,
            &mut client,
            &counts(&[("SQLi", 3)]),
            &counts(&[("Alto", 2)]),
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::Client(ClientError::Draw { .. })));
    }
}
