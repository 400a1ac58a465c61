//! Output formatter trait

use pathfinder_domain::ConsensusDashboard;

/// Trait for formatting consensus dashboards
pub trait OutputFormatter {
    /// Format the complete dashboard
    fn format(&self, dashboard: &ConsensusDashboard) -> String;

    /// Format as JSON
    fn format_json(&self, dashboard: &ConsensusDashboard) -> String;

    /// Format score, conflicts and next steps only (concise output)
    fn format_summary(&self, dashboard: &ConsensusDashboard) -> String;

    /// Format in the requested style
    fn render(&self, dashboard: &ConsensusDashboard, format: pathfinder_domain::OutputFormat) -> String {
        match format {
            pathfinder_domain::OutputFormat::Full => self.format(dashboard),
            pathfinder_domain::OutputFormat::Summary => self.format_summary(dashboard),
            pathfinder_domain::OutputFormat::Json => self.format_json(dashboard),
        }
    }
}
