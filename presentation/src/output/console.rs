//! Console output formatter for consensus dashboards

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use pathfinder_domain::{
    ConflictSeverity, ConsensusDashboard, ConsensusLevel, FeedbackItem, ImpactLevel,
    PreferenceConflict, VotingItem, VotingStatus,
};

/// Formats dashboards, votes and feedback for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete dashboard
    pub fn format(dashboard: &ConsensusDashboard) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Family Consensus Dashboard"));
        output.push('\n');
        output.push_str(&Self::overview(dashboard));

        // Family weights
        output.push_str(&Self::section_header("Family Weights"));
        for weight in &dashboard.family_weights {
            output.push_str(&format!(
                "  {:<24} {:>6.3}  ({} participants, {:.0}% of budget{})\n",
                weight.family_name.bold(),
                weight.total_weight(),
                weight.participant_count,
                weight.budget_contribution * 100.0,
                if weight.admin_bonus > 0.0 { ", organizer" } else { "" }
            ));
        }

        // Agreed preferences
        if !dashboard.agreed_preferences.is_empty() {
            output.push_str(&Self::section_header("Group Preferences"));
            for (category, value) in &dashboard.agreed_preferences {
                output.push_str(&format!("  {:<24} {}\n", category.cyan(), value));
            }
        }

        if !dashboard.agreement_areas.is_empty() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Already agreed:".green().bold(),
                dashboard.agreement_areas.join(", ")
            ));
        }

        // Conflicts
        if !dashboard.conflicts.is_empty() {
            output.push_str(&Self::section_header("Conflicts"));
            for conflict in &dashboard.conflicts {
                output.push_str(&Self::conflict_line(conflict));
                if let Some(compromise) = &conflict.suggested_compromise {
                    output.push_str(&format!("      {} {}\n", "->".dimmed(), compromise));
                }
            }
        }

        // Voting items
        if !dashboard.voting_items.is_empty() {
            output.push_str(&Self::section_header("Voting Items"));
            output.push_str(&Self::format_voting_items(&dashboard.voting_items));
        }

        output.push_str(&Self::next_steps(&dashboard.next_steps));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(dashboard: &ConsensusDashboard) -> String {
        serde_json::to_string_pretty(dashboard).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format score, conflicts and next steps only (concise output)
    pub fn format_summary(dashboard: &ConsensusDashboard) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== Family Consensus ===".cyan().bold()
        ));
        output.push_str(&Self::overview(dashboard));

        if !dashboard.conflicts.is_empty() {
            output.push('\n');
            for conflict in &dashboard.conflicts {
                output.push_str(&Self::conflict_line(conflict));
            }
        }

        output.push_str(&Self::next_steps(&dashboard.next_steps));
        output
    }

    /// One line per voting item with its question, options and votes
    pub fn format_voting_items(items: &[VotingItem]) -> String {
        let mut output = String::new();
        for item in items {
            output.push_str(&format!(
                "\n  {} {}\n",
                Self::status_label(item.status),
                item.question.bold()
            ));
            output.push_str(&format!(
                "      {} {}  (needs {:.0}%)\n",
                "id:".dimmed(),
                item.id,
                item.threshold * 100.0
            ));
            for option in &item.options {
                let votes = item.current_votes.values().filter(|c| *c == option).count();
                output.push_str(&format!("      - {} ({})\n", option, votes));
            }
            if !item.current_votes.is_empty() {
                output.push_str(&format!(
                    "      {} {}\n",
                    "votes:".dimmed(),
                    item.vote_summary()
                ));
            }
        }
        output
    }

    /// Impact analysis of a single feedback item
    pub fn format_feedback(item: &FeedbackItem) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Feedback Impact"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Feedback:".cyan().bold(), item.id));
        output.push_str(&format!("{} {}\n", "Trip:".cyan().bold(), item.trip_id));
        output.push_str(&format!("{} {}\n", "From:".cyan().bold(), item.user_id));
        if let Some(target) = &item.target_element {
            output.push_str(&format!("{} {}\n", "Element:".cyan().bold(), target));
        }
        output.push_str(&format!("\n  \"{}\"\n", item.content));

        output.push_str(&Self::section_header("Estimated Impact"));
        output.push_str(&format!(
            "  {:<12} {}\n",
            "Level:",
            Self::impact_label(item.impact.level)
        ));
        output.push_str(&format!(
            "  {:<12} {:+.2}\n",
            "Cost:", item.impact.estimated_cost_delta
        ));
        output.push_str(&format!(
            "  {:<12} +{} min\n",
            "Time:", item.impact.estimated_time_delta_minutes
        ));
        if !item.impact.affected_areas.is_empty() {
            output.push_str(&format!(
                "  {:<12} {}\n",
                "Affects:",
                item.impact.affected_areas.join(", ")
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    fn overview(dashboard: &ConsensusDashboard) -> String {
        let mut output = String::new();
        if let Some(trip_id) = &dashboard.trip_id {
            output.push_str(&format!("{} {}\n", "Trip:".cyan().bold(), trip_id));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Families:".cyan().bold(),
            dashboard.family_count
        ));
        output.push_str(&format!(
            "{} {:.2} ({})\n",
            "Consensus score:".cyan().bold(),
            dashboard.consensus_score,
            Self::level_label(dashboard.consensus_level)
        ));

        let buckets = &dashboard.conflicts_by_severity;
        if buckets.total() > 0 {
            output.push_str(&format!(
                "{} {} critical, {} high, {} medium, {} low\n",
                "Conflicts:".cyan().bold(),
                buckets.critical.len(),
                buckets.high.len(),
                buckets.medium.len(),
                buckets.low.len()
            ));
        }
        output
    }

    fn conflict_line(conflict: &PreferenceConflict) -> String {
        format!(
            "  {} {:<24} {}\n",
            Self::severity_label(conflict.severity),
            conflict.category,
            conflict.conflicting_values.join(" | ").dimmed()
        )
    }

    fn next_steps(steps: &[String]) -> String {
        if steps.is_empty() {
            return String::new();
        }
        let mut output = format!("\n{}\n", "Next Steps:".yellow().bold());
        for step in steps {
            output.push_str(&format!("  * {}\n", step));
        }
        output
    }

    fn severity_label(severity: ConflictSeverity) -> ColoredString {
        let label = format!("[{:^8}]", severity.as_str());
        match severity {
            ConflictSeverity::Critical => label.red().bold(),
            ConflictSeverity::High => label.red(),
            ConflictSeverity::Medium => label.yellow(),
            ConflictSeverity::Low => label.dimmed(),
        }
    }

    fn level_label(level: ConsensusLevel) -> ColoredString {
        let label = level.to_string();
        match level {
            ConsensusLevel::High => label.green().bold(),
            ConsensusLevel::Moderate => label.yellow(),
            ConsensusLevel::Low => label.red(),
        }
    }

    fn status_label(status: VotingStatus) -> ColoredString {
        let label = format!("[{}]", status);
        match status {
            VotingStatus::Approved => label.green(),
            VotingStatus::NeedsDiscussion => label.yellow(),
            VotingStatus::Rejected => label.red(),
            VotingStatus::Pending => label.dimmed(),
        }
    }

    fn impact_label(level: ImpactLevel) -> ColoredString {
        let label = level.to_string();
        match level {
            ImpactLevel::Critical => label.red().bold(),
            ImpactLevel::High => label.red(),
            ImpactLevel::Medium => label.yellow(),
            ImpactLevel::Low => label.green(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, dashboard: &ConsensusDashboard) -> String {
        Self::format(dashboard)
    }

    fn format_json(&self, dashboard: &ConsensusDashboard) -> String {
        Self::format_json(dashboard)
    }

    fn format_summary(&self, dashboard: &ConsensusDashboard) -> String {
        Self::format_summary(dashboard)
    }
}
