//! Turning poll results into report lines

use taskcluster_cli_common::{HealthStatus, ReportMode};

/// One line of the status report
#[derive(Debug, Clone, PartialEq)]
pub enum ReportLine {
    Alive { service: String, uptime_seconds: f64 },
    Down { service: String },
}

impl ReportLine {
    pub fn service(&self) -> &str {
        match self {
            ReportLine::Alive { service, .. } | ReportLine::Down { service } => service,
        }
    }

    pub fn is_alive(&self) -> bool {
        matches!(self, ReportLine::Alive { .. })
    }
}

/// Build the report for `statuses`, keeping their order.
///
/// In [`ReportMode::SilentDown`] services answering `alive: false` produce no
/// line at all, which is how the status command historically behaved.
pub fn build_report(statuses: &[(String, HealthStatus)], mode: ReportMode) -> Vec<ReportLine> {
    statuses
        .iter()
        .filter_map(|(service, status)| match (status.alive, mode) {
            (true, _) => Some(ReportLine::Alive {
                service: service.clone(),
                uptime_seconds: status.uptime_seconds,
            }),
            (false, ReportMode::Explicit) => Some(ReportLine::Down {
                service: service.clone(),
            }),
            (false, ReportMode::SilentDown) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses() -> Vec<(String, HealthStatus)> {
        vec![
            (
                "queue".to_string(),
                HealthStatus {
                    alive: true,
                    uptime_seconds: 12.5,
                },
            ),
            (
                "auth".to_string(),
                HealthStatus {
                    alive: false,
                    uptime_seconds: 0.0,
                },
            ),
        ]
    }

    #[test]
    fn test_explicit_mode_reports_down() {
        let report = build_report(&statuses(), ReportMode::Explicit);
        assert_eq!(report.len(), 2);
        assert!(report[0].is_alive());
        assert_eq!(
            report[1],
            ReportLine::Down {
                service: "auth".to_string()
            }
        );
    }

    #[test]
    fn test_silent_down_mode_reports_nothing_for_dead_service() {
        let report = build_report(&statuses(), ReportMode::SilentDown);
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].service(), "queue");
    }
}
