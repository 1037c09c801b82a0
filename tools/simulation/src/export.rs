//! Metrics and report export
//!
//! Serializes SimMetrics and session reports to JSON for external consumption.

use crate::metrics::SimMetrics;
use crate::runner::SessionReport;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Combined export containing all simulation outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationExport {
    pub version: String,
    pub player: String,
    pub seed: Option<u64>,
    pub metrics: SimMetrics,
    pub sessions: Vec<SessionReport>,
}

/// Build a complete simulation export.
pub fn build_export(
    player: &str,
    seed: Option<u64>,
    metrics: &SimMetrics,
    sessions: &[SessionReport],
) -> SimulationExport {
    SimulationExport {
        version: crate::VERSION.to_string(),
        player: player.to_string(),
        seed,
        metrics: metrics.clone(),
        sessions: sessions.to_vec(),
    }
}

/// Export complete simulation data as JSON.
pub fn export_json(export: &SimulationExport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(export)
}

/// Write export to a file path.
pub fn write_to_file(export: &SimulationExport, path: impl AsRef<Path>) -> std::io::Result<()> {
    let json = export_json(export)?;
    std::fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bots::perfect_memory::PerfectMemoryPlayer;
    use crate::runner::{run_sessions, RunnerConfig};
    use game_core::{Arcade, ArcadeConfig};
    use tempfile::TempDir;

    #[test]
    fn test_build_export() {
        let metrics = SimMetrics::new();
        let export = build_export("perfect_memory", Some(1), &metrics, &[]);
        assert_eq!(export.version, crate::VERSION);
        assert!(export.sessions.is_empty());
    }

    #[test]
    fn test_export_after_play() {
        let mut arcade = Arcade::new(ArcadeConfig {
            seed: Some(12),
            ..Default::default()
        })
        .unwrap();
        let mut player = PerfectMemoryPlayer::new();
        let (reports, metrics) =
            run_sessions(&mut arcade, &mut player, &RunnerConfig::default(), 3);

        let export = build_export("perfect_memory", Some(12), &metrics, &reports);
        let json = export_json(&export).unwrap();
        let parsed: SimulationExport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.sessions, reports);
        assert_eq!(parsed.metrics, metrics);
        assert!(json.contains("\"player\": \"perfect_memory\""));
    }

    #[test]
    fn test_write_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");
        let mut metrics = SimMetrics::new();
        metrics.total_tries = 12;
        let export = build_export("random_clicker", None, &metrics, &[]);

        write_to_file(&export, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: SimulationExport = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed.metrics.total_tries, 12);
        assert_eq!(parsed.player, "random_clicker");
    }

    #[test]
    fn test_write_to_missing_dir_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("export.json");
        let export = build_export("random_clicker", None, &SimMetrics::new(), &[]);
        assert!(write_to_file(&export, &path).is_err());
    }
}
