use serde::{Deserialize, Serialize};

/// Process-wide scheduler configuration. The local timezone is fixed at
/// startup and used for every calendar computation; only the persistence
/// boundary converts to/from UTC instants (spec §9).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// IANA timezone name used for all calendar arithmetic.
    pub local_timezone: String,

    /// How many calendar days `Calendar::iterate_working_windows` will scan
    /// before giving up and reporting `PlannerIssue::HorizonExhausted`.
    pub horizon_days: i64,

    /// Case-insensitive name fragments marking a production stage as
    /// informational-only (never scheduled). Defaults to the spec's
    /// PROOF / DTP / Batch Allocation set; deployments may extend it.
    pub non_schedulable_name_fragments: Vec<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            local_timezone: "Africa/Johannesburg".to_string(),
            horizon_days: 365,
            non_schedulable_name_fragments: crate::NON_SCHEDULABLE_NAME_FRAGMENTS
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
        }
    }
}

impl SchedulerConfig {
    /// Parses a `SchedulerConfig` from TOML text, falling back to defaults
    /// for any field left unspecified.
    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn is_non_schedulable(&self, stage_name: &str) -> bool {
        let lower = stage_name.to_lowercase();
        self.non_schedulable_name_fragments
            .iter()
            .any(|fragment| lower.contains(&fragment.to_lowercase()))
    }
}
