pub const UNDETERMINED_TITLE: &str = "IP not yet determined";

/// Result of the most recent successful poll. An empty `ip` means no poll
/// has succeeded yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatestObservation {
    pub ip: String,
    /// Wall-clock time of the observation, `HH:MM`.
    pub observed_at: String,
    pub country_name: String,
}

impl LatestObservation {
    pub fn is_known(&self) -> bool {
        !self.ip.is_empty()
    }

    pub fn tooltip(&self) -> String {
        format!(
            "IP: {} | Country: {} | Last Updated: {}",
            self.ip, self.country_name, self.observed_at
        )
    }

    /// Title shown on request. Does not carry the country.
    pub fn title(&self) -> String {
        format!("IP: {} | Last Updated: {}", self.ip, self.observed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> LatestObservation {
        LatestObservation {
            ip: "5.6.7.8".into(),
            observed_at: "21:04".into(),
            country_name: "Germany".into(),
        }
    }

    #[test]
    fn default_is_unknown() {
        assert!(!LatestObservation::default().is_known());
        assert!(sample().is_known());
    }

    #[test]
    fn tooltip_and_title_formats() {
        let obs = sample();
        assert_eq!(
            obs.tooltip(),
            "IP: 5.6.7.8 | Country: Germany | Last Updated: 21:04"
        );
        assert_eq!(obs.title(), "IP: 5.6.7.8 | Last Updated: 21:04");
    }
}
