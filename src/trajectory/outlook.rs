use super::types::Trajectory;
use super::HIGH_URGENCY_COUNT;

/// Seven-day outlook text for a trajectory.
pub fn short_term(trajectory: Trajectory) -> String {
    match trajectory {
        Trajectory::Escalating => "Short-term outlook (7 days): Situation likely to intensify. \
             Expect increased media coverage, possible diplomatic statements, \
             and heightened rhetoric. Monitor for concrete actions matching the rhetoric."
            .to_string(),
        Trajectory::DeEscalating => "Short-term outlook (7 days): Situation showing signs of stabilization. \
             Expect continued dialogue, reduced inflammatory rhetoric, \
             and possible diplomatic progress."
            .to_string(),
        Trajectory::Stable => "Short-term outlook (7 days): Situation expected to remain stable. \
             Continue monitoring for any sudden changes in rhetoric or actions."
            .to_string(),
    }
}

/// Thirty-day outlook text for a trajectory. The escalating variant grades
/// its urgency wording by the indicator count.
pub fn medium_term(trajectory: Trajectory, urgency_indicator_count: usize) -> String {
    match trajectory {
        Trajectory::Escalating => {
            let urgency_level = if urgency_indicator_count > HIGH_URGENCY_COUNT {
                "high"
            } else {
                "moderate"
            };
            format!(
                "Medium-term outlook (30 days): With {urgency_level} urgency indicators, \
                 the situation may develop into a more serious crisis. \
                 Key factors to watch: actor responses, international involvement, \
                 and whether rhetoric translates to concrete actions."
            )
        }
        Trajectory::DeEscalating => "Medium-term outlook (30 days): If current trends continue, \
             the situation should move toward resolution or at least stabilization. \
             Watch for formal agreements or continued positive signals."
            .to_string(),
        Trajectory::Stable => "Medium-term outlook (30 days): Situation likely to remain in current state \
             unless external factors intervene. Monitor for any catalyst events \
             that could shift the trajectory."
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escalating_medium_term_grades_urgency() {
        let high = medium_term(Trajectory::Escalating, 6);
        assert!(high.contains("With high urgency indicators"));

        let moderate = medium_term(Trajectory::Escalating, 5);
        assert!(moderate.contains("With moderate urgency indicators"));
    }

    #[test]
    fn outlooks_are_keyed_by_trajectory() {
        assert!(short_term(Trajectory::Escalating).contains("likely to intensify"));
        assert!(short_term(Trajectory::DeEscalating).contains("signs of stabilization"));
        assert!(short_term(Trajectory::Stable).contains("remain stable"));
        assert!(medium_term(Trajectory::Stable, 0).contains("catalyst events"));
        assert!(medium_term(Trajectory::DeEscalating, 0).contains("formal agreements"));
    }
}
