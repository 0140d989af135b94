//! Named scenario sequences for continual-learning runs

use doom_rl_core::{DoomRlError, Result, Scenario};

/// Ordered list of scenarios trained one after another
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub name: &'static str,
    pub scenarios: Vec<Scenario>,
}

impl Sequence {
    fn new(name: &'static str, groups: &[&[Scenario]]) -> Self {
        Self {
            name,
            scenarios: groups.concat(),
        }
    }
}

const ALL_TASKS: &[Scenario] = &[
    Scenario::ArmsDealer,
    Scenario::Chainsaw,
    Scenario::FloorIsLava,
    Scenario::HealthGathering,
    Scenario::HideAndSeek,
    Scenario::Pitfall,
    Scenario::RaiseTheRoof,
    Scenario::RunAndGun,
];
const MOVEMENT: &[Scenario] = &[Scenario::Pitfall];
const TARGETING: &[Scenario] = &[Scenario::HealthGathering, Scenario::ArmsDealer];
const KILL: &[Scenario] = &[Scenario::Chainsaw, Scenario::RunAndGun];
const SURVIVE: &[Scenario] = &[
    Scenario::FloorIsLava,
    Scenario::HideAndSeek,
    Scenario::RaiseTheRoof,
];

/// Every defined sequence, in launch order
pub fn build_sequences() -> Vec<Sequence> {
    vec![
        Sequence::new("all_tasks_once", &[ALL_TASKS]),
        Sequence::new("movement_then_all", &[MOVEMENT, ALL_TASKS]),
        Sequence::new("just_targeting", &[TARGETING]),
        Sequence::new("kill_then_survive", &[KILL, SURVIVE]),
        Sequence::new("survive_then_kill", &[SURVIVE, KILL]),
        Sequence::new("movement_then_kill", &[MOVEMENT, KILL]),
        Sequence::new("movement_then_survive", &[MOVEMENT, SURVIVE]),
        Sequence::new("kill_then_movement", &[KILL, MOVEMENT]),
        Sequence::new("survive_then_movement", &[SURVIVE, MOVEMENT]),
        Sequence::new("targeting_then_kill", &[TARGETING, KILL]),
        Sequence::new("targeting_then_survive", &[TARGETING, SURVIVE]),
        Sequence::new("targeting_then_movement", &[TARGETING, MOVEMENT]),
    ]
}

/// Resolve sequence names, or every sequence when `only` is empty
///
/// All names are checked before anything is returned, so a typo in the last
/// name fails before the first sequence is launched.
pub fn select(only: &[String]) -> Result<Vec<Sequence>> {
    let sequences = build_sequences();
    if only.is_empty() {
        return Ok(sequences);
    }

    only.iter()
        .map(|name| {
            sequences
                .iter()
                .find(|sequence| sequence.name == name)
                .cloned()
                .ok_or_else(|| DoomRlError::UnknownSequence {
                    name: name.clone(),
                    available: sequences.iter().map(|s| s.name.to_string()).collect(),
                })
        })
        .collect()
}
