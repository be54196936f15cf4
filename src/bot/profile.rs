//! Bot profile parameters: the five fixed skill levels and the knobs that
//! drive the attention filter, scoring heuristic, and lookahead.

/// A named bot skill level with its tuned parameter vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub name: &'static str,
    pub mistake_rate: f64,
    pub lookahead_depth: u8,
    pub goal_priority: f64,
    pub blocking_awareness: f64,
    pub chain_preference: f64,
    pub patience: f64,
    pub risk_tolerance: f64,
    pub pattern_recognition: f64,
    pub corpus_weight: f64,
}

impl Profile {
    /// Optimal never consults the RNG: no mistake gate, no attention
    /// filter, no noise, no patience gate.
    pub fn is_optimal(&self) -> bool {
        self.pattern_recognition >= 1.0 && self.mistake_rate == 0.0
    }
}

pub const NOVICE: Profile = Profile {
    name: "novice",
    mistake_rate: 0.40,
    lookahead_depth: 0,
    goal_priority: 0.3,
    blocking_awareness: 0.2,
    chain_preference: 0.2,
    patience: 0.3,
    risk_tolerance: 0.7,
    pattern_recognition: 0.2,
    corpus_weight: 0.35,
};

pub const CASUAL: Profile = Profile {
    name: "casual",
    mistake_rate: 0.20,
    lookahead_depth: 1,
    goal_priority: 0.45,
    blocking_awareness: 0.4,
    chain_preference: 0.4,
    patience: 0.4,
    risk_tolerance: 0.55,
    pattern_recognition: 0.4,
    corpus_weight: 0.25,
};

pub const AVERAGE: Profile = Profile {
    name: "average",
    mistake_rate: 0.10,
    lookahead_depth: 2,
    goal_priority: 0.6,
    blocking_awareness: 0.6,
    chain_preference: 0.6,
    patience: 0.5,
    risk_tolerance: 0.4,
    pattern_recognition: 0.6,
    corpus_weight: 0.2,
};

pub const EXPERT: Profile = Profile {
    name: "expert",
    mistake_rate: 0.02,
    lookahead_depth: 5,
    goal_priority: 0.85,
    blocking_awareness: 0.85,
    chain_preference: 0.85,
    patience: 0.8,
    risk_tolerance: 0.2,
    pattern_recognition: 0.85,
    corpus_weight: 0.15,
};

pub const OPTIMAL: Profile = Profile {
    name: "optimal",
    mistake_rate: 0.00,
    lookahead_depth: 10,
    goal_priority: 1.0,
    blocking_awareness: 1.0,
    chain_preference: 1.0,
    patience: 1.0,
    risk_tolerance: 0.05,
    pattern_recognition: 1.0,
    corpus_weight: 0.05,
};

/// The five fixed profiles in skill order, lowest first.
pub const ALL: [Profile; 5] = [NOVICE, CASUAL, AVERAGE, EXPERT, OPTIMAL];

/// The three-profile fast-path subset used when `use_core_bots_only` is set.
pub const CORE_SUBSET: [Profile; 3] = [CASUAL, AVERAGE, EXPERT];

pub fn by_name(name: &str) -> Option<Profile> {
    ALL.into_iter().find(|p| p.name == name)
}
