//! Predictions: facts claimed by the rule grounder or the text classifier.

use serde::{Deserialize, Serialize};

use super::{Fact, Rule};

/// A predicted fact with its confidence and supporting evidence.
///
/// Produced by the grounding engine (rule evidence, no sentences) or by the
/// external text classifier (sentence evidence, no rules). The fusion step
/// merges one of each per fact into a new `Pred` carrying both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pred {
    /// The predicted fact, fully bound.
    pub fact: Fact,
    /// Confidence in [0, 1].
    pub conf: f32,
    /// Supporting sentences from the text classifier, possibly empty.
    #[serde(default)]
    pub sents: Vec<String>,
    /// Supporting rules from the grounder, possibly empty.
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Pred {
    /// A prediction backed by a single grounded rule.
    pub fn from_rule(fact: Fact, rule: Rule) -> Self {
        Self {
            fact,
            conf: rule.conf,
            sents: Vec::new(),
            rules: vec![rule],
        }
    }

    /// A prediction backed by sentence evidence.
    pub fn from_text(fact: Fact, conf: f32, sents: Vec<String>) -> Self {
        Self {
            fact,
            conf: conf.clamp(0.0, 1.0),
            sents,
            rules: Vec::new(),
        }
    }
}
