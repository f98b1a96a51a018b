//! Rule grounding: matching rule bodies against the graph and instantiating
//! their heads into predicted facts.
//!
//! The engine handles single-atom bodies in the two shapes the store can
//! answer directly:
//!
//! - `(Var, rel, ent)` — bind the variable to every head of `(_, rel, ent)`
//! - `(ent, rel, Var)` — bind the variable to every tail of `(ent, rel, _)`
//!
//! The head atom must be one of the same two shapes and share the body's
//! variable. Everything else is skipped, counted, and logged — grounding is
//! best-effort inference, so no rule can abort the batch. Predictions are an
//! explicit return value grouped by head entity; the engine holds no state
//! across passes.

use std::collections::BTreeMap;

use crate::model::rule::Rule;
use crate::model::{EntId, Fact, Pred, Term};
use crate::store::TripleSource;

/// Counters for one grounding pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroundingReport {
    /// Rules the pass looked at.
    pub rules_processed: usize,
    /// Predictions produced across all rules.
    pub predictions: usize,
    /// Rules skipped because the body atom shape is unsupported.
    pub unsupported_body: usize,
    /// Rules skipped because the head atom shape is unsupported or its
    /// variable is not bound by the body.
    pub unsupported_head: usize,
    /// Rules skipped because the triple source failed to answer.
    pub failed_queries: usize,
}

impl GroundingReport {
    /// Total rules skipped for any reason.
    pub fn unsupported_total(&self) -> usize {
        self.unsupported_body + self.unsupported_head + self.failed_queries
    }
}

/// Output of a grounding pass: predictions grouped by head entity, plus the
/// pass counters.
#[derive(Debug, Default)]
pub struct Grounding {
    /// Head entity → predictions about it, in rule order.
    pub preds: BTreeMap<EntId, Vec<Pred>>,
    /// Pass counters.
    pub report: GroundingReport,
}

/// Ground every rule against the store, in the order given.
///
/// Callers wanting reproducible output pass rules in a previously sorted
/// order (confidence-descending from
/// [`sort_by_confidence`](crate::rules::sort_by_confidence)); binding
/// enumeration follows the store's deterministic query order.
pub fn ground_rules<S: TripleSource>(store: &S, rules: &[Rule]) -> Grounding {
    let mut grounding = Grounding::default();

    for rule in rules {
        grounding.report.rules_processed += 1;
        ground_one(store, rule, &mut grounding);
    }

    let report = &grounding.report;
    tracing::info!(
        rules = report.rules_processed,
        predictions = report.predictions,
        unsupported_body = report.unsupported_body,
        unsupported_head = report.unsupported_head,
        failed_queries = report.failed_queries,
        "grounding pass complete"
    );

    grounding
}

fn ground_one<S: TripleSource>(store: &S, rule: &Rule, grounding: &mut Grounding) {
    // Only single-atom bodies reach the engine by construction; anything
    // longer is an unsupported body shape, same as a variable-free atom.
    let [body] = rule.body.as_slice() else {
        tracing::warn!(rule = %rule, "unsupported rule body: expected a single atom");
        grounding.report.unsupported_body += 1;
        return;
    };

    let (bound_var, query) = match (&body.head, &body.tail) {
        (Term::Variable(var), Term::Entity(tail)) => {
            (var, store.heads_by_rel_tail(body.rel, *tail))
        }
        (Term::Entity(head), Term::Variable(var)) => {
            (var, store.tails_by_head_rel(*head, body.rel))
        }
        (Term::Variable(_), Term::Variable(_)) | (Term::Entity(_), Term::Entity(_)) => {
            tracing::warn!(rule = %rule, "unsupported rule body: needs exactly one variable");
            grounding.report.unsupported_body += 1;
            return;
        }
    };

    let bindings = match query {
        Ok(bindings) => bindings,
        Err(e) => {
            tracing::warn!(rule = %rule, error = %e, "store query failed, skipping rule");
            grounding.report.failed_queries += 1;
            return;
        }
    };

    tracing::debug!(rule = %rule, bindings = bindings.len(), "grounded rule body");

    // Substitute each binding into the head. The head must share the body's
    // variable; an unshared variable means the rule is unsafe.
    let facts: Vec<Fact> = match (&rule.head.head, &rule.head.tail) {
        (Term::Variable(v), Term::Entity(tail)) if v == bound_var => bindings
            .iter()
            .map(|&ent| Fact::new(ent, rule.head.rel, *tail))
            .collect(),
        (Term::Entity(head), Term::Variable(v)) if v == bound_var => bindings
            .iter()
            .map(|&ent| Fact::new(*head, rule.head.rel, ent))
            .collect(),
        _ => {
            tracing::warn!(rule = %rule, "unsupported rule head, skipping rule");
            grounding.report.unsupported_head += 1;
            return;
        }
    };

    for fact in facts {
        grounding.report.predictions += 1;
        grounding
            .preds
            .entry(fact.head)
            .or_default()
            .push(Pred::from_rule(fact, rule.clone()));
    }
}
