use std::fmt;

use crate::error::GrammarError;

/// Identifies a rule in a [`Grammar`]. Grammar authors may use either plain
/// integers or symbolic names; both live in the same id space.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RuleId {
    Index(u32),
    Name(Box<str>),
}

impl RuleId {
    pub fn name(name: impl AsRef<str>) -> Self {
        RuleId::Name(name.as_ref().into())
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleId::Index(i) => write!(f, "#{i}"),
            RuleId::Name(n) => write!(f, "{n}"),
        }
    }
}

impl From<u32> for RuleId {
    fn from(i: u32) -> Self {
        RuleId::Index(i)
    }
}

impl From<&str> for RuleId {
    fn from(s: &str) -> Self {
        RuleId::name(s)
    }
}

impl From<String> for RuleId {
    fn from(s: String) -> Self {
        RuleId::Name(s.into_boxed_str())
    }
}

/// No upper bound on a [`Rule::Repetition`].
pub const UNBOUNDED: i64 = -1;

/// A single production in a grammar. Rules refer to each other by [`RuleId`];
/// there is no in-memory cyclic graph, only a flat table and integer-or-name
/// indices into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Matches one token named `token_name`. If `keep` is false, the token is
    /// consumed but contributes the empty-list sentinel to its parent.
    Terminal { token_name: String, keep: bool },
    /// Matches every child rule in order; fails if any child fails.
    Concatenation {
        children: Vec<RuleId>,
        label: Option<String>,
    },
    /// Matches the first child (in declared order) that succeeds.
    Alternation {
        children: Vec<RuleId>,
        label: Option<String>,
    },
    /// Matches `child` between `min` and `max` times. `max == UNBOUNDED` means
    /// no upper bound.
    Repetition {
        child: RuleId,
        min: usize,
        max: i64,
        label: Option<String>,
    },
}

impl Rule {
    pub fn terminal(token_name: impl Into<String>, keep: bool) -> Self {
        Rule::Terminal {
            token_name: token_name.into(),
            keep,
        }
    }

    pub fn concatenation(children: Vec<RuleId>, label: Option<&str>) -> Self {
        Rule::Concatenation {
            children,
            label: label.map(str::to_string),
        }
    }

    pub fn alternation(children: Vec<RuleId>, label: Option<&str>) -> Self {
        Rule::Alternation {
            children,
            label: label.map(str::to_string),
        }
    }

    pub fn repetition(child: RuleId, min: usize, max: i64, label: Option<&str>) -> Self {
        Rule::Repetition {
            child,
            min,
            max,
            label: label.map(str::to_string),
        }
    }

    fn label(&self) -> Option<&str> {
        match self {
            Rule::Terminal { .. } => None,
            Rule::Concatenation { label, .. }
            | Rule::Alternation { label, .. }
            | Rule::Repetition { label, .. } => label.as_deref(),
        }
    }
}

/// An ordered rule table plus a designated initial rule. Order is preserved
/// (not a `HashMap`) so that "first rule in declaration order" is well
/// defined when no initial rule is given.
#[derive(Debug, Clone)]
pub struct Grammar {
    rules: Vec<(RuleId, Rule)>,
    initial: RuleId,
}

impl Grammar {
    /// Validates the rule table: every referenced id must exist, and the
    /// initial rule (explicit or the first declared) must exist too.
    pub fn new(
        rules: Vec<(RuleId, Rule)>,
        initial: Option<RuleId>,
    ) -> Result<Self, GrammarError> {
        let initial = match initial {
            Some(id) => id,
            None => rules
                .first()
                .map(|(id, _)| id.clone())
                .ok_or(GrammarError::NoRules)?,
        };

        if !rules.iter().any(|(id, _)| *id == initial) {
            return Err(GrammarError::MissingInitialRule(initial));
        }

        for (id, rule) in &rules {
            let referenced: Vec<&RuleId> = match rule {
                Rule::Terminal { .. } => Vec::new(),
                Rule::Concatenation { children, .. } | Rule::Alternation { children, .. } => {
                    children.iter().collect()
                }
                Rule::Repetition { child, .. } => vec![child],
            };
            for r in referenced {
                if !rules.iter().any(|(other, _)| other == r) {
                    return Err(GrammarError::UnknownRule {
                        referenced_by: id.clone(),
                        missing: r.clone(),
                    });
                }
            }
        }

        Ok(Self { rules, initial })
    }

    pub fn initial(&self) -> &RuleId {
        &self.initial
    }

    pub fn get(&self, id: &RuleId) -> Option<&Rule> {
        self.rules.iter().find(|(rid, _)| rid == id).map(|(_, r)| r)
    }

    pub fn label_of(&self, id: &RuleId) -> Option<&str> {
        self.get(id).and_then(Rule::label)
    }
}
