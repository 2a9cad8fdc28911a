use crate::token::Token;

/// The opaque value produced by reducing a rule. The interpreter only ever
/// needs to know whether a value is a token, a list (to flatten), or a
/// labeled node; everything else is up to the builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Token(Token),
    List(Vec<Value>),
    Node { label: String, children: Vec<Value> },
}

impl Value {
    /// The sentinel meaning "matched, but contributes nothing to the tree".
    pub fn empty() -> Self {
        Value::List(Vec::new())
    }

    pub fn is_empty_list(&self) -> bool {
        matches!(self, Value::List(v) if v.is_empty())
    }

    /// Appends `self` onto `out` following the list-flattening law: lists are
    /// spliced element-wise, the empty-list sentinel contributes nothing,
    /// anything else is appended whole.
    pub fn flatten_into(self, out: &mut Vec<Value>) {
        match self {
            Value::List(items) => out.extend(items),
            other => out.push(other),
        }
    }
}
