use super::{Element, RuleId};

/// Compiled rule bodies, indexed by rule id.
///
/// Ids can be minted before their body is known, so the table grows with
/// empty placeholder entries that get filled in once the body is compiled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rules {
    bodies: Vec<Vec<Element>>,
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the body for `id`, padding with placeholders as needed. Returns
    /// the previous body, which is empty unless the rule was already defined.
    pub fn set(&mut self, id: RuleId, body: Vec<Element>) -> Vec<Element> {
        let idx = id as usize;
        if self.bodies.len() <= idx {
            self.bodies.resize_with(idx + 1, Vec::new);
        }
        std::mem::replace(&mut self.bodies[idx], body)
    }

    /// Check if `id` has a non-placeholder body.
    pub fn is_defined(&self, id: RuleId) -> bool {
        self.get(id).map_or(false, |body| !body.is_empty())
    }

    /// Body of the rule, `None` when the id has no body yet.
    pub fn get(&self, id: RuleId) -> Option<&[Element]> {
        match self.bodies.get(id as usize) {
            Some(body) if !body.is_empty() => Some(body),
            _ => None,
        }
    }

    /// Number of rule ids the table has slots for.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// All bodies in id order, placeholders included.
    pub fn iter(&self) -> impl Iterator<Item = &[Element]> {
        self.bodies.iter().map(|body| body.as_slice())
    }
}
