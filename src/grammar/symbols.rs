use indexmap::IndexMap;
use tracing::trace;

use super::RuleId;

/// Rule names and their ids.
///
/// Ids are dense and handed out in the order names are first seen, whether
/// that's at a definition or a forward reference. The id of a name is its
/// insertion index, so it never changes once assigned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    ids: IndexMap<String, RuleId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `name`, assigning the next free id if the name hasn't
    /// been seen yet.
    pub fn id_of(&mut self, name: &str) -> RuleId {
        if let Some(&id) = self.ids.get(name) {
            return id;
        }
        let id = self.ids.len() as RuleId;
        self.ids.insert(name.to_owned(), id);
        id
    }

    /// Register a new synthetic rule derived from `base`.
    ///
    /// The generated name embeds the id it receives (`base_<id>`). If a rule
    /// with that name was already written by the grammar author, underscores
    /// and the id are appended until the name is unused.
    pub fn fresh_synthetic_id(&mut self, base: &str) -> RuleId {
        let id = self.ids.len() as RuleId;
        let mut name = format!("{}_{}", base, id);
        while self.ids.contains_key(&name) {
            name = format!("{}_{}", name, id);
        }
        trace!(%name, id, "allocated synthetic rule");
        self.id_of(&name)
    }

    /// Lookup without assigning.
    pub fn get(&self, name: &str) -> Option<RuleId> {
        self.ids.get(name).copied()
    }

    /// Name of the rule with the given id.
    pub fn name(&self, id: RuleId) -> Option<&str> {
        self.ids
            .get_index(id as usize)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RuleId)> {
        self.ids.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// Entries ordered lexicographically by name, independent of the order ids
    /// were assigned in.
    pub fn entries_sorted_by_name(&self) -> Vec<(&str, RuleId)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
