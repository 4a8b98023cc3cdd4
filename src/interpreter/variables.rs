use indexmap::IndexMap;

use crate::error::InternalError;

/// Index of a slot in the [`Variables`] arena.
pub type VariableId = usize;

/// A named storage slot holding one boolean.
#[derive(Debug, Clone)]
pub struct Slot {
    /// Current value; `None` until a free variable is first assigned.
    pub value:       Option<bool>,
    /// Short human readable name, shown in listings.
    pub title:       String,
    /// Longer description, shown in listings.
    pub description: String,
}

/// Arena of named constants and free variables.
///
/// Constants occupy the first slots and form the baseline. Free variables
/// are appended behind them in the order the lexer first meets them, which
/// makes the tail of the arena the ordered free-variable list of the current
/// expression. [`Variables::reset`] truncates the arena back to the baseline.
///
/// # Example
/// ```
/// use trtbl::interpreter::variables::Variables;
///
/// let mut variables = Variables::new();
/// variables.define_constant("true", true, "True", "Boolean value");
///
/// let a = variables.declare_free("a");
/// assert_eq!(variables.lookup("a"), Some(a));
/// assert_eq!(variables.free().collect::<Vec<_>>(), ["a"]);
///
/// variables.reset();
/// assert_eq!(variables.lookup("a"), None);
/// assert!(variables.lookup("true").is_some());
/// ```
#[derive(Debug, Default)]
pub struct Variables {
    slots:    IndexMap<String, Slot>,
    baseline: usize,
}

impl Variables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines (or redefines) a named constant.
    ///
    /// Constants must precede every free variable, so any free variables
    /// present are discarded first.
    pub fn define_constant(&mut self, name: &str, value: bool, title: &str, description: &str) {
        self.reset();
        self.slots.insert(name.to_string(),
                          Slot { value:       Some(value),
                                 title:       title.to_string(),
                                 description: description.to_string(), });
        self.baseline = self.slots.len();
    }

    /// Appends a new unbound free variable and returns its slot.
    ///
    /// If the name already exists its slot is returned unchanged.
    pub fn declare_free(&mut self, name: &str) -> VariableId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let (id, _) = self.slots.insert_full(name.to_string(),
                                             Slot { value:       None,
                                                    title:       String::new(),
                                                    description: String::new(), });
        id
    }

    /// Finds the slot of a constant or free variable by name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<VariableId> {
        self.slots.get_index_of(name)
    }

    /// Returns the name of a slot.
    #[must_use]
    pub fn name(&self, id: VariableId) -> Option<&str> {
        self.slots.get_index(id).map(|(name, _)| name.as_str())
    }

    /// Returns the current value of a slot, or `None` if it is unbound or does
    /// not exist.
    #[must_use]
    pub fn value(&self, id: VariableId) -> Option<bool> {
        self.slots.get_index(id).and_then(|(_, slot)| slot.value)
    }

    /// Names of the free variables, in first-seen order.
    pub fn free(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().skip(self.baseline).map(String::as_str)
    }

    /// Number of free variables.
    #[must_use]
    pub fn free_count(&self) -> usize {
        self.slots.len() - self.baseline
    }

    /// Named constants in definition order.
    pub fn constants(&self) -> impl Iterator<Item = (&str, &Slot)> {
        self.slots.iter().take(self.baseline).map(|(name, slot)| (name.as_str(), slot))
    }

    /// Binds every free variable, in order, to the given values.
    ///
    /// # Errors
    /// Returns `InternalError::AssignmentLength` if `values` does not contain
    /// exactly one entry per free variable.
    pub fn assign(&mut self, values: &[bool]) -> Result<(), InternalError> {
        if values.len() != self.free_count() {
            return Err(InternalError::AssignmentLength { expected: self.free_count(),
                                                         found:    values.len(), });
        }
        for ((_, slot), value) in self.slots.iter_mut().skip(self.baseline).zip(values) {
            slot.value = Some(*value);
        }
        Ok(())
    }

    /// Drops every free variable, returning the arena to its constants.
    pub fn reset(&mut self) {
        self.slots.truncate(self.baseline);
    }
}
