use crate::domain::model::{BayId, ModuleId};
use std::collections::BTreeMap;

/// What an `equip` call changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EquipOutcome {
    /// The module already sat in the target bay.
    Unchanged,
    Equipped {
        /// Bay the module was moved out of, if it was already equipped elsewhere.
        vacated: Option<BayId>,
        /// Previous occupant of the target bay, now back in inventory.
        displaced: Option<ModuleId>,
    },
}

/// Partial injective mapping from modules to bays.
///
/// A module absent from the mapping is in inventory. The forward and
/// reverse indexes are always mirror images of each other, so no bay holds
/// two modules and no module sits in two bays.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Assignment {
    by_module: BTreeMap<ModuleId, BayId>,
    by_bay: BTreeMap<BayId, ModuleId>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equip(&mut self, module: ModuleId, bay: BayId) -> EquipOutcome {
        if self.by_module.get(&module) == Some(&bay) {
            return EquipOutcome::Unchanged;
        }

        let vacated = self.by_module.remove(&module);
        if let Some(old_bay) = &vacated {
            self.by_bay.remove(old_bay);
        }

        let displaced = self.by_bay.remove(&bay);
        if let Some(other) = displaced {
            self.by_module.remove(&other);
        }

        self.by_module.insert(module, bay.clone());
        self.by_bay.insert(bay, module);

        EquipOutcome::Equipped { vacated, displaced }
    }

    /// Returns the bay the module was removed from; `None` if it was not equipped.
    pub fn unequip(&mut self, module: ModuleId) -> Option<BayId> {
        let bay = self.by_module.remove(&module)?;
        self.by_bay.remove(&bay);
        Some(bay)
    }

    /// Empties a bay, returning its former occupant.
    pub fn clear_bay(&mut self, bay: &BayId) -> Option<ModuleId> {
        let module = self.by_bay.remove(bay)?;
        self.by_module.remove(&module);
        Some(module)
    }

    pub fn clear(&mut self) {
        self.by_module.clear();
        self.by_bay.clear();
    }

    pub fn bay_of(&self, module: ModuleId) -> Option<&BayId> {
        self.by_module.get(&module)
    }

    pub fn occupant(&self, bay: &BayId) -> Option<ModuleId> {
        self.by_bay.get(bay).copied()
    }

    pub fn is_equipped(&self, module: ModuleId) -> bool {
        self.by_module.contains_key(&module)
    }

    pub fn len(&self) -> usize {
        self.by_module.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_module.is_empty()
    }

    /// Equipped modules in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, &BayId)> {
        self.by_module.iter().map(|(m, b)| (*m, b))
    }

    #[cfg(test)]
    pub(crate) fn is_consistent(&self) -> bool {
        self.by_module.len() == self.by_bay.len()
            && self
                .by_module
                .iter()
                .all(|(m, b)| self.by_bay.get(b) == Some(m))
    }
}
