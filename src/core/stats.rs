use crate::core::assignment::Assignment;
use crate::domain::model::{ModuleDef, StatDef};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatValue {
    pub name: String,
    pub value: f64,
    pub max: Option<f64>,
}

impl StatValue {
    /// `value / max` clamped to `[0, 1]`.
    ///
    /// A missing, non-positive or non-finite ceiling normalises to 0.
    pub fn fraction(&self) -> f64 {
        match self.max {
            Some(max) if max.is_finite() && max > 0.0 && self.value.is_finite() => {
                (self.value / max).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

/// Ship statistics in stat-definition order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DerivedStats {
    entries: Vec<StatValue>,
}

impl DerivedStats {
    pub fn get(&self, name: &str) -> Option<&StatValue> {
        self.entries.iter().find(|s| s.name == name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.get(name).map(|s| s.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StatValue> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a DerivedStats {
    type Item = &'a StatValue;
    type IntoIter = std::slice::Iter<'a, StatValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Defaults plus the deltas of every equipped module.
///
/// Modules are summed in catalog order. Stat keys without a definition
/// are ignored.
pub fn derived_stats(
    assignment: &Assignment,
    stat_defs: &[StatDef],
    module_defs: &[ModuleDef],
) -> DerivedStats {
    let mut entries: Vec<StatValue> = stat_defs
        .iter()
        .map(|def| StatValue {
            name: def.stat_name.clone(),
            value: def.default_value,
            max: def.max_value,
        })
        .collect();

    for module in module_defs
        .iter()
        .filter(|m| assignment.is_equipped(m.id))
    {
        for (stat_name, delta) in &module.stats {
            match entries.iter_mut().find(|e| &e.name == stat_name) {
                Some(entry) => entry.value += delta,
                None => {
                    tracing::trace!(module = %module.id, stat = %stat_name, "ignoring unknown stat key")
                }
            }
        }
    }

    DerivedStats { entries }
}
