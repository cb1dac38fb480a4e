use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(pub u32);

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ModuleId {
    fn from(id: u32) -> Self {
        ModuleId(id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BayId(pub String);

impl BayId {
    pub fn new(id: impl Into<String>) -> Self {
        BayId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for BayId {
    fn from(id: &str) -> Self {
        BayId(id.to_string())
    }
}

/// An equippable module as published in the modules document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleDef {
    pub id: ModuleId,
    pub name: String,
    pub tier: String,
    #[serde(default, alias = "iconRef")]
    pub icon: String,
    /// Additive contribution per stat key.
    #[serde(default)]
    pub stats: BTreeMap<String, f64>,
}

impl ModuleDef {
    pub fn tier_class(&self) -> String {
        crate::utils::text::tier_class(&self.tier)
    }
}

/// Baseline and normalisation ceiling for one ship statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatDef {
    pub stat_name: String,
    #[serde(default)]
    pub default_value: f64,
    #[serde(default)]
    pub max_value: Option<f64>,
}

/// A single-capacity equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bay {
    pub id: BayId,
    pub label: String,
}

impl Bay {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: BayId(id.into()),
            label: label.into(),
        }
    }
}

/// Immutable result of a catalog load. Both lists keep document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub modules: Vec<ModuleDef>,
    pub stats: Vec<StatDef>,
}

impl Catalog {
    pub fn new(modules: Vec<ModuleDef>, stats: Vec<StatDef>) -> Self {
        Self { modules, stats }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.stats.is_empty()
    }

    pub fn module(&self, id: ModuleId) -> Option<&ModuleDef> {
        self.modules.iter().find(|m| m.id == id)
    }

    pub fn module_by_name(&self, name: &str) -> Option<&ModuleDef> {
        self.modules.iter().find(|m| m.name == name)
    }

    pub fn contains(&self, id: ModuleId) -> bool {
        self.module(id).is_some()
    }

    pub fn stat(&self, name: &str) -> Option<&StatDef> {
        self.stats.iter().find(|s| s.stat_name == name)
    }
}
