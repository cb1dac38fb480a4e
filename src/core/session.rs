//! Session controller: the single owner of the catalog, the bay layout and
//! the current assignment.
//!
//! A `Session` can only be built from a finished catalog (either handed in
//! directly or awaited through [`Session::load`]), so there is no window in
//! which an intent can race an in-flight load. Every mutator is total:
//! references to unknown modules or bays come back as
//! [`IntentOutcome::Ignored`] and leave the assignment untouched.

use crate::core::assignment::{Assignment, EquipOutcome};
use crate::core::inventory::visible_inventory;
use crate::core::loader::CatalogLoader;
use crate::core::stats::{derived_stats, DerivedStats};
use crate::domain::model::{Bay, BayId, Catalog, ModuleDef, ModuleId};
use crate::domain::ports::DocumentSource;
use crate::utils::text::pretty_label;
use serde::Serialize;

/// Container id of the inventory pool in drop payloads.
pub const INVENTORY_CONTAINER: &str = "inventory";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    Inventory,
    Bay(BayId),
}

impl DropTarget {
    pub fn parse(container_id: &str) -> Self {
        let container_id = container_id.trim();
        if container_id == INVENTORY_CONTAINER {
            DropTarget::Inventory
        } else {
            DropTarget::Bay(BayId::from(container_id))
        }
    }
}

/// Payload of a drag release: which module, dropped where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropIntent {
    pub module: ModuleId,
    pub target: DropTarget,
}

impl DropIntent {
    pub fn equip(module: ModuleId, bay: impl Into<BayId>) -> Self {
        Self {
            module,
            target: DropTarget::Bay(bay.into()),
        }
    }

    pub fn unequip(module: ModuleId) -> Self {
        Self {
            module,
            target: DropTarget::Inventory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ignored {
    UnknownModule(ModuleId),
    UnknownBay(BayId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    Unchanged,
    Equipped {
        module: ModuleId,
        bay: BayId,
        vacated: Option<BayId>,
        displaced: Option<ModuleId>,
    },
    Unequipped {
        module: ModuleId,
        from: BayId,
    },
    Ignored(Ignored),
}

impl IntentOutcome {
    pub fn changed(&self) -> bool {
        matches!(
            self,
            IntentOutcome::Equipped { .. } | IntentOutcome::Unequipped { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "bay", rename_all = "snake_case")]
pub enum ModuleLocation {
    Inventory,
    Equipped(BayId),
}

#[derive(Debug, Clone, Copy)]
pub struct BaySlot<'a> {
    pub bay: &'a Bay,
    pub occupant: Option<&'a ModuleDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatLine {
    pub key: String,
    pub label: String,
    pub delta: f64,
}

/// Everything the module inspector shows for one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleDetail {
    pub id: ModuleId,
    pub name: String,
    pub tier: String,
    pub tier_class: String,
    pub icon: String,
    pub location: ModuleLocation,
    pub stats: Vec<StatLine>,
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    bays: Vec<Bay>,
    assignment: Assignment,
}

impl Session {
    pub fn new(catalog: Catalog, bays: Vec<Bay>) -> Self {
        tracing::debug!(
            "New session: {} modules, {} bays",
            catalog.modules.len(),
            bays.len()
        );
        Self {
            catalog,
            bays,
            assignment: Assignment::new(),
        }
    }

    /// Awaits the catalog before the session exists. A failed load yields an
    /// empty catalog: nothing to equip, default stats.
    pub async fn load<S: DocumentSource>(loader: &CatalogLoader<S>, bays: Vec<Bay>) -> Self {
        let catalog = loader.load_or_empty().await;
        Self::new(catalog, bays)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn bays(&self) -> &[Bay] {
        &self.bays
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn bay(&self, id: &BayId) -> Option<&Bay> {
        self.bays.iter().find(|b| &b.id == id)
    }

    pub fn equip(&mut self, module: ModuleId, bay: BayId) -> IntentOutcome {
        if !self.catalog.contains(module) {
            return self.ignore(Ignored::UnknownModule(module));
        }
        if self.bay(&bay).is_none() {
            return self.ignore(Ignored::UnknownBay(bay));
        }

        match self.assignment.equip(module, bay.clone()) {
            EquipOutcome::Unchanged => IntentOutcome::Unchanged,
            EquipOutcome::Equipped { vacated, displaced } => {
                tracing::debug!(
                    module = %module,
                    bay = %bay,
                    vacated = ?vacated,
                    displaced = ?displaced,
                    "equipped module"
                );
                IntentOutcome::Equipped {
                    module,
                    bay,
                    vacated,
                    displaced,
                }
            }
        }
    }

    pub fn unequip(&mut self, module: ModuleId) -> IntentOutcome {
        if !self.catalog.contains(module) {
            return self.ignore(Ignored::UnknownModule(module));
        }

        match self.assignment.unequip(module) {
            Some(from) => {
                tracing::debug!(module = %module, bay = %from, "returned module to inventory");
                IntentOutcome::Unequipped { module, from }
            }
            None => IntentOutcome::Unchanged,
        }
    }

    pub fn apply(&mut self, intent: DropIntent) -> IntentOutcome {
        match intent.target {
            DropTarget::Inventory => self.unequip(intent.module),
            DropTarget::Bay(bay) => self.equip(intent.module, bay),
        }
    }

    /// Returns every module to inventory.
    pub fn reset(&mut self) {
        tracing::debug!("Resetting {} equipped modules", self.assignment.len());
        self.assignment.clear();
    }

    pub fn visible_inventory(&self) -> Vec<&ModuleDef> {
        visible_inventory(&self.assignment, &self.catalog.modules)
    }

    pub fn derived_stats(&self) -> DerivedStats {
        derived_stats(&self.assignment, &self.catalog.stats, &self.catalog.modules)
    }

    pub fn occupant(&self, bay: &BayId) -> Option<&ModuleDef> {
        self.assignment
            .occupant(bay)
            .and_then(|id| self.catalog.module(id))
    }

    /// Every configured bay, in configured order, with its occupant.
    pub fn bay_occupants(&self) -> Vec<BaySlot<'_>> {
        self.bays
            .iter()
            .map(|bay| BaySlot {
                bay,
                occupant: self.occupant(&bay.id),
            })
            .collect()
    }

    /// Resolves a numeric id or an exact module name.
    pub fn find_module(&self, key: &str) -> Option<ModuleId> {
        let key = key.trim();
        match key.parse::<u32>() {
            Ok(id) if self.catalog.contains(ModuleId(id)) => Some(ModuleId(id)),
            _ => self.catalog.module_by_name(key).map(|m| m.id),
        }
    }

    pub fn location_of(&self, module: ModuleId) -> Option<ModuleLocation> {
        if !self.catalog.contains(module) {
            return None;
        }
        Some(match self.assignment.bay_of(module) {
            Some(bay) => ModuleLocation::Equipped(bay.clone()),
            None => ModuleLocation::Inventory,
        })
    }

    pub fn module_detail(&self, module: ModuleId) -> Option<ModuleDetail> {
        let def = self.catalog.module(module)?;
        let location = self.location_of(module)?;

        Some(ModuleDetail {
            id: def.id,
            name: def.name.clone(),
            tier: def.tier.clone(),
            tier_class: def.tier_class(),
            icon: def.icon.clone(),
            location,
            stats: def
                .stats
                .iter()
                .map(|(key, delta)| StatLine {
                    key: key.clone(),
                    label: pretty_label(key),
                    delta: *delta,
                })
                .collect(),
        })
    }

    fn ignore(&self, reason: Ignored) -> IntentOutcome {
        tracing::debug!("Ignoring intent: {:?}", reason);
        IntentOutcome::Ignored(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::StatDef;

    fn module(id: u32, name: &str, power: f64) -> ModuleDef {
        ModuleDef {
            id: ModuleId(id),
            name: name.to_string(),
            tier: "Tier 1".to_string(),
            icon: format!("{}.png", id),
            stats: [("power".to_string(), power)].into_iter().collect(),
        }
    }

    fn session() -> Session {
        let catalog = Catalog::new(
            vec![module(1, "Laser", 10.0), module(2, "Railgun", 5.0)],
            vec![StatDef {
                stat_name: "power".to_string(),
                default_value: 0.0,
                max_value: Some(20.0),
            }],
        );
        Session::new(
            catalog,
            vec![
                Bay::new("weapon-bay", "Weapon Bay"),
                Bay::new("utility-bay", "Utility Bay"),
            ],
        )
    }

    #[test]
    fn test_weapon_bay_example() {
        let mut session = session();

        session.equip(ModuleId(1), BayId::from("weapon-bay"));
        let power = session.derived_stats().get("power").cloned().unwrap();
        assert_eq!(power.value, 10.0);
        assert_eq!(power.percent(), 50.0);

        let outcome = session.equip(ModuleId(2), BayId::from("weapon-bay"));
        assert_eq!(
            outcome,
            IntentOutcome::Equipped {
                module: ModuleId(2),
                bay: BayId::from("weapon-bay"),
                vacated: None,
                displaced: Some(ModuleId(1)),
            }
        );
        let power = session.derived_stats().get("power").cloned().unwrap();
        assert_eq!(power.value, 5.0);
        assert_eq!(power.percent(), 25.0);
        assert_eq!(session.location_of(ModuleId(1)), Some(ModuleLocation::Inventory));
    }

    #[test]
    fn test_unknown_module_is_ignored() {
        let mut session = session();
        let before = session.assignment().clone();

        let outcome = session.equip(ModuleId(99), BayId::from("weapon-bay"));
        assert_eq!(outcome, IntentOutcome::Ignored(Ignored::UnknownModule(ModuleId(99))));
        assert_eq!(
            session.unequip(ModuleId(99)),
            IntentOutcome::Ignored(Ignored::UnknownModule(ModuleId(99)))
        );
        assert_eq!(session.assignment(), &before);
    }

    #[test]
    fn test_unknown_bay_is_ignored() {
        let mut session = session();

        let outcome = session.equip(ModuleId(1), BayId::from("cargo-hold"));

        assert_eq!(
            outcome,
            IntentOutcome::Ignored(Ignored::UnknownBay(BayId::from("cargo-hold")))
        );
        assert!(session.assignment().is_empty());
    }

    #[test]
    fn test_drop_on_inventory_unequips() {
        let mut session = session();
        session.apply(DropIntent::equip(ModuleId(1), "utility-bay"));

        let outcome = session.apply(DropIntent {
            module: ModuleId(1),
            target: DropTarget::parse("inventory"),
        });

        assert_eq!(
            outcome,
            IntentOutcome::Unequipped {
                module: ModuleId(1),
                from: BayId::from("utility-bay"),
            }
        );
        assert!(outcome.changed());
        assert!(session.assignment().is_empty());
        assert_eq!(
            session.apply(DropIntent::unequip(ModuleId(1))),
            IntentOutcome::Unchanged
        );
    }

    #[test]
    fn test_bay_occupants_follow_configured_order() {
        let mut session = session();
        session.equip(ModuleId(2), BayId::from("utility-bay"));

        let slots = session.bay_occupants();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].bay.id.as_str(), "weapon-bay");
        assert!(slots[0].occupant.is_none());
        assert_eq!(slots[1].occupant.map(|m| m.name.as_str()), Some("Railgun"));
    }

    #[test]
    fn test_module_detail() {
        let mut session = session();
        session.equip(ModuleId(1), BayId::from("weapon-bay"));

        let detail = session.module_detail(ModuleId(1)).unwrap();
        assert_eq!(detail.name, "Laser");
        assert_eq!(detail.tier_class, "module-tier-1");
        assert_eq!(
            detail.location,
            ModuleLocation::Equipped(BayId::from("weapon-bay"))
        );
        assert_eq!(detail.stats[0].label, "Power");
        assert!(session.module_detail(ModuleId(42)).is_none());
    }

    #[test]
    fn test_find_module_by_id_or_name() {
        let session = session();
        assert_eq!(session.find_module("2"), Some(ModuleId(2)));
        assert_eq!(session.find_module("Laser"), Some(ModuleId(1)));
        assert_eq!(session.find_module("7"), None);
        assert_eq!(session.find_module("Plasma"), None);
    }

    #[test]
    fn test_reset_returns_everything_to_inventory() {
        let mut session = session();
        session.equip(ModuleId(1), BayId::from("weapon-bay"));
        session.equip(ModuleId(2), BayId::from("utility-bay"));

        session.reset();

        assert_eq!(session.visible_inventory().len(), 2);
        assert_eq!(session.derived_stats().value("power"), Some(0.0));
    }

    #[test]
    fn test_drop_target_parse() {
        assert_eq!(DropTarget::parse(" inventory "), DropTarget::Inventory);
        assert_eq!(
            DropTarget::parse("weapon-bay"),
            DropTarget::Bay(BayId::from("weapon-bay"))
        );
    }

    #[test]
    fn test_failed_load_gives_empty_session() {
        use crate::adapters::LocalSource;

        let dir = tempfile::tempdir().unwrap();
        let loader = CatalogLoader::new(
            LocalSource::new(dir.path()),
            "modules.json",
            "stats.json",
        );
        let bays = vec![Bay::new("weapon-bay", "Weapon Bay")];

        let session = tokio_test::block_on(Session::load(&loader, bays));

        assert!(session.catalog().is_empty());
        assert!(session.visible_inventory().is_empty());
        assert!(session.derived_stats().is_empty());
        assert_eq!(session.bay_occupants().len(), 1);
    }
}
