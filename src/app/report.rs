use crate::core::session::{ModuleDetail, ModuleLocation, Session};
use crate::domain::model::{ModuleDef, ModuleId};
use crate::utils::error::Result;
use crate::utils::text::pretty_label;
use serde::Serialize;
use std::fmt::Write;

const BAR_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleEntry {
    pub id: ModuleId,
    pub name: String,
    pub tier: String,
    pub tier_class: String,
}

impl From<&ModuleDef> for ModuleEntry {
    fn from(def: &ModuleDef) -> Self {
        Self {
            id: def.id,
            name: def.name.clone(),
            tier: def.tier.clone(),
            tier_class: def.tier_class(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BayRow {
    pub id: String,
    pub label: String,
    pub occupant: Option<ModuleEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRow {
    pub name: String,
    pub label: String,
    pub value: f64,
    pub max: Option<f64>,
    pub percent: f64,
}

/// Snapshot of a session for rendering. Never fed back into the session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShipReport {
    pub inventory: Vec<ModuleEntry>,
    pub bays: Vec<BayRow>,
    pub stats: Vec<StatRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ModuleDetail>,
}

impl ShipReport {
    pub fn build(session: &Session) -> Self {
        let inventory = session
            .visible_inventory()
            .into_iter()
            .map(ModuleEntry::from)
            .collect();

        let bays = session
            .bay_occupants()
            .into_iter()
            .map(|slot| BayRow {
                id: slot.bay.id.to_string(),
                label: slot.bay.label.clone(),
                occupant: slot.occupant.map(ModuleEntry::from),
            })
            .collect();

        let stats = session
            .derived_stats()
            .iter()
            .map(|s| StatRow {
                name: s.name.clone(),
                label: pretty_label(&s.name),
                value: s.value,
                max: s.max,
                percent: s.percent(),
            })
            .collect();

        Self {
            inventory,
            bays,
            stats,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Option<ModuleDetail>) -> Self {
        self.detail = detail;
        self
    }
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}

pub fn render_text(report: &ShipReport) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Inventory ({}):", report.inventory.len());
    if report.inventory.is_empty() {
        let _ = writeln!(out, "  (empty)");
    }
    for entry in &report.inventory {
        let _ = writeln!(out, "  #{:<4} {} [{}]", entry.id, entry.name, entry.tier);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Bays:");
    for bay in &report.bays {
        let occupant = bay
            .occupant
            .as_ref()
            .map(|m| format!("#{} {}", m.id, m.name))
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(out, "  {:<20} {}", bay.label, occupant);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Ship stats:");
    let width = report
        .stats
        .iter()
        .map(|s| s.label.len())
        .max()
        .unwrap_or(0);
    for stat in &report.stats {
        let max = stat
            .max
            .map(|m| format!("{}", m))
            .unwrap_or_else(|| "?".to_string());
        let _ = writeln!(
            out,
            "  {:<width$} {:>8} / {:<8} {} {:>5.1}%",
            stat.label,
            stat.value,
            max,
            progress_bar(stat.percent),
            stat.percent,
            width = width
        );
    }

    if let Some(detail) = &report.detail {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", detail.name);
        let _ = writeln!(out, "  Tier: {}", detail.tier);
        let location = match &detail.location {
            ModuleLocation::Inventory => "inventory".to_string(),
            ModuleLocation::Equipped(bay) => bay.to_string(),
        };
        let _ = writeln!(out, "  Location: {}", location);
        for line in &detail.stats {
            let _ = writeln!(out, "  {}: {}", line.label, line.delta);
        }
    }

    out
}

pub fn render_json(report: &ShipReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// One row per ship stat.
pub fn render_csv(report: &ShipReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["stat", "label", "value", "max", "percent"])?;
    for stat in &report.stats {
        writer.write_record([
            stat.name.clone(),
            stat.label.clone(),
            stat.value.to_string(),
            stat.max.map(|m| m.to_string()).unwrap_or_default(),
            format!("{:.1}", stat.percent),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| crate::utils::error::FitterError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
