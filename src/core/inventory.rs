use crate::core::assignment::Assignment;
use crate::domain::model::ModuleDef;

/// Catalog modules that are not equipped, in catalog order.
pub fn visible_inventory<'a>(
    assignment: &Assignment,
    module_defs: &'a [ModuleDef],
) -> Vec<&'a ModuleDef> {
    module_defs
        .iter()
        .filter(|m| !assignment.is_equipped(m.id))
        .collect()
}
