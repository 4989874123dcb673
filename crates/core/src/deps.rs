//! Dependency evaluation: which menus are active for a settings record.
//!
//! Activity composes transitively: a menu inside an inactive branch is
//! inactive regardless of its own condition. A dependency on an undeclared
//! menu fails closed (permanently inactive) rather than erroring, so one
//! bad declaration never aborts rendering of the rest of the form.

use embedkit_types::{Settings, Template};
use std::collections::HashSet;

/// Whether `menu_id` is active (visible/editable) for `settings`.
///
/// `settings` is read as a resolved record: a key missing from it falls
/// back to the referenced menu's declared default. Never panics and never
/// errors; undeclared ids and (defensively) cyclic chains evaluate to
/// inactive.
pub fn is_active(template: &Template, settings: &Settings, menu_id: &str) -> bool {
    let mut visited = HashSet::new();
    active_guarded(template, settings, menu_id, &mut visited)
}

fn active_guarded<'a>(
    template: &'a Template,
    settings: &Settings,
    menu_id: &'a str,
    visited: &mut HashSet<&'a str>,
) -> bool {
    // Cycles are rejected at registration; fail closed if one slips in.
    if !visited.insert(menu_id) {
        return false;
    }
    let Some(menu) = template.menu(menu_id) else {
        return false;
    };
    let Some(dep) = &menu.depends_on else {
        return true;
    };
    let Some(target) = template.menu(&dep.menu_id) else {
        log::debug!(
            "menu `{}` depends on undeclared menu `{}`; treating as inactive",
            menu_id,
            dep.menu_id
        );
        return false;
    };
    let value = settings
        .get(&target.id)
        .cloned()
        .unwrap_or_else(|| target.default_value.clone());
    dep.condition.matches(&value) && active_guarded(template, settings, &dep.menu_id, visited)
}

/// The set of active menu ids for `settings`.
pub fn active_menus(template: &Template, settings: &Settings) -> HashSet<String> {
    template
        .menus()
        .into_iter()
        .filter(|menu| is_active(template, settings, &menu.id))
        .map(|menu| menu.id.clone())
        .collect()
}
