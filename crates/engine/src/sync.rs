//! Keeping the game, core and BIOS controls consistent with the selected
//! category.

use util::debug_log_error;

use crate::catalog::OptionCatalog;
use crate::host::NodeHost;
use crate::node::RetroEngineNode;
use crate::sentinels;
use crate::systems;

/// What the dependent controls should show for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependentSelection {
    pub roms: Vec<String>,
    pub rom: String,
    pub cores: Vec<String>,
    pub core: String,
    pub bios_visible: bool,
}

impl DependentSelection {
    /// Work out the dependent lists and their defaults. The lists are never
    /// empty.
    pub fn compute(catalog: &OptionCatalog, category: &str) -> Self {
        let bios_visible = systems::requires_bios(category);

        let Some(options) = catalog.get(category) else {
            return Self {
                roms: vec![sentinels::NO_ROMS_FOUND.to_string()],
                rom: sentinels::NO_ROMS_FOUND.to_string(),
                cores: vec![sentinels::NO_CORES_FOUND.to_string()],
                core: sentinels::NO_CORES_FOUND.to_string(),
                bios_visible,
            };
        };

        let roms = non_empty_or(&options.roms, || sentinels::no_roms_for(category));
        let cores = non_empty_or(&options.cores, || sentinels::no_cores_for(category));

        Self {
            rom: pick_default(&roms, sentinels::is_selectable_rom),
            core: pick_default(&cores, sentinels::is_selectable_core),
            roms,
            cores,
            bios_visible,
        }
    }
}

fn non_empty_or(list: &[String], sentinel: impl FnOnce() -> String) -> Vec<String> {
    if list.is_empty() {
        vec![sentinel()]
    } else {
        list.to_vec()
    }
}

/// The first entry that `qualifies`, else the first entry.
fn pick_default(list: &[String], qualifies: fn(&str) -> bool) -> String {
    list.iter()
        .find(|value| qualifies(value))
        .or_else(|| list.first())
        .cloned()
        .unwrap_or_default()
}

impl RetroEngineNode {
    /// Refill the dependent controls for `category`, show or hide the BIOS
    /// control, then resize and redraw. Does nothing (besides logging) if the
    /// catalog or the control handles are missing.
    pub fn synchronize(&mut self, category: &str, host: &mut dyn NodeHost) {
        let (Some(catalog), Some(dynamic)) = (&self.catalog, self.dynamic) else {
            debug_log_error!(
                "[Retro Engine Node {}] Cannot update dynamic widgets: missing options data or widget references.",
                self.id
            );
            return;
        };

        let selection = DependentSelection::compute(catalog, category);

        if let Some(rom) = self.controls.get_mut(dynamic.rom) {
            rom.set_options(selection.roms);
            rom.set_value(selection.rom);
        }
        if let Some(core) = self.controls.get_mut(dynamic.core) {
            core.set_options(selection.cores);
            core.set_value(selection.core);
        }
        if let Some(bios) = self.controls.get_mut(dynamic.bios) {
            if selection.bios_visible {
                bios.show();
            } else {
                bios.hide();
            }
        }

        self.fit_to_contents();
        host.set_dirty_canvas(true, true);
        host.set_graph_dirty();
    }

    /// The category control's change callback: store the new value and
    /// synchronize.
    pub fn select_category(&mut self, category: &str, host: &mut dyn NodeHost) {
        if let Some(control) = self
            .dynamic
            .and_then(|dynamic| self.controls.get_mut(dynamic.category))
        {
            control.set_value(category);
        }
        self.synchronize(category, host);
    }
}
