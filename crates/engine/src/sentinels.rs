//! Sentinel option values.
//!
//! The option lists shown to the user double as error reporting: when a scan
//! finds nothing, or a core is missing, a human readable marker takes the place
//! of real entries. These helpers classify those markers so they are never
//! picked as a default and never make it into a session.

/// The auxiliary resource value meaning "no BIOS".
pub const NOT_APPLICABLE: &str = "N/A";

/// Marks a placeholder game entry.
pub const PLACEHOLDER_MARKER: &str = "placeholder";

/// Marks a "please choose something" entry.
pub const SELECTION_PROMPT_MARKER: &str = "Select ";

/// Prefix of a missing core marker.
pub const CORE_ERROR_PREFIX: &str = "ERROR_";

/// Prefix of a generic failure marker.
pub const ERROR_PREFIX: &str = "Error:";

pub const NO_ROMS_FOUND: &str = "Error: No ROMs found";
pub const NO_CORES_FOUND: &str = "Error: No Cores found";
pub const SELECT_SYSTEM_FIRST: &str = "Select a system first";
pub const SELECT_ROM: &str = "Select ROM for System";
pub const SELECT_CORE: &str = "Select Core for System";
pub const NODE_DISABLED: &str = "Node disabled: No Systems in Config";

const NO_ROMS_FOUND_FOR: &str = "No ROMs found";
const NO_CORES_FOUND_FOR: &str = "No Cores found";

/// The entry shown when `category` has no games in the catalog.
pub fn no_roms_for(category: &str) -> String {
    format!("{NO_ROMS_FOUND_FOR} for {category}")
}

/// The entry shown when `category` has no cores in the catalog.
pub fn no_cores_for(category: &str) -> String {
    format!("{NO_CORES_FOUND_FOR} for {category}")
}

/// The entry shown in place of a core whose data files are missing.
///
/// ```
/// assert_eq!(
///     engine::sentinels::core_missing("PC Engine", "mednafen_pce"),
///     "ERROR_CORE_DATA_MISSING_FOR_PC_ENGINE_(mednafen_pce)",
/// );
/// ```
pub fn core_missing(system: &str, core_stem: &str) -> String {
    let system = system.to_uppercase().replace(' ', "_");
    format!("{CORE_ERROR_PREFIX}CORE_DATA_MISSING_FOR_{system}_({core_stem})")
}

/// The placeholder game entry for a system with no games on disk.
pub fn rom_placeholder(rom_dir: &str, extension: &str) -> String {
    format!("roms/{rom_dir}/{PLACEHOLDER_MARKER}_select_a_rom{extension}")
}

pub fn is_placeholder(value: &str) -> bool {
    value.contains(PLACEHOLDER_MARKER)
}

pub fn is_selection_prompt(value: &str) -> bool {
    value.contains(SELECTION_PROMPT_MARKER) || value == NODE_DISABLED
}

/// Whether `value` reports that nothing (or something broken) was found.
pub fn is_none_found(value: &str) -> bool {
    value.starts_with(NO_ROMS_FOUND_FOR)
        || value.starts_with(NO_CORES_FOUND_FOR)
        || value.starts_with(ERROR_PREFIX)
}

/// Whether `value` is the entry shown for a category with no cores.
pub fn is_no_cores_found(value: &str) -> bool {
    value.starts_with(NO_CORES_FOUND_FOR)
}

pub fn is_core_error(value: &str) -> bool {
    value.starts_with(CORE_ERROR_PREFIX)
}

/// Whether `value` may be preselected in the game control.
pub fn is_selectable_rom(value: &str) -> bool {
    !is_placeholder(value) && !is_none_found(value)
}

/// Whether `value` may be preselected in the core control.
pub fn is_selectable_core(value: &str) -> bool {
    !is_core_error(value) && !is_none_found(value) && value != NOT_APPLICABLE
}

/// Whether a game value can't be used to start a session.
pub fn is_invalid_rom(value: &str) -> bool {
    value.is_empty() || is_placeholder(value) || is_selection_prompt(value) || is_none_found(value)
}

/// Whether a (normalized) core value can't be used to start a session.
pub fn is_invalid_core(value: &str) -> bool {
    value.is_empty()
        || is_core_error(value)
        || is_selection_prompt(value)
        || is_none_found(value)
        || is_placeholder(value)
}

/// Whether a BIOS value can't be used for a category that requires one.
pub fn is_invalid_bios(value: &str) -> bool {
    value.is_empty() || is_placeholder(value) || value == NOT_APPLICABLE
}
