//! The table of emulated systems (categories) the node knows about.

/// How one system's assets are laid out and which emulator core runs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SystemConfig {
    /// The category name shown in the `system` control.
    pub name: &'static str,

    /// Sub-directory of `roms/` holding this system's games.
    pub rom_dir: &'static str,

    /// File extensions (with the leading `.`) that count as games.
    pub extensions: &'static [&'static str],

    /// File name prefix of the core's `.data` files.
    pub core_stem: &'static str,

    /// Extension of the placeholder entry shown when no games are found.
    pub placeholder_extension: &'static str,
}

/// The category selected by default when it exists.
pub const DEFAULT_SYSTEM: &str = "PlayStation";

/// Categories that cannot run without a BIOS image.
pub const BIOS_REQUIRED: [&str; 4] = ["PlayStation", "SegaCD", "SegaSaturn", "3DO"];

const ARCHIVES: [&str; 3] = [".7z", ".zip", ".rar"];

macro_rules! system {
    ($name:literal, $dir:literal, [$($ext:literal),* $(,)?], $core:literal, $placeholder:literal) => {
        SystemConfig {
            name: $name,
            rom_dir: $dir,
            extensions: &[$($ext,)* ARCHIVES[0], ARCHIVES[1], ARCHIVES[2]],
            core_stem: $core,
            placeholder_extension: $placeholder,
        }
    };
}

/// Every supported system.
pub const SYSTEMS: &[SystemConfig] = &[
    system!("PlayStation", "ps1", [".cue", ".bin", ".iso", ".img", ".chd"], "pcsx_rearmed", ".cue"),
    system!("GameBoyAdvance", "gba", [".gba"], "mgba", ".gba"),
    system!("NES", "nes", [".nes"], "fceumm", ".nes"),
    system!("SNES", "snes", [".smc", ".sfc", ".fig"], "snes9x", ".smc"),
    system!("N64", "n64", [".n64", ".z64", ".v64"], "mupen64plus_next", ".n64"),
    system!("MegaDrive", "md", [".md", ".smd", ".gen"], "genesis_plus_gx", ".md"),
    system!("GameBoy", "gb", [".gb", ".gbc"], "gambatte", ".gb"),
    system!("VirtualBoy", "vb", [".vb"], "beetle_vb", ".vb"),
    system!("NintendoDS", "nds", [".nds"], "melonds", ".nds"),
    system!("Atari2600", "a2600", [".a26", ".bin"], "stella2014", ".a26"),
    system!("Atari5200", "a5200", [".a52", ".bin"], "a5200", ".a52"),
    system!("Atari7800", "a7800", [".a78"], "prosystem", ".a78"),
    system!("AtariJaguar", "jaguar", [".j64", ".jag"], "virtualjaguar", ".j64"),
    system!("AtariLynx", "lynx", [".lnx"], "handy", ".lnx"),
    system!("ColecoVision", "coleco", [".col", ".rom"], "gearcoleco", ".col"),
    system!("SegaMasterSystem", "sms", [".sms"], "smsplus", ".sms"),
    system!("SegaGameGear", "gg", [".gg"], "genesis_plus_gx", ".gg"),
    system!("Sega32X", "sega32x", [".32x"], "picodrive", ".32x"),
    system!("SegaCD", "segacd", [".cue", ".iso", ".chd"], "genesis_plus_gx", ".cue"),
    system!("SegaSaturn", "saturn", [".cue", ".iso", ".chd"], "yabause", ".cue"),
    system!("3DO", "3do", [".iso", ".cue", ".chd"], "opera", ".iso"),
    system!("Arcade", "arcade", [], "fbneo", ".zip"),
    system!("MAME2003", "mame2003", [], "mame2003", ".zip"),
    system!("PSP", "psp", [".iso", ".cso", ".pbp"], "ppsspp", ".iso"),
    system!("PC Engine", "pce", [".pce", ".cue", ".iso"], "mednafen_pce", ".pce"),
    system!("PC-FX", "pcfx", [".cue", ".iso", ".chd"], "mednafen_pcfx", ".cue"),
    system!("NeoGeo Pocket", "ngp", [".ngp", ".ngc"], "mednafen_ngp", ".ngp"),
    system!("WonderSwan", "ws", [".ws", ".wsc"], "mednafen_wswan", ".ws"),
    system!("Commodore64", "c64", [".d64", ".t64", ".prg", ".crt", ".tap"], "vice_x64sc", ".d64"),
    system!("Commodore128", "c128", [".d81", ".d64"], "vice_x128", ".d81"),
    system!("Amiga", "amiga", [".adf", ".ipf", ".rp9"], "puae", ".adf"),
    system!("CommodorePET", "pet", [".t64", ".prg"], "vice_xpet", ".prg"),
    system!("CommodorePlus4", "plus4", [".t64", ".prg"], "vice_xplus4", ".prg"),
    system!("CommodoreVIC20", "vic20", [".t64", ".prg"], "vice_xvic", ".prg"),
];

/// Look up a system by its category name.
pub fn system(name: &str) -> Option<&'static SystemConfig> {
    SYSTEMS.iter().find(|system| system.name == name)
}

/// All category names, sorted.
pub fn system_names() -> Vec<&'static str> {
    let mut names: Vec<_> = SYSTEMS.iter().map(|system| system.name).collect();
    names.sort_unstable();
    names
}

/// Whether `category` needs an auxiliary (BIOS) resource to run.
pub fn requires_bios(category: &str) -> bool {
    BIOS_REQUIRED.contains(&category)
}
