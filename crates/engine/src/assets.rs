//! Defines [AssetLibrary], the on-disk tree of games, BIOS images and emulator
//! cores the option catalog is built from.
//!
//! ```text
//! <root>/
//!     roms/<system rom_dir>/**     games
//!     bios/**                      BIOS images (.bin, .rom)
//!     emulator_core/data/cores/    <core stem>*.data
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use util::{debug_log_error, debug_log_info};

use crate::catalog::{CategoryOptions, OptionCatalog};
use crate::errors::LibraryError;
use crate::sentinels;
use crate::systems::{self, SYSTEMS, SystemConfig};

/// BIOS image extensions.
pub const BIOS_EXTENSIONS: [&str; 2] = [".bin", ".rom"];

/// Extension of an emulator core's data files.
pub const CORE_DATA_EXTENSION: &str = ".data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLibrary {
    root: PathBuf,
}

impl AssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn roms_dir(&self, system: &SystemConfig) -> PathBuf {
        self.root.join("roms").join(system.rom_dir)
    }

    pub fn bios_dir(&self) -> PathBuf {
        self.root.join("bios")
    }

    pub fn cores_dir(&self) -> PathBuf {
        self.emulator_data_dir().join("cores")
    }

    fn emulator_data_dir(&self) -> PathBuf {
        self.root.join("emulator_core").join("data")
    }

    /// Turn a catalog entry (relative, `/` separated) back into a path.
    pub fn resolve(&self, entry: &str) -> PathBuf {
        entry
            .split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }

    /// Create every directory the library expects (one per system plus the
    /// BIOS and core directories).
    pub fn ensure_directories(&self) -> Result<(), LibraryError> {
        let dirs = SYSTEMS
            .iter()
            .map(|system| self.roms_dir(system))
            .chain([
                self.bios_dir(),
                self.cores_dir(),
                self.emulator_data_dir().join("compression"),
            ]);

        for dir in dirs {
            fs::create_dir_all(&dir).map_err(|e| LibraryError::IoError(dir.clone(), e))?;
        }

        debug_log_info!("Ensured all asset directories exist under {}.", self.root.display());
        Ok(())
    }

    /// The game entries for `category`, sorted. A placeholder entry stands in
    /// when there are none.
    pub fn roms_for(&self, category: &str) -> Vec<String> {
        let Some(system) = systems::system(category) else {
            debug_log_error!("Invalid system name '{category}' asked for its ROMs.");
            return vec![sentinels::SELECT_SYSTEM_FIRST.to_string()];
        };

        let roms = self.list_files(&self.roms_dir(system), system.extensions);
        if roms.is_empty() {
            return vec![sentinels::rom_placeholder(
                system.rom_dir,
                system.placeholder_extension,
            )];
        }
        roms
    }

    /// The core entries for `category`: the core's stem if its data files are
    /// present, a missing-core marker otherwise.
    pub fn cores_for(&self, category: &str) -> Vec<String> {
        let Some(system) = systems::system(category) else {
            debug_log_error!("Invalid system name '{category}' asked for its cores.");
            return vec![sentinels::SELECT_SYSTEM_FIRST.to_string()];
        };

        if system.core_stem.is_empty() {
            return vec![sentinels::NOT_APPLICABLE.to_string()];
        }

        if self.core_data_present(system.core_stem) {
            vec![system.core_stem.to_string()]
        } else {
            debug_log_error!(
                "Core data files missing for '{}' (stem: '{}'). Expected at: {}",
                system.name,
                system.core_stem,
                self.cores_dir()
                    .join(format!("{}*{CORE_DATA_EXTENSION}", system.core_stem))
                    .display()
            );
            vec![sentinels::core_missing(system.name, system.core_stem)]
        }
    }

    fn core_data_present(&self, core_stem: &str) -> bool {
        let Ok(entries) = fs::read_dir(self.cores_dir()) else {
            return false;
        };

        entries.flatten().any(|entry| {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            name.starts_with(core_stem)
                && name.ends_with(CORE_DATA_EXTENSION)
                && entry.path().is_file()
        })
    }

    /// BIOS images found on disk, sorted.
    pub fn bios_files(&self) -> Vec<String> {
        self.list_files(&self.bios_dir(), &BIOS_EXTENSIONS)
    }

    /// [AssetLibrary::bios_files] followed by the "no BIOS" entry.
    pub fn bios_options(&self) -> Vec<String> {
        let mut options = self.bios_files();
        options.push(sentinels::NOT_APPLICABLE.to_string());
        options
    }

    /// Scan everything into an [OptionCatalog].
    pub fn gather_catalog(&self) -> OptionCatalog {
        SYSTEMS
            .iter()
            .map(|system| {
                let options = CategoryOptions {
                    roms: self.roms_for(system.name),
                    cores: self.cores_for(system.name),
                };
                (system.name.to_string(), options)
            })
            .collect()
    }

    /// Every file under `dir` (recursively) whose name ends in one of
    /// `extensions`, as sorted, unique, `/` separated paths relative to the
    /// library root. A missing directory has no files.
    fn list_files(&self, dir: &Path, extensions: &[&str]) -> Vec<String> {
        let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

        let mut files = Vec::new();
        if dir.exists() {
            self.scan_directory(dir, &extensions, &mut files);
        }

        files.sort();
        files.dedup();
        files
    }

    fn scan_directory(&self, current_path: &Path, extensions: &[String], files: &mut Vec<String>) {
        let entries = match fs::read_dir(current_path) {
            Ok(entries) => entries,
            Err(e) => {
                debug_log_error!("Failed to read {}: {e}", current_path.display());
                return;
            }
        };

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    debug_log_error!("Failed to read an entry of {}: {e}", current_path.display());
                    continue;
                }
            };

            if path.is_dir() {
                self.scan_directory(&path, extensions, files);
                continue;
            }

            let Some(name) = path.file_name().map(|n| n.to_string_lossy().to_lowercase()) else {
                continue;
            };
            if !extensions.iter().any(|ext| name.ends_with(ext.as_str())) {
                continue;
            }

            match self.relative_entry(&path) {
                Some(entry) => files.push(entry),
                None => debug_log_error!(
                    "Cannot create relative path for '{}' from '{}'.",
                    path.display(),
                    self.root.display()
                ),
            }
        }
    }

    fn relative_entry(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let parts: Vec<_> = relative
            .components()
            .map(|part| part.as_os_str().to_string_lossy())
            .collect();
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn roms_are_found_recursively_and_relative() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "roms/nes/b.nes");
        touch(dir.path(), "roms/nes/hacks/a.NES");
        touch(dir.path(), "roms/nes/c.zip");
        touch(dir.path(), "roms/nes/readme.txt");

        let library = AssetLibrary::new(dir.path());
        assert_eq!(
            library.roms_for("NES"),
            vec!["roms/nes/b.nes", "roms/nes/c.zip", "roms/nes/hacks/a.NES"]
        );
    }

    #[test]
    fn files_matching_two_extensions_are_listed_once() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "roms/a2600/pitfall.bin");

        let library = AssetLibrary::new(dir.path());
        assert_eq!(library.roms_for("Atari2600"), vec!["roms/a2600/pitfall.bin"]);
    }

    #[test]
    fn empty_system_gets_a_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let library = AssetLibrary::new(dir.path());

        assert_eq!(
            library.roms_for("PlayStation"),
            vec!["roms/ps1/placeholder_select_a_rom.cue"]
        );
        assert_eq!(
            library.roms_for("Nope"),
            vec![sentinels::SELECT_SYSTEM_FIRST]
        );
    }

    #[test]
    fn cores_need_their_data_files() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "emulator_core/data/cores/fceumm-wasm.data");

        let library = AssetLibrary::new(dir.path());
        assert_eq!(library.cores_for("NES"), vec!["fceumm"]);
        assert_eq!(
            library.cores_for("SNES"),
            vec!["ERROR_CORE_DATA_MISSING_FOR_SNES_(snes9x)"]
        );
    }

    #[test]
    fn bios_options_end_with_not_applicable() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "bios/scph5501.bin");
        touch(dir.path(), "bios/3do/panafz10.rom");
        touch(dir.path(), "bios/notes.md");

        let library = AssetLibrary::new(dir.path());
        assert_eq!(
            library.bios_options(),
            vec!["bios/3do/panafz10.rom", "bios/scph5501.bin", "N/A"]
        );
    }

    #[test]
    fn catalog_covers_every_system() {
        let dir = tempfile::tempdir().unwrap();
        let library = AssetLibrary::new(dir.path());
        library.ensure_directories().unwrap();
        assert!(dir.path().join("roms/ps1").is_dir());
        assert!(dir.path().join("emulator_core/data/compression").is_dir());

        let catalog = library.gather_catalog();
        assert_eq!(catalog.categories().count(), SYSTEMS.len());
        assert!(catalog.categories().all(|(_, options)| {
            options.roms.len() == 1 && options.cores.len() == 1
        }));
    }

    #[test]
    fn entries_resolve_back_to_paths() {
        let library = AssetLibrary::new("/assets");
        assert_eq!(
            library.resolve("roms/nes/a.nes"),
            Path::new("/assets").join("roms").join("nes").join("a.nes")
        );
    }
}
