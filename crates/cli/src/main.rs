mod args;
mod record;

use std::process::ExitCode;

use clap::Parser;
use engine::assets::AssetLibrary;
use engine::config::EngineConfig;
use engine::executor::{self, Executor, RunInputs};
use engine::node_definition::NodeDefinition;
use util::{debug_log_error, debug_log_info, eprintln_and_exit};

use args::{Args, Command};

const GENERIC_ERROR_MSG: &str = "Something went wrong.";

fn main() -> ExitCode {
    let args = Args::parse();

    #[cfg(debug_assertions)]
    {
        use util::debug_log;
        if args.no_debug_logging {
            debug_log::disable();
        } else if args.debug_error_log_panics {
            debug_log::panic_on_errors::enable();
        }
    }

    let mut config = match EngineConfig::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            debug_log_error!("Failed to load {}: {e}", args.config.display());
            eprintln_and_exit!("Couldn't load settings from {}: {e}", args.config.display());
        }
    };
    if let Some(assets_dir) = args.assets_dir {
        config.assets_dir = assets_dir;
    }
    let library = AssetLibrary::new(&config.assets_dir);

    match args.command {
        Command::Init => init(&library),
        Command::Catalog { pretty } => catalog(&library, pretty),
        Command::Definition => definition(&library, &config),
        Command::Run {
            record,
            node,
            output,
        } => run(library, &config, &record, node.as_deref(), &output),
    }
}

fn init(library: &AssetLibrary) -> ExitCode {
    match library.ensure_directories() {
        Ok(()) => {
            println!("Asset directories ready under {}.", library.root().display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn catalog(library: &AssetLibrary, pretty: bool) -> ExitCode {
    let catalog = library.gather_catalog();
    let json = if pretty {
        serde_json::to_string_pretty(&catalog)
    } else {
        serde_json::to_string(&catalog)
    };
    print_json(json)
}

fn definition(library: &AssetLibrary, config: &EngineConfig) -> ExitCode {
    let definition = NodeDefinition::from_library(library, config);
    print_json(serde_json::to_string_pretty(&definition))
}

fn print_json(json: serde_json::Result<String>) -> ExitCode {
    match json {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug_log_error!("Failed to serialize: {e}");
            eprintln!("{GENERIC_ERROR_MSG}");
            ExitCode::FAILURE
        }
    }
}

fn run(
    library: AssetLibrary,
    config: &EngineConfig,
    record_path: &std::path::Path,
    node: Option<&str>,
    output: &std::path::Path,
) -> ExitCode {
    let (id, record) = match record::load(record_path, node) {
        Ok(loaded) => loaded,
        Err(e) => eprintln_and_exit!("{e}"),
    };
    let inputs = match RunInputs::from_record(&record) {
        Ok(inputs) => inputs,
        Err(e) => eprintln_and_exit!("Node {id} has unusable inputs: {e}"),
    };

    debug_log_info!("Running node {id} ({}, {}).", inputs.system, inputs.game_rom_path);
    let result = Executor::new(library, config.surface_scale_factor).run(&inputs);
    println!("{}", result.status);

    if let Err(e) = executor::save_png(&result.image, output) {
        debug_log_error!("Failed to write {}: {e}", output.display());
        eprintln!("Couldn't write {}: {e}", output.display());
        return ExitCode::FAILURE;
    }
    println!("Wrote {}.", output.display());
    ExitCode::SUCCESS
}
