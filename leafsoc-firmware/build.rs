//! Build script for leafsoc-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates leafsoc.toml and turns it into `config.rs` in OUT_DIR

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use leafsoc_core::config::{
    AlertConfig, Calibration, DashboardConfig, EstimatorConfig, InputConfig, PanelConfig,
    StorageConfig,
};
use serde::Deserialize;

/// Layout of leafsoc.toml
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    calibration: Calibration,
    estimator: EstimatorConfig,
    alert: AlertConfig,
    input: InputConfig,
    panel: PanelConfig,
    storage: StorageConfig,
    board: BoardSection,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BoardSection {
    can_crystal_mhz: u8,
    cycle_ms: u32,
}

fn main() {
    setup_linker();
    generate_config();
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    println!("cargo:rustc-link-search={}", out_dir.display());
    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate leafsoc.toml and emit it as Rust constants
fn generate_config() {
    println!("cargo:rerun-if-changed=leafsoc.toml");

    let config_path = Path::new("leafsoc.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: leafsoc.toml not found!                                  ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a leafsoc.toml configuration file.        ║\n\
            ║  Please create one in the leafsoc-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read leafsoc.toml                              ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let file: ConfigFile = match toml::from_str(&content) {
        Ok(file) => file,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid leafsoc.toml                                     ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    let dashboard = DashboardConfig {
        calibration: file.calibration,
        estimator: file.estimator,
        alert: file.alert,
        input: file.input,
        panel: file.panel,
        storage: file.storage,
    };

    let mut errors = Vec::new();
    if let Err(e) = dashboard.validate() {
        errors.push(e.to_string());
    }
    if !matches!(file.board.can_crystal_mhz, 8 | 16) {
        errors.push("[board] can_crystal_mhz must be 8 or 16".to_string());
    }
    if !(20..=1000).contains(&file.board.cycle_ms) {
        errors.push("[board] cycle_ms must be 20-1000".to_string());
    }
    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in leafsoc.toml                    ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(
        out_dir.join("config.rs"),
        render_config(&dashboard, &file.board),
    )
    .unwrap();

    println!("cargo:warning=leafsoc.toml validated successfully");
}

/// Rust source for the validated configuration
fn render_config(config: &DashboardConfig, board: &BoardSection) -> String {
    let timing = match board.can_crystal_mhz {
        16 => "KBPS500_16MHZ",
        _ => "KBPS500_8MHZ",
    };

    let mut out = String::new();
    writeln!(out, "// Generated from leafsoc.toml").unwrap();
    writeln!(out, "pub const CONFIG: DashboardConfig = DashboardConfig {{").unwrap();
    writeln!(
        out,
        "    calibration: Calibration {{ zero_point: Gids::new({:?}), full_point: Gids::new({:?}) }},",
        config.calibration.zero_point.get(),
        config.calibration.full_point.get()
    )
    .unwrap();
    writeln!(
        out,
        "    estimator: EstimatorConfig {{ kwh_per_gid: {:?}, gids_per_km: {:?} }},",
        config.estimator.kwh_per_gid, config.estimator.gids_per_km
    )
    .unwrap();
    writeln!(
        out,
        "    alert: AlertConfig {{ low_gids: Gids::new({:?}) }},",
        config.alert.low_gids.get()
    )
    .unwrap();
    writeln!(
        out,
        "    input: InputConfig {{ debounce_ms: {}, long_press_ms: {} }},",
        config.input.debounce_ms, config.input.long_press_ms
    )
    .unwrap();
    writeln!(
        out,
        "    panel: PanelConfig {{ max_fan_speed: {} }},",
        config.panel.max_fan_speed
    )
    .unwrap();
    writeln!(
        out,
        "    storage: StorageConfig {{ page_address: {} }},",
        config.storage.page_address
    )
    .unwrap();
    writeln!(out, "}};").unwrap();
    writeln!(out, "pub const CAN_TIMING: BitTiming = BitTiming::{};", timing).unwrap();
    writeln!(out, "pub const CYCLE_MS: u64 = {};", board.cycle_ms).unwrap();
    out
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
