//! Build script for bobin-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates winder.toml at compile time
//! - Generates the `WINDER_CONFIG` constant the binary boots with

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use bobin_core::config::{ConfigError, WinderConfig};

/// Top-level tables winder.toml may contain
const KNOWN_SECTIONS: [&str; 4] = ["timing", "speed", "link", "homing"];

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    setup_linker(&out_dir);
    let config = load_config();
    write_config(&out_dir, &config);
}

/// Set up linker search paths for memory.x
fn setup_linker(out_dir: &Path) {
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).expect("create memory.x");
    f.write_all(memory_x).expect("write memory.x");

    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

/// Parse and validate winder.toml
fn load_config() -> WinderConfig {
    println!("cargo:rerun-if-changed=winder.toml");

    let config_path = Path::new("winder.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: winder.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a winder.toml configuration file.         ║\n\
            ║  Please create one in the bobin-firmware directory; an empty     ║\n\
            ║  file selects the default panel behavior.                        ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read winder.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Syntax first, so a typo is reported as such rather than as a type error
    let raw: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in winder.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    validate_sections(&raw);

    let config: WinderConfig = match toml::from_str(&config_content) {
        Ok(config) => config,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Wrong value type in winder.toml                          ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                {}\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&e.to_string())
            );
        }
    };

    if let Err(e) = config.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid configuration in winder.toml                     ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            ║  • {:<62} ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            describe(e)
        );
    }

    println!("cargo:warning=winder.toml validated successfully");
    config
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

/// Reject misspelled sections, which serde would otherwise skip silently
fn validate_sections(config: &toml::Value) {
    let table = match config {
        toml::Value::Table(t) => t,
        _ => return,
    };

    let mut errors = Vec::new();

    for (name, value) in table {
        if !KNOWN_SECTIONS.contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Unexpected sections in winder.toml                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ║                                                                  ║\n\
            ║  Valid sections: [timing] [speed] [link] [homing]                ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

fn describe(error: ConfigError) -> String {
    match error {
        ConfigError::ZeroInterval => "a debounce, refresh or poll interval is zero".to_string(),
        ConfigError::EmptyInputRange => "[speed] input_min must be below input_max".to_string(),
        ConfigError::EmptyOutputRange => "[speed] output_min must be below output_max".to_string(),
        ConfigError::UnsupportedBaudRate(baud) => {
            format!("[link] baud {} is not 57600 or 115200", baud)
        }
    }
}

/// Emit `WINDER_CONFIG` as a const initializer
fn write_config(out_dir: &Path, config: &WinderConfig) {
    let t = &config.timing;
    let s = &config.speed;
    let l = &config.link;
    let h = &config.homing;

    let source = format!(
        "pub const WINDER_CONFIG: WinderConfig = WinderConfig {{\n    \
            timing: TimingConfig {{\n        \
                sensor_debounce_ms: {},\n        \
                refresh_ms: {},\n        \
                home_poll_ms: {},\n        \
                splash_char_ms: {},\n        \
                splash_hold_ms: {},\n    \
            }},\n    \
            speed: SpeedConfig {{\n        \
                throttled: {},\n        \
                throttle_ms: {},\n        \
                input_min: {},\n        \
                input_max: {},\n        \
                output_min: {},\n        \
                output_max: {},\n    \
            }},\n    \
            link: LinkConfig {{\n        \
                baud: {},\n        \
                mirror_received: {},\n    \
            }},\n    \
            homing: HomingConfig {{\n        \
                enabled: {},\n    \
            }},\n\
        }};\n",
        t.sensor_debounce_ms,
        t.refresh_ms,
        t.home_poll_ms,
        t.splash_char_ms,
        t.splash_hold_ms,
        s.throttled,
        s.throttle_ms,
        s.input_min,
        s.input_max,
        s.output_min,
        s.output_max,
        l.baud,
        l.mirror_received,
        h.enabled,
    );

    let mut f = File::create(out_dir.join("winder_config.rs")).expect("create winder_config.rs");
    f.write_all(source.as_bytes()).expect("write winder_config.rs");
}
