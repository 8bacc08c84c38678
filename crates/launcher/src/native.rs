use std::path::PathBuf;
use std::process::ExitCode;

use bevy::prelude::KeyCode;
use clap::{Parser, ValueEnum};
use dimmer_shared::config::{ConfigError, DimmerConfig};

use crate::app::{LaunchSettings, create_dimmer_app};
use crate::scene::DemoScene;

#[derive(Parser, Debug)]
#[command(name = "light-toggle")]
#[command(version = "0.1")]
#[command(about = "Dims and restores scene lights with a single key")]
#[command(long_about = "
Dims and restores scene lights with a single key

EXAMPLES:
    cargo run --bin light-toggle                                # Demo room, Space toggles
    cargo run --bin light-toggle -- --key l --fade-duration 2.5 # Slower fades on L
    cargo run --bin light-toggle -- --config dimmer.json        # Per-light dim targets
    cargo run --bin light-toggle -- --print-default-config      # Config file template
")]
pub struct Cli {
    #[arg(short, long)]
    #[arg(help = "JSON dimmer config with fade duration and per-light overrides")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    #[arg(help = "Fade duration in seconds, overrides the config file")]
    pub fade_duration: Option<f32>,

    #[arg(short, long, value_enum, default_value_t = ToggleKeyArg::Space)]
    pub key: ToggleKeyArg,

    #[arg(long, default_value_t = 0)]
    #[arg(help = "Number of randomly placed extra point lights")]
    pub extra_lights: usize,

    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    #[arg(long, default_value_t = false)]
    #[arg(help = "Open the egui world inspector")]
    pub inspector: bool,

    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    #[arg(long, default_value_t = false)]
    pub print_default_config: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToggleKeyArg {
    Space,
    Enter,
    L,
    T,
}

impl From<ToggleKeyArg> for KeyCode {
    fn from(key: ToggleKeyArg) -> Self {
        match key {
            ToggleKeyArg::Space => KeyCode::Space,
            ToggleKeyArg::Enter => KeyCode::Enter,
            ToggleKeyArg::L => KeyCode::KeyL,
            ToggleKeyArg::T => KeyCode::KeyT,
        }
    }
}

impl Cli {
    pub fn dimmer_config(&self) -> Result<DimmerConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => DimmerConfig::load(path)?,
            None => DimmerConfig::default(),
        };

        if let Some(secs) = self.fade_duration {
            config.fade_duration_secs = secs;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn launch_settings(&self) -> Result<LaunchSettings, ConfigError> {
        let config = self.dimmer_config()?;
        let dimmer = config.build_dimmer()?;

        Ok(LaunchSettings {
            scene: DemoScene {
                dimmer,
                extra_lights: self.extra_lights,
                seed: self.seed,
            },
            toggle_key: self.key.into(),
            headless: false,
            inspector: self.inspector,
            log_filter: if self.verbose {
                "info,dimmer_shared=debug,dimmer_client=debug,wgpu=error,naga=warn".to_string()
            } else {
                LaunchSettings::default().log_filter
            },
        })
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if cli.print_default_config {
        return match DimmerConfig::default().to_json_pretty() {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("❌ {err}");
                ExitCode::FAILURE
            }
        };
    }

    let settings = match cli.launch_settings() {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("❌ {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut app = create_dimmer_app(settings);
    if app.run().is_error() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
