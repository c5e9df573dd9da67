use serde::{Deserialize, Serialize};
use std::path::Path;
use anyhow::Result;

use crate::domains::simulation::{GameRules, RobotType, SetupRules, StrategyKind, TaskType};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimulationConfig,
    pub rules: GameRules,
    pub logging: LoggingConfig,
    pub demo: DemoConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub base_tick_period_ms: u64,
    pub default_speed_multiplier: f64,
    pub hazard_count: usize,
    /// Fixed seed for hazard placement; random when absent.
    pub hazard_seed: Option<u64>,
    pub min_dimension: usize,
    pub max_dimension: usize,
    pub zone_radius: i32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub rows: usize,
    pub cols: usize,
    pub budget: u32,
    pub strategy: StrategyKind,
    pub robots: Vec<RobotPlacement>,
    pub items: Vec<ItemPlacement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotPlacement {
    #[serde(rename = "type")]
    pub robot_type: RobotType,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPlacement {
    #[serde(rename = "type")]
    pub item_type: TaskType,
    pub x: i32,
    pub y: i32,
}

impl Config {
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Defaults, overlaid by an optional TOML file, overlaid by
    /// `GRIDBOTS__SECTION__KEY` environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(false));
        }
        let config = builder
            .add_source(
                ::config::Environment::with_prefix("GRIDBOTS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        Ok(config)
    }

    pub fn setup_rules(&self) -> SetupRules {
        SetupRules {
            min_dimension: self.simulation.min_dimension,
            max_dimension: self.simulation.max_dimension,
            hazard_count: self.simulation.hazard_count,
            zone_radius: self.simulation.zone_radius,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            base_tick_period_ms: 1000,
            default_speed_multiplier: 1.0,
            hazard_count: 3,
            hazard_seed: None,
            min_dimension: 8,
            max_dimension: 160,
            zone_radius: 5,
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            budget: 500,
            strategy: StrategyKind::NearestRobot,
            robots: vec![RobotPlacement {
                robot_type: RobotType::CerberusBasic,
                x: 0,
                y: 0,
            }],
            items: vec![ItemPlacement {
                item_type: TaskType::Garbage,
                x: 0,
                y: 3,
            }],
        }
    }
}
