use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::tick_driver::TickDriver;
use crate::common::{ApplicationResult, DomainError, DomainResult};
use crate::config::Config;
use crate::domains::logger::DynLogger;
use crate::domains::simulation::{
    Coordinate, GameStatus, Robot, RobotType, SetupRules, SimulationEngine, SimulationState,
    SimulationSummary, StrategyKind, Task, TaskType,
};

/// Driver-facing control actions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    Pause,
    Resume,
    Reset,
    SetSpeed(f64),
}

impl ControlAction {
    pub fn parse(action: &str, value: Option<f64>) -> DomainResult<Self> {
        match (action, value) {
            ("PAUSE", _) => Ok(ControlAction::Pause),
            ("RESUME", _) => Ok(ControlAction::Resume),
            ("RESET", _) => Ok(ControlAction::Reset),
            ("SET_SPEED", Some(multiplier)) => Ok(ControlAction::SetSpeed(multiplier)),
            ("SET_SPEED", None) => Err(DomainError::InvalidCommand {
                reason: "SET_SPEED requires a value".to_string(),
            }),
            (other, _) => Err(DomainError::InvalidCommand {
                reason: format!("Invalid control action: {}", other),
            }),
        }
    }
}

/// The driving layer: owns the one session, the engine and the tick driver.
pub struct SimulationService {
    config: Config,
    setup_rules: SetupRules,
    engine: SimulationEngine,
    session: Arc<Mutex<SimulationState>>,
    driver: Mutex<Option<TickDriver>>,
    logger: DynLogger,
}

impl SimulationService {
    pub fn new(config: Config, logger: DynLogger) -> Self {
        let engine = SimulationEngine::new(config.rules.clone(), logger.clone());
        let state = SimulationState::new(config.simulation.default_speed_multiplier);
        Self {
            setup_rules: config.setup_rules(),
            config,
            engine,
            session: Arc::new(Mutex::new(state)),
            driver: Mutex::new(None),
            logger,
        }
    }

    pub async fn configure(
        &self,
        rows: usize,
        cols: usize,
        initial_budget: u32,
    ) -> ApplicationResult<SimulationState> {
        let mut fresh = self.fresh_session(rows, cols, initial_budget)?;
        fresh.speed_multiplier = self.config.simulation.default_speed_multiplier;

        let placed = fresh.grid.as_ref().map_or(0, |g| g.hazard_count());
        if placed < self.setup_rules.hazard_count {
            self.logger.warn(&format!(
                "Could only place {} out of {} hazards",
                placed, self.setup_rules.hazard_count
            ));
        }

        self.stop_driver().await;
        let mut state = self.session.lock().await;
        *state = fresh;
        info!(rows, cols, initial_budget, hazards = placed, "simulation configured");
        Ok(state.clone())
    }

    fn fresh_session(
        &self,
        rows: usize,
        cols: usize,
        initial_budget: u32,
    ) -> DomainResult<SimulationState> {
        match self.config.simulation.hazard_seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                SimulationState::configure(rows, cols, initial_budget, &self.setup_rules, &mut rng)
            }
            None => {
                let mut rng = rand::thread_rng();
                SimulationState::configure(rows, cols, initial_budget, &self.setup_rules, &mut rng)
            }
        }
    }

    pub async fn place_robot(&self, robot_type: RobotType, x: i32, y: i32) -> ApplicationResult<Robot> {
        let mut state = self.session.lock().await;
        let robot = state.place_robot(robot_type, Coordinate::new(x, y), &self.setup_rules)?;
        self.logger.info(&format!(
            "Placed {:?} {} at {}",
            robot.robot_type, robot.id, robot.position
        ));
        Ok(robot)
    }

    pub async fn place_item(&self, item_type: TaskType, x: i32, y: i32) -> ApplicationResult<Task> {
        let mut state = self.session.lock().await;
        let task = state.place_item(item_type, Coordinate::new(x, y))?;
        self.logger.info(&format!(
            "Placed {:?} {} at {}",
            task.task_type, task.id, task.position
        ));
        Ok(task)
    }

    /// SETUP or PAUSED -> RUNNING. Without a strategy the previously selected
    /// one is reused.
    pub async fn start(&self, strategy: Option<StrategyKind>) -> ApplicationResult<()> {
        let period = {
            let mut state = self.session.lock().await;
            if state.grid.is_none() {
                return Err(DomainError::NotConfigured.into());
            }
            let previous = state.game_status;
            if previous != GameStatus::Setup && previous != GameStatus::Paused {
                return Err(DomainError::InvalidCommand {
                    reason: "Simulation is already running or has ended".to_string(),
                }
                .into());
            }
            let effective = strategy
                .or(state.selected_strategy)
                .ok_or(DomainError::MissingStrategy)?;

            if previous == GameStatus::Setup {
                state.tick_count = 0;
            }
            state.is_running = true;
            state.game_status = GameStatus::Running;
            state.selected_strategy = Some(effective);
            info!(strategy = ?effective, tick = state.tick_count, "simulation started");
            self.tick_period(state.speed_multiplier)
        };
        self.restart_driver(period).await;
        Ok(())
    }

    pub async fn control(&self, action: ControlAction) -> ApplicationResult<()> {
        match action {
            ControlAction::Pause => {
                if self.session.lock().await.game_status != GameStatus::Running {
                    return Err(DomainError::InvalidCommand {
                        reason: "Simulation is not running, cannot pause".to_string(),
                    }
                    .into());
                }
                self.stop_driver().await;
                let mut state = self.session.lock().await;
                // The game may have ended while the driver was stopping.
                if state.game_status == GameStatus::Running {
                    state.game_status = GameStatus::Paused;
                    state.is_running = false;
                    info!(tick = state.tick_count, "simulation paused");
                }
                Ok(())
            }
            ControlAction::Resume => {
                if self.session.lock().await.game_status != GameStatus::Paused {
                    return Err(DomainError::InvalidCommand {
                        reason: "Simulation is not paused".to_string(),
                    }
                    .into());
                }
                self.start(None).await
            }
            ControlAction::Reset => {
                self.stop_driver().await;
                let mut state = self.session.lock().await;
                *state = SimulationState::new(self.config.simulation.default_speed_multiplier);
                info!("simulation reset");
                Ok(())
            }
            ControlAction::SetSpeed(multiplier) => {
                if !multiplier.is_finite() || multiplier <= 0.0 {
                    return Err(DomainError::InvalidSpeed(multiplier).into());
                }
                let running = {
                    let mut state = self.session.lock().await;
                    state.speed_multiplier = multiplier;
                    state.game_status == GameStatus::Running
                };
                if running {
                    self.restart_driver(self.tick_period(multiplier)).await;
                }
                info!(multiplier, "speed changed");
                Ok(())
            }
        }
    }

    pub async fn get_state(&self) -> SimulationState {
        self.session.lock().await.clone()
    }

    pub async fn summary(&self) -> SimulationSummary {
        SimulationSummary::from(&*self.session.lock().await)
    }

    /// True while a tick driver is alive.
    pub async fn is_driving(&self) -> bool {
        self.driver
            .lock()
            .await
            .as_ref()
            .is_some_and(|driver| !driver.is_finished())
    }

    /// Period of the live tick driver, if one is running.
    pub async fn driver_period(&self) -> Option<Duration> {
        self.driver
            .lock()
            .await
            .as_ref()
            .filter(|driver| !driver.is_finished())
            .map(TickDriver::period)
    }

    pub fn tick_period(&self, multiplier: f64) -> Duration {
        let base = self.config.simulation.base_tick_period_ms as f64;
        let millis = (base / multiplier).max(1.0);
        Duration::from_secs_f64(millis / 1000.0)
    }

    async fn restart_driver(&self, period: Duration) {
        let mut slot = self.driver.lock().await;
        if let Some(previous) = slot.take() {
            previous.stop().await;
        }
        *slot = Some(TickDriver::spawn(
            self.session.clone(),
            self.engine.clone(),
            period,
        ));
    }

    async fn stop_driver(&self) {
        let previous = self.driver.lock().await.take();
        match previous {
            Some(driver) => driver.stop().await,
            None => debug!("no tick driver to stop"),
        }
    }
}
