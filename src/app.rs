use crate::assistant::{Assistant, PumpCommand};
use crate::config::Config;
use crate::error::Result;
use crate::logic::{DecisionEngine, Evaluation};
use crate::models::SensorSnapshot;
use crate::simulator::SensorSimulator;
use std::time::Duration;

const THRESHOLD_STEP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Assistant,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Assistant),
            _ => None,
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub farm_name: String,
    pub tick_interval: Duration,

    // Data
    pub snapshot: SensorSnapshot,
    pub evaluation: Evaluation,
    /// Pump state requested by the operator while in manual mode.
    pub manual_pump_on: bool,

    // Services
    pub engine: DecisionEngine,
    pub simulator: SensorSimulator,
    pub assistant: Assistant,

    // UI state
    pub chat_input: String,
    pub status_message: Option<String>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let engine = DecisionEngine::new(config.crop_profile_table()?);
        let mut simulator = SensorSimulator::new(config.simulator.seed);

        let mut snapshot = config.initial_snapshot();
        snapshot.moisture_history = simulator.mock_history();

        let evaluation = engine.evaluate(&snapshot);

        Ok(Self {
            screen: Screen::Dashboard,
            should_quit: false,
            farm_name: config.farm.name.clone(),
            tick_interval: Duration::from_secs(config.simulator.interval_secs.max(1)),
            snapshot,
            evaluation,
            manual_pump_on: false,
            engine,
            simulator,
            assistant: Assistant::new(),
            chat_input: String::new(),
            status_message: None,
        })
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn reevaluate(&mut self) {
        self.evaluation = self.engine.evaluate(&self.snapshot);
    }

    /// Advance the simulated sensors by one reading.
    pub fn tick(&mut self) {
        self.simulator.step(&mut self.snapshot);
        self.reevaluate();
    }

    pub fn toggle_auto_mode(&mut self) {
        self.snapshot.auto_mode = !self.snapshot.auto_mode;
        if self.snapshot.auto_mode {
            self.manual_pump_on = false;
            self.set_status("Automatic irrigation enabled");
        } else {
            self.set_status("Manual irrigation control");
        }
        self.reevaluate();
    }

    pub fn cycle_crop(&mut self, forward: bool) {
        self.snapshot.crop = if forward {
            self.snapshot.crop.next()
        } else {
            self.snapshot.crop.prev()
        };
        let msg = format!("Crop set to {}", self.snapshot.crop);
        self.set_status(&msg);
        self.reevaluate();
    }

    pub fn adjust_threshold(&mut self, delta: f64) {
        self.snapshot.moisture_threshold_pct =
            (self.snapshot.moisture_threshold_pct + delta).clamp(0.0, 100.0);
        let msg = format!(
            "Moisture threshold {}%",
            self.snapshot.moisture_threshold_pct
        );
        self.set_status(&msg);
        self.reevaluate();
    }

    pub fn raise_threshold(&mut self) {
        self.adjust_threshold(THRESHOLD_STEP);
    }

    pub fn lower_threshold(&mut self) {
        self.adjust_threshold(-THRESHOLD_STEP);
    }

    /// Manual pump control only applies while automatic mode is off.
    pub fn set_manual_pump(&mut self, on: bool) {
        if self.snapshot.auto_mode {
            self.set_status("Pump is under automatic control - press [a] for manual mode");
            return;
        }
        self.manual_pump_on = on;
        self.set_status(if on { "Pump turned on" } else { "Pump turned off" });
    }

    pub fn toggle_manual_pump(&mut self) {
        self.set_manual_pump(!self.manual_pump_on);
    }

    /// Send the chat buffer to the assistant and apply any pump command it carries.
    pub fn submit_chat(&mut self) {
        let input = std::mem::take(&mut self.chat_input);
        let Some(reply) = self.assistant.send(&input) else {
            return;
        };

        match reply.pump_command {
            Some(PumpCommand::On) => self.set_manual_pump(true),
            Some(PumpCommand::Off) => self.set_manual_pump(false),
            None => {}
        }
    }

    /// Whether water is flowing, from the engine in auto mode or the operator otherwise.
    pub fn pump_running(&self) -> bool {
        if self.snapshot.auto_mode {
            self.evaluation.irrigation.is_pump_on()
        } else {
            self.manual_pump_on
        }
    }
}
