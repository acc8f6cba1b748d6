//! Terminal dashboard for the simulated field station.
//!
//! Owns the event loop and wires together all background tasks:
//! - Sample feed (simulated sensors, history buffer)
//! - Config file watcher (live reload on change)
//! - Stdin command reader (chart selection, schedule edits)
//! - 1-second timer (clock)

pub mod command;
pub mod render;

use agro_charts::ChartCache;
use agro_config::{default_path, load as load_config, ConfigWatcher, DashConfig, OutputFormat};
use agro_core::{
    AggregatedSeries, DashState, Granularity, Message as AppMessage, Panel, Result, SensorReading,
};
use agro_panels::{ChartPanel, SchedulePanel, SensorPanel, WelcomePanel};
use agro_schedule::ScheduleState;
use agro_sensors::{spawn_feed, SampleSource, Simulator};
use agro_theme::Theme;
use chrono::{Local, Timelike};
use command::Command;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncBufReadExt;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

// ── Entry point ───────────────────────────────────────────────────────────────

/// Start the dashboard.  Returns when the user types `quit` or presses Ctrl-C.
pub fn run() -> Result<()> {
    let path = default_path();
    let config = load_config(&path).unwrap_or_else(|e| {
        warn!("{e}; using defaults");
        DashConfig::default()
    });

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(event_loop(Dashboard::new(config, path)))
}

// ── Message ───────────────────────────────────────────────────────────────────

/// Top-level loop messages.
#[derive(Debug, Clone)]
pub enum Message {
    /// Propagate a core event-bus message.
    App(AppMessage),
    /// A raw line typed on stdin.
    Input(String),
    /// One-second timer tick for the clock display.
    Tick,
}

/// What the loop should do after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Idle,
    Exit,
}

// ── State ─────────────────────────────────────────────────────────────────────

pub struct Dashboard {
    state:       DashState,
    config:      DashConfig,
    config_path: PathBuf,
    theme:       Theme,
    schedules:   ScheduleState,
    cache:       ChartCache,
    /// Last command error or help text, shown under the frame.
    notice:      Option<String>,
    welcome:     WelcomePanel,
    sensors:     SensorPanel,
    chart:       ChartPanel,
    schedule:    SchedulePanel,
}

impl Dashboard {
    pub fn new(config: DashConfig, config_path: PathBuf) -> Self {
        let theme = Theme::from_config(&config.theme, config.display.color);
        let schedules = ScheduleState::default();

        let state = DashState {
            granularity: config.chart.granularity,
            chart_kind:  config.chart.kind,
            chart:       AggregatedSeries::placeholder(config.chart.granularity),
            schedules:   schedules.schedules.clone(),
            ..DashState::default()
        };

        Self {
            welcome: WelcomePanel::new(config.display.user_name.clone()),
            sensors: SensorPanel::new(),
            chart: ChartPanel::new(),
            schedule: SchedulePanel::new(),
            state,
            config,
            config_path,
            theme,
            schedules,
            cache: ChartCache::new(),
            notice: None,
        }
    }

    pub fn state(&self) -> &DashState {
        &self.state
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    // ── Update ────────────────────────────────────────────────────────────────

    pub fn update(&mut self, message: Message) -> Flow {
        match message {
            Message::Tick => {
                let before = self.state.time.minute();
                self.state.time = Local::now();
                if before == self.state.time.minute() {
                    return Flow::Idle;
                }
                // Windows move with the clock even when no new sample arrived.
                self.cache.clear();
                self.refresh_chart();
                if self.config.display.output == OutputFormat::Text {
                    Flow::Redraw
                } else {
                    Flow::Idle
                }
            }
            Message::App(msg) => self.handle_app(msg),
            Message::Input(line) => self.handle_input(&line),
        }
    }

    fn handle_app(&mut self, msg: AppMessage) -> Flow {
        match msg {
            AppMessage::Sampled(snapshot) => {
                self.state.reading = snapshot.reading;
                self.state.history = snapshot.history;
                self.state.history_version = snapshot.version;
                self.state.time = Local::now();
                self.refresh_chart();
            }
            AppMessage::ConfigReloaded => match load_config(&self.config_path) {
                Ok(cfg) => {
                    info!("Config reloaded");
                    self.apply_config(cfg);
                }
                Err(e) => warn!("Config reload failed: {e}"),
            },
            AppMessage::GranularitySelected(granularity) => {
                self.select_granularity(granularity);
            }
            AppMessage::ChartKindSelected(kind) => {
                self.state.chart_kind = kind;
            }
            AppMessage::Tick => return self.update(Message::Tick),
            AppMessage::Shutdown => return Flow::Exit,
        }
        Flow::Redraw
    }

    fn handle_input(&mut self, line: &str) -> Flow {
        self.notice = None;
        match command::parse(line) {
            Ok(None) => Flow::Idle,
            Ok(Some(Command::App(msg))) => self.handle_app(msg),
            Ok(Some(Command::Help)) => {
                self.notice = Some(command::HELP.to_string());
                Flow::Redraw
            }
            Ok(Some(Command::Schedule(actions))) => {
                match self.schedules.reduce_all(actions) {
                    Ok(next) => {
                        self.schedules = next;
                        self.state.schedules = self.schedules.schedules.clone();
                    }
                    Err(e) => {
                        warn!("Schedule change rejected: {e}");
                        self.notice = Some(e.to_string());
                    }
                }
                Flow::Redraw
            }
            Err(e) => {
                warn!("{e}");
                self.notice = Some(e.to_string());
                Flow::Redraw
            }
        }
    }

    fn select_granularity(&mut self, granularity: Granularity) {
        if self.state.granularity != granularity {
            debug!(%granularity, "granularity selected");
            self.state.granularity = granularity;
            self.refresh_chart();
        }
    }

    fn refresh_chart(&mut self) {
        self.state.chart = self.cache.get_or_compute(
            self.state.history_version,
            &self.state.history,
            self.state.granularity,
            &self.state.time,
        );
    }

    fn apply_config(&mut self, cfg: DashConfig) {
        if cfg.simulator != self.config.simulator {
            info!("Simulator settings changed; they apply on next start");
        }
        if cfg.chart != self.config.chart {
            self.state.chart_kind = cfg.chart.kind;
            self.select_granularity(cfg.chart.granularity);
        }
        self.theme = Theme::from_config(&cfg.theme, cfg.display.color);
        self.welcome.set_user_name(cfg.display.user_name.clone());
        self.config = cfg;
    }

    // ── View ──────────────────────────────────────────────────────────────────

    pub fn view(&self) -> String {
        match self.config.display.output {
            OutputFormat::Text => {
                let panels: [&dyn Panel; 4] =
                    [&self.welcome, &self.sensors, &self.chart, &self.schedule];
                let mut frame = render::text_frame(&self.state, &panels, &self.theme, true);
                if let Some(notice) = &self.notice {
                    frame.push_str(&self.theme.paint(self.theme.warn, notice));
                    frame.push('\n');
                }
                frame
            }
            OutputFormat::Json => match render::json_frame(&self.state) {
                Ok(json) => json + "\n",
                Err(e) => {
                    warn!("Cannot serialize frame: {e}");
                    String::new()
                }
            },
        }
    }

    fn draw(&self) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(self.view().as_bytes()).and_then(|_| out.flush()) {
            warn!("stdout write failed: {e}");
        }
    }
}

// ── Event loop ────────────────────────────────────────────────────────────────

async fn event_loop(mut dash: Dashboard) -> Result<()> {
    let sim = &dash.config.simulator;
    let source = SampleSource::new(Simulator::new(SensorReading::default(), sim.seed), sim.capacity);
    let mut samples = spawn_feed(source, sim.interval_ms);
    let (_watcher, mut reloads) = ConfigWatcher::spawn(&dash.config_path);
    let mut input = spawn_stdin();
    let mut clock = tokio::time::interval(Duration::from_secs(1));

    info!(
        granularity = %dash.state.granularity,
        chart = ?dash.state.chart_kind,
        "dashboard started"
    );
    dash.draw();

    loop {
        let message = tokio::select! {
            Some(snapshot) = samples.recv() => Message::App(AppMessage::Sampled(snapshot)),
            Some(()) = reloads.recv() => Message::App(AppMessage::ConfigReloaded),
            Some(line) = input.recv() => Message::Input(line),
            _ = clock.tick() => Message::Tick,
            _ = tokio::signal::ctrl_c() => Message::App(AppMessage::Shutdown),
        };

        match dash.update(message) {
            Flow::Redraw => dash.draw(),
            Flow::Idle => {}
            Flow::Exit => break,
        }
    }

    info!(chart_cache_hits = dash.cache.hits(), "dashboard stopped");
    Ok(())
}

/// Forward stdin lines until EOF.
fn spawn_stdin() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(8);

    tokio::spawn(async move {
        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break; // receiver dropped
                    }
                }
                Ok(None) => {
                    debug!("stdin closed");
                    break;
                }
                Err(e) => {
                    warn!("stdin read failed: {e}");
                    break;
                }
            }
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use agro_core::{ChartKind, Metric, RawPoint, SourceSnapshot};

    fn dashboard() -> Dashboard {
        let mut config = DashConfig::default();
        config.display.color = false;
        Dashboard::new(config, PathBuf::from("/nonexistent/agrodash.toml"))
    }

    fn snapshot(temps: &[f64]) -> SourceSnapshot {
        let now = Local::now().timestamp_millis();
        let history: Vec<RawPoint> = temps
            .iter()
            .enumerate()
            .map(|(i, &t)| RawPoint {
                timestamp: now - (temps.len() - i) as i64 * 1_000,
                temperature: t,
                humidity: 50.0,
                soil_moisture: 40.0,
                water_tank: 80.0,
                battery: 70.0,
            })
            .collect();
        SourceSnapshot {
            reading: SensorReading::default(),
            version: history.len() as u64,
            history,
        }
    }

    #[test]
    fn starts_with_placeholder_chart() {
        let dash = dashboard();
        assert!(dash.state().chart.is_placeholder());
        assert_eq!(dash.state().schedules.len(), 2);
    }

    #[test]
    fn sample_refreshes_chart() {
        let mut dash = dashboard();
        let flow = dash.update(Message::App(AppMessage::Sampled(snapshot(&[20.0]))));
        assert_eq!(flow, Flow::Redraw);

        let chart = &dash.state().chart;
        assert!(!chart.is_placeholder());
        assert_eq!(chart.labels.len(), 1);
        assert_eq!(chart.values(Metric::Temperature), Some(&[20.0][..]));
    }

    #[test]
    fn clock_tick_ages_out_points_without_a_new_sample() {
        let mut dash = dashboard();
        let now = Local::now();
        let mut stale = snapshot(&[20.0]);
        stale.history[0].timestamp = (now - chrono::Duration::seconds(24 * 3600 + 30)).timestamp_millis();

        dash.state.history = stale.history;
        dash.state.history_version = 1;
        dash.state.time = now - chrono::Duration::seconds(120);
        dash.refresh_chart();
        assert!(!dash.state().chart.is_placeholder());

        assert_eq!(dash.update(Message::Tick), Flow::Redraw);
        assert!(dash.state().chart.is_placeholder());
    }

    #[test]
    fn granularity_command_rebuckets() {
        let mut dash = dashboard();
        dash.update(Message::App(AppMessage::Sampled(snapshot(&[20.0, 22.0]))));
        dash.update(Message::Input("monthly".into()));

        let chart = &dash.state().chart;
        assert_eq!(chart.granularity, Granularity::Monthly);
        assert_eq!(chart.labels, vec![Local::now().format("%b").to_string()]);
        assert_eq!(chart.values(Metric::Temperature), Some(&[21.0][..]));
    }

    #[test]
    fn bar_command_switches_form() {
        let mut dash = dashboard();
        dash.update(Message::Input("bar".into()));
        assert_eq!(dash.state().chart_kind, ChartKind::Bar);
        assert!(dash.view().contains("· bar"));
    }

    #[test]
    fn schedule_commands_go_through_the_reducer() {
        let mut dash = dashboard();
        dash.update(Message::Input("new field 05:15 10 sat,sun".into()));
        assert_eq!(dash.state().schedules.len(), 3);
        assert_eq!(dash.state().schedules[0].time_label(), "05:15");

        dash.update(Message::Input("delete 1".into()));
        assert_eq!(dash.state().schedules.len(), 2);
        assert!(dash.notice().is_none());
    }

    #[test]
    fn edit_command_updates_schedule_in_place() {
        let mut dash = dashboard();
        let flow = dash.update(Message::Input("edit 2 zone=greenhouse time=17:00 days=fri min=20".into()));
        assert_eq!(flow, Flow::Redraw);
        assert!(dash.notice().is_none());

        let schedules = &dash.state().schedules;
        assert_eq!(schedules.len(), 2);
        let edited = &schedules[1];
        assert_eq!(edited.id, 2);
        assert_eq!(edited.zone, agro_core::Zone::Greenhouse);
        assert_eq!(edited.time_label(), "17:00");
        assert_eq!(edited.days, vec![chrono::Weekday::Fri]);
        assert_eq!(edited.duration_minutes, 20);
        assert!(!edited.active);
        assert_eq!(edited.notes.as_deref(), Some("Use liquid fertilizer"));
        assert!(dash.view().contains("17:00"));
    }

    #[test]
    fn failed_edit_leaves_schedule_untouched() {
        let mut dash = dashboard();
        let before = dash.state().schedules.clone();
        dash.update(Message::Input("edit 2 days=".into()));
        assert_eq!(dash.state().schedules, before);
        assert!(dash.notice().is_some());
        assert!(dash.schedules.form.is_none());
    }

    #[test]
    fn rejected_commands_leave_state_and_set_notice() {
        let mut dash = dashboard();
        dash.update(Message::Input("new field 05:15 7 sat".into()));
        assert_eq!(dash.state().schedules.len(), 2);
        assert!(dash.notice().is_some());

        dash.update(Message::Input("frobnicate".into()));
        assert!(dash.notice().unwrap().contains("unknown command"));
        assert!(dash.view().contains("unknown command"));
    }

    #[test]
    fn quit_exits() {
        let mut dash = dashboard();
        assert_eq!(dash.update(Message::Input("quit".into())), Flow::Exit);
        assert_eq!(dash.update(Message::App(AppMessage::Shutdown)), Flow::Exit);
    }

    #[test]
    fn config_reload_applies_chart_and_display() {
        let mut dash = dashboard();
        let mut cfg = DashConfig::default();
        cfg.chart.granularity = Granularity::Weekly;
        cfg.display.user_name = "Sari".into();
        cfg.display.color = false;
        dash.apply_config(cfg);

        assert_eq!(dash.state().granularity, Granularity::Weekly);
        assert!(dash.view().contains("Hi Sari"));
    }

    #[test]
    fn json_output() {
        let mut config = DashConfig::default();
        config.display.output = OutputFormat::Json;
        let dash = Dashboard::new(config, PathBuf::new());
        let frame: serde_json::Value = serde_json::from_str(dash.view().trim()).unwrap();
        assert_eq!(frame["chart"]["granularity"], "hourly");
    }
}
