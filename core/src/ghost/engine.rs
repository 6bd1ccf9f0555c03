//! Ghost playback

use std::path::Path;

use crate::GameTime;
use crate::bike::BikeState;
use crate::config::GhostConfig;
use crate::error::ReplayError;
use crate::events::GameEvent;
use crate::ghost::window::StateWindow;
use crate::replay::ReplayReader;
use crate::scene::Scene;

/// Converts frame displacement per hundredth into the velocity shown for ghosts
pub const VELOCITY_SCALE: f32 = 10.0;

/// A recorded run replayed alongside the player
pub struct Ghost {
    reader: ReplayReader,
    config: GhostConfig,
    window: StateWindow,
    state: BikeState,
    linear_velocity: f32,
    teleported: bool,
    active: bool,
    finished: bool,
    dead: bool,
    finish_time: GameTime,
    to_take_times: Vec<GameTime>,
    diff_to_player: GameTime,
    info: String,
}

impl Ghost {
    /// Create a ghost positioned on the first recorded state
    pub fn new(reader: ReplayReader, config: GhostConfig) -> Result<Self, ReplayError> {
        let first = reader.peek_state(&config.physics)?;
        Ok(Self {
            reader,
            config,
            window: StateWindow::new(first),
            state: first,
            linear_velocity: 0.0,
            teleported: false,
            active: true,
            finished: false,
            dead: false,
            finish_time: 0.0,
            to_take_times: Vec::new(),
            diff_to_player: 0.0,
            info: String::new(),
        })
    }

    /// Open a replay file and create its ghost
    pub fn open(path: impl AsRef<Path>, config: GhostConfig) -> Result<Self, ReplayError> {
        Self::new(ReplayReader::open(path)?, config)
    }

    /// Move the ghost to `time`
    ///
    /// Events are synchronized with `scene` when one is given and the ghost
    /// is active.
    pub fn update(&mut self, time: GameTime, scene: Option<&mut dyn Scene>) {
        if let Err(err) = self.update_state(time) {
            tracing::warn!(
                "Ghost of {} holds its pose at {}: {}",
                self.reader.player_name(),
                time,
                err
            );
        }
        self.teleported = false;

        if let Some(scene) = scene {
            if self.active {
                self.sync_events(time, scene);
            }
        }
    }

    fn update_state(&mut self, time: GameTime) -> Result<(), ReplayError> {
        if self.window.past().game_time > time {
            self.rewind(time)?;
        }

        if self.reader.end_of_file() && self.window.last().game_time <= time {
            self.freeze();
            return Ok(());
        }

        if self.window.future().game_time <= time {
            self.advance(time)?;
        } else {
            self.interpolate(time);
        }
        Ok(())
    }

    /// Time moved back: reposition the reader at or before `time`
    fn rewind(&mut self, time: GameTime) -> Result<(), ReplayError> {
        tracing::debug!(
            "Ghost of {} rewinds from {} to {}",
            self.reader.player_name(),
            self.window.past().game_time,
            time
        );

        self.reader.fast_rewind(self.window.past().game_time - time, 1);
        while !self.reader.at_start() && self.reader.peek_serialized()?.game_time > time {
            self.reader.step_back();
        }

        let state = self.reader.peek_state(&self.config.physics)?;
        self.window.seed(state);
        self.state = state;
        self.finished = false;
        self.dead = false;
        Ok(())
    }

    /// Replay exhausted: hold the last state, engine off
    fn freeze(&mut self) {
        self.state = *self.window.last();
        self.state.engine_rpm = 0.0;
        self.linear_velocity = 0.0;

        if self.reader.did_finish() {
            if !self.finished {
                tracing::debug!("Ghost of {} finished", self.reader.player_name());
            }
            self.finished = true;
            self.finish_time = self.reader.finish_time();
        } else {
            if !self.dead {
                tracing::debug!("Ghost of {} died", self.reader.player_name());
            }
            self.dead = true;
        }
    }

    /// Shift the window until it brackets `time` or stops progressing
    fn advance(&mut self, time: GameTime) -> Result<(), ReplayError> {
        loop {
            let read = if self.reader.end_of_file() {
                self.window.duplicate_last();
                false
            } else {
                let state = self.reader.load_state(&self.config.physics)?;
                self.window.shift_in(state);
                true
            };

            let past = self.window.past().game_time;
            let future = self.window.future().game_time;
            if future > time || (!read && past == future) {
                break;
            }
        }

        let (past, future) = (self.window.past(), self.window.future());
        self.linear_velocity = linear_velocity(past, future);
        self.state = *past;
        Ok(())
    }

    /// Blend between the bracketing states when the gates allow it,
    /// otherwise hold the latest past state
    fn interpolate(&mut self, time: GameTime) {
        let (past, future) = (self.window.past(), self.window.future());
        let interval = future.game_time - past.game_time;
        let blend = self.config.interpolation
            && !self.teleported
            && interval > 0.0
            && interval < self.config.max_interpolation_time
            && past.center.distance(future.center) < self.config.max_interpolation_distance;

        self.state = if blend {
            BikeState::lerp(past, future, (time - past.game_time) / interval)
        } else {
            *past
        };
    }

    /// Apply events reached by `time` and revert those now in the future
    fn sync_events(&mut self, time: GameTime, scene: &mut dyn Scene) {
        let player = self.reader.player_name().to_string();
        let events = self.reader.events_mut();

        for recorded in events.iter_mut() {
            if recorded.passed || recorded.time > time {
                continue;
            }
            if let Err(err) = recorded.event.apply(scene) {
                tracing::warn!(
                    "Ghost of {}: failed to apply {} at {}: {}",
                    player,
                    recorded.event.type_name(),
                    recorded.time,
                    err
                );
            }
            recorded.passed = true;
            if recorded.event.is_teleport() {
                self.teleported = true;
            }
        }

        for recorded in events.iter_mut().rev() {
            if !recorded.passed || recorded.time <= time {
                continue;
            }
            if let Err(err) = recorded.event.revert(scene) {
                tracing::warn!(
                    "Ghost of {}: failed to revert {} at {}: {}",
                    player,
                    recorded.event.type_name(),
                    recorded.time,
                    err
                );
            }
            recorded.passed = false;
        }
    }

    /// Remember when the recorded rider took each collectible
    pub fn init_to_take_entities(&mut self, scene: &dyn Scene) {
        self.diff_to_player = 0.0;
        self.to_take_times = self
            .reader
            .events()
            .iter()
            .filter_map(|recorded| match &recorded.event {
                GameEvent::EntityDestroyed { entity_id, .. } => match scene.entity(entity_id) {
                    Ok(entity) if entity.is_to_take() => Some(recorded.time),
                    Ok(_) => None,
                    Err(err) => {
                        tracing::debug!("Ghost collectible lookup failed: {}", err);
                        None
                    }
                },
                _ => None,
            })
            .collect();
    }

    /// Compare the player's collectible times with the ghost's
    ///
    /// `player_times` holds the times the player took each collectible so far.
    pub fn update_diff_to_player(&mut self, player_times: &[GameTime]) {
        let Some(&player_last) = player_times.last() else {
            return;
        };
        if player_times.len() > self.to_take_times.len() {
            return;
        }
        self.diff_to_player = player_last - self.to_take_times[player_times.len() - 1];
    }

    /// Current pose
    pub fn state(&self) -> &BikeState {
        &self.state
    }

    pub fn window(&self) -> &StateWindow {
        &self.window
    }

    pub fn reader(&self) -> &ReplayReader {
        &self.reader
    }

    pub fn linear_velocity(&self) -> f32 {
        self.linear_velocity
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn finish_time(&self) -> GameTime {
        self.finish_time
    }

    pub fn to_take_times(&self) -> &[GameTime] {
        &self.to_take_times
    }

    /// Player time minus ghost time at the last shared collectible
    pub fn diff_to_player(&self) -> GameTime {
        self.diff_to_player
    }

    /// Skip interpolation on the next update
    pub fn mark_teleported(&mut self) {
        self.teleported = true;
    }

    pub fn is_teleported(&self) -> bool {
        self.teleported
    }

    pub fn set_interpolation(&mut self, enabled: bool) {
        self.config.interpolation = enabled;
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn level_id(&self) -> &str {
        self.reader.level_id()
    }

    pub fn player_name(&self) -> &str {
        self.reader.player_name()
    }

    /// Free text shown with the ghost, e.g. where the replay came from
    pub fn set_info(&mut self, info: impl Into<String>) {
        self.info = info.into();
    }

    /// Label drawn next to the ghost
    pub fn description(&self) -> String {
        let mut text = format!("Ghost of {}", self.reader.player_name());
        if !self.info.is_empty() {
            text.push_str(&format!(" ({})", self.info));
        }
        text.push_str(&format!(" ({})", format_time(self.reader.finish_time())));
        text
    }
}

fn linear_velocity(past: &BikeState, future: &BikeState) -> f32 {
    let interval = future.game_time - past.game_time;
    if interval > 0.0 {
        past.center.distance(future.center) * VELOCITY_SCALE / interval
    } else {
        0.0
    }
}

/// Format a time in hundredths as `m:ss:cc`
pub fn format_time(time: GameTime) -> String {
    let hundredths = time.abs().round() as u64;
    let sign = if time < 0.0 && hundredths > 0 { "-" } else { "" };
    format!(
        "{}{}:{:02}:{:02}",
        sign,
        hundredths / 6000,
        hundredths / 100 % 60,
        hundredths % 100
    )
}
