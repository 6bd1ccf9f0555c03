//! Replay summaries

use std::fmt;

use crate::GameTime;
use crate::ghost::format_time;
use crate::replay::types::ReplayData;

/// What a replay contains, without decoding its states
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayInfo {
    pub version: u8,
    pub level_id: String,
    pub player_name: String,
    pub frame_rate: f32,
    pub finished: bool,
    pub finish_time: GameTime,
    pub state_count: usize,
    pub event_count: usize,
    /// Recorded length in hundredths, from the state count and frame rate
    pub duration: GameTime,
}

impl ReplayInfo {
    pub fn from_data(data: &ReplayData) -> Self {
        let header = &data.header;
        let state_count = data.state_count();
        let duration = if header.frame_rate > 0.0 && state_count > 0 {
            (state_count - 1) as f32 * 100.0 / header.frame_rate
        } else {
            0.0
        };

        Self {
            version: header.version,
            level_id: header.level_id.clone(),
            player_name: header.player_name.clone(),
            frame_rate: header.frame_rate,
            finished: header.finished,
            finish_time: header.finish_time,
            state_count,
            event_count: data.events.len(),
            duration,
        }
    }
}

impl fmt::Display for ReplayInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Level:      {}", self.level_id)?;
        writeln!(f, "Player:     {}", self.player_name)?;
        writeln!(f, "Version:    {}", self.version)?;
        writeln!(f, "Frame rate: {} states/s", self.frame_rate)?;
        writeln!(f, "States:     {}", self.state_count)?;
        writeln!(f, "Events:     {}", self.event_count)?;
        writeln!(f, "Duration:   {}", format_time(self.duration))?;
        if self.finished {
            write!(f, "Result:     finished in {}", format_time(self.finish_time))
        } else {
            write!(f, "Result:     did not finish")
        }
    }
}
