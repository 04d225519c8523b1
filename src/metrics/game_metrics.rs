use std::time::{Duration, Instant};

/// Statistics for one play session, across restarts
pub struct GameMetrics {
    /// Play time banked before the current running stretch
    played: Duration,
    /// Start of the current running stretch, if the clock is running
    running_since: Option<Instant>,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            played: Duration::ZERO,
            running_since: Some(Instant::now()),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        self.elapsed_time = self.played
            + self
                .running_since
                .map(|since| since.elapsed())
                .unwrap_or_default();
    }

    pub fn on_game_start(&mut self) {
        self.played = Duration::ZERO;
        self.running_since = Some(Instant::now());
        self.elapsed_time = Duration::ZERO;
    }

    /// Stop the clock while paused
    pub fn on_pause(&mut self) {
        self.stop_clock();
    }

    pub fn on_resume(&mut self) {
        if self.running_since.is_none() {
            self.running_since = Some(Instant::now());
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.stop_clock();
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }

    fn stop_clock(&mut self) {
        if let Some(since) = self.running_since.take() {
            self.played += since.elapsed();
        }
        self.update();
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
