// Countdown writing timer, driven by the once-per-second tick

pub const DEFAULT_DURATION_SECS: u32 = 900;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Idle,
    Ticked,
    /// Reached zero on this tick
    Expired,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritingTimer {
    remaining: u32,
    running: bool,
}

impl Default for WritingTimer {
    fn default() -> Self {
        Self {
            remaining: DEFAULT_DURATION_SECS,
            running: false,
        }
    }
}

impl WritingTimer {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start or pause; returns the new running state
    pub fn toggle(&mut self) -> bool {
        self.running = !self.running && self.remaining > 0;
        self.running
    }

    pub fn reset(&mut self) {
        self.remaining = DEFAULT_DURATION_SECS;
        self.running = false;
    }

    pub fn tick(&mut self) -> TimerEvent {
        if !self.running {
            return TimerEvent::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            tracing::info!("[WritingTimer::tick] Time is up");
            TimerEvent::Expired
        } else {
            TimerEvent::Ticked
        }
    }

    /// "MM:SS" for the bottom bar
    pub fn formatted(&self) -> String {
        format!("{:02}:{:02}", self.remaining / 60, self.remaining % 60)
    }

    /// "M:SS" for Zen mode; empty while idle at the default duration
    pub fn zen_label(&self) -> String {
        if !self.running && self.remaining == DEFAULT_DURATION_SECS {
            return String::new();
        }
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
