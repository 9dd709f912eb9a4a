use crate::config::ReadinessConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStep {
    /// Dependency not there yet; poll again.
    Wait,
    /// First successful observation; run initialization now.
    Fire,
    /// Initialization already ran; nothing to do.
    Done,
    /// The attempt budget ran out before the dependency appeared.
    GaveUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GateState {
    Waiting,
    Fired,
    Exhausted,
}

/// One-shot barrier in front of widget initialization.
#[derive(Debug, Clone)]
pub struct ReadinessGate {
    state: GateState,
    attempts: u32,
    max_attempts: Option<u32>,
}

impl ReadinessGate {
    pub fn new(max_attempts: Option<u32>) -> Self {
        Self {
            state: GateState::Waiting,
            attempts: 0,
            max_attempts,
        }
    }

    pub fn from_config(config: &ReadinessConfig) -> Self {
        Self::new(config.max_attempts)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_settled(&self) -> bool {
        self.state != GateState::Waiting
    }

    pub fn observe(&mut self, ready: bool) -> GateStep {
        match self.state {
            GateState::Fired => return GateStep::Done,
            GateState::Exhausted => return GateStep::GaveUp,
            GateState::Waiting => {}
        }
        self.attempts = self.attempts.saturating_add(1);
        if ready {
            self.state = GateState::Fired;
            return GateStep::Fire;
        }
        if let Some(max) = self.max_attempts {
            if self.attempts >= max {
                self.state = GateState::Exhausted;
                return GateStep::GaveUp;
            }
        }
        GateStep::Wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_on_first_ready() {
        let mut gate = ReadinessGate::new(None);
        assert_eq!(gate.observe(false), GateStep::Wait);
        assert_eq!(gate.observe(false), GateStep::Wait);
        assert_eq!(gate.observe(true), GateStep::Fire);
        assert_eq!(gate.observe(true), GateStep::Done);
        assert_eq!(gate.observe(true), GateStep::Done);
        assert_eq!(gate.attempts(), 3);
        assert!(gate.is_settled());
    }

    #[test]
    fn unbounded_gate_keeps_waiting() {
        let mut gate = ReadinessGate::from_config(&ReadinessConfig::default());
        for _ in 0..10_000 {
            assert_eq!(gate.observe(false), GateStep::Wait);
        }
        assert!(!gate.is_settled());
    }

    #[test]
    fn bounded_gate_gives_up() {
        let mut gate = ReadinessGate::new(Some(3));
        assert_eq!(gate.observe(false), GateStep::Wait);
        assert_eq!(gate.observe(false), GateStep::Wait);
        assert_eq!(gate.observe(false), GateStep::GaveUp);
        assert_eq!(gate.observe(true), GateStep::GaveUp);
    }

    #[test]
    fn ready_on_last_attempt_still_fires() {
        let mut gate = ReadinessGate::new(Some(2));
        assert_eq!(gate.observe(false), GateStep::Wait);
        assert_eq!(gate.observe(true), GateStep::Fire);
    }
}
