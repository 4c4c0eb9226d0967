use crate::task::id::SubmissionId;
use crate::task::policy::ConcurrencyPolicy;

#[derive(Debug, Clone, Default)]
pub struct SubmitRunState {
    running: usize,
    sequence: u64,
}

impl SubmitRunState {
    pub fn running_count(&self) -> usize {
        self.running
    }

    pub fn is_running(&self) -> bool {
        self.running > 0
    }

    pub fn next_id(&mut self) -> SubmissionId {
        self.sequence = self.sequence.saturating_add(1);
        SubmissionId::new(self.sequence)
    }

    pub fn should_start(&self, policy: ConcurrencyPolicy) -> bool {
        match policy {
            ConcurrencyPolicy::Parallel => true,
            ConcurrencyPolicy::DropNew => !self.is_running(),
        }
    }

    pub fn on_started(&mut self) {
        self.running = self.running.saturating_add(1);
    }

    pub fn on_finished(&mut self) {
        self.running = self.running.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::SubmitRunState;
    use crate::task::policy::ConcurrencyPolicy;

    #[test]
    fn parallel_always_starts() {
        let mut state = SubmitRunState::default();
        state.next_id();
        state.on_started();

        assert!(state.should_start(ConcurrencyPolicy::Parallel));
        assert_eq!(state.running_count(), 1);
    }

    #[test]
    fn drop_new_waits_for_running_submission() {
        let mut state = SubmitRunState::default();
        state.next_id();
        state.on_started();
        assert!(!state.should_start(ConcurrencyPolicy::DropNew));

        state.on_finished();
        assert!(state.should_start(ConcurrencyPolicy::DropNew));
        assert!(!state.is_running());
    }

    #[test]
    fn ids_are_sequential() {
        let mut state = SubmitRunState::default();
        let first = state.next_id();
        let second = state.next_id();
        assert!(second > first);
        assert_eq!(first.get() + 1, second.get());
    }
}
