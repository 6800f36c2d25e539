/// Where a run stands: nothing started, work on the wire, or finished.
/// Transitions happen only when the pipeline reports them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    InFlight,
    Done,
}

/// Tracks pipeline completion from real stage signals.
///
/// Percent is derived from how many stages have finished, never from
/// elapsed time, so the same sequence of signals always produces the
/// same readings.
pub struct Progress {
    state: State,
    stage: Option<&'static str>,
    completed: usize,
    total: usize,
}

impl Progress {
    pub fn new(total: usize) -> Self {
        Self {
            state: State::Idle,
            stage: None,
            completed: 0,
            total: total.max(1),
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn stage(&self) -> Option<&'static str> {
        self.stage
    }

    /// Report that a request has started. The completed count restarts at
    /// zero, so a reused tracker begins the next request from 0%.
    pub fn start(&mut self, stage: &'static str) {
        self.state = State::InFlight;
        self.stage = Some(stage);
        self.completed = 0;
    }

    /// Name the stage now on the wire. Does not advance the count.
    pub fn next_stage(&mut self, stage: &'static str) {
        if self.state == State::InFlight {
            self.stage = Some(stage);
        }
    }

    /// Report that the current stage finished. The run moves to Done
    /// when the last stage completes.
    pub fn stage_done(&mut self) {
        if self.state != State::InFlight {
            return;
        }
        self.completed = (self.completed + 1).min(self.total);
        if self.completed == self.total {
            self.finish();
        }
    }

    /// Force the run to Done
    pub fn finish(&mut self) {
        self.state = State::Done;
        self.stage = None;
        self.completed = self.total;
    }

    /// Completion percentage. Reaches 100 only in the Done state.
    pub fn percent(&self) -> u8 {
        if self.state == State::Done {
            return 100;
        }
        ((self.completed * 100) / self.total) as u8
    }

    pub fn is_done(&self) -> bool {
        self.state == State::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_at_zero() {
        let progress = Progress::new(2);
        assert_eq!(progress.state(), State::Idle);
        assert_eq!(progress.percent(), 0);
        assert_eq!(progress.stage(), None);
        assert!(!progress.is_done());
    }

    #[test]
    fn test_start_moves_to_in_flight() {
        let mut progress = Progress::new(2);
        progress.start("fetching transcript");
        assert_eq!(progress.state(), State::InFlight);
        assert_eq!(progress.stage(), Some("fetching transcript"));
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn test_percent_tracks_completed_stages() {
        let mut progress = Progress::new(2);
        progress.start("fetching transcript");
        progress.stage_done();
        assert_eq!(progress.state(), State::InFlight);
        assert_eq!(progress.percent(), 50);

        progress.next_stage("generating notes");
        progress.stage_done();
        assert_eq!(progress.state(), State::Done);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_hundred_percent_only_when_done() {
        let mut progress = Progress::new(3);
        progress.start("a");
        progress.stage_done();
        progress.next_stage("b");
        progress.stage_done();
        assert!(progress.percent() < 100);
        assert!(!progress.is_done());

        progress.next_stage("c");
        progress.stage_done();
        assert_eq!(progress.percent(), 100);
        assert!(progress.is_done());
    }

    #[test]
    fn test_start_resets_completed_count() {
        let mut progress = Progress::new(2);
        progress.start("first attempt");
        progress.stage_done();
        assert_eq!(progress.percent(), 50);

        progress.start("second attempt");
        assert_eq!(progress.state(), State::InFlight);
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn test_next_stage_renames_without_advancing() {
        let mut progress = Progress::new(2);
        progress.start("fetching transcript");
        progress.stage_done();
        progress.next_stage("generating notes");
        assert_eq!(progress.stage(), Some("generating notes"));
        assert_eq!(progress.percent(), 50);

        let mut idle = Progress::new(2);
        idle.next_stage("too early");
        assert_eq!(idle.stage(), None);
        assert_eq!(idle.state(), State::Idle);
    }

    #[test]
    fn test_stage_done_without_start_is_ignored() {
        let mut progress = Progress::new(2);
        progress.stage_done();
        assert_eq!(progress.state(), State::Idle);
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn test_start_after_done_begins_new_request() {
        let mut progress = Progress::new(1);
        progress.start("only stage");
        progress.stage_done();
        assert!(progress.is_done());

        progress.start("next request");
        assert_eq!(progress.state(), State::InFlight);
        assert_eq!(progress.stage(), Some("next request"));
        assert_eq!(progress.percent(), 0);
    }

    #[test]
    fn test_stage_done_after_done_is_ignored() {
        let mut progress = Progress::new(1);
        progress.start("only stage");
        progress.stage_done();
        progress.stage_done();
        assert_eq!(progress.state(), State::Done);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_finish_jumps_to_done() {
        let mut progress = Progress::new(4);
        progress.start("first");
        progress.finish();
        assert!(progress.is_done());
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_percent_never_decreases_within_a_request() {
        let mut progress = Progress::new(3);
        progress.start("fetch");
        let mut last = progress.percent();
        for stage in ["summarize", "render"] {
            progress.stage_done();
            assert!(progress.percent() >= last);
            last = progress.percent();
            progress.next_stage(stage);
            assert!(progress.percent() >= last);
            last = progress.percent();
        }
        progress.stage_done();
        assert!(progress.percent() >= last);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_identical_signals_identical_trajectory() {
        let run = |signals: &[&'static str]| {
            let mut progress = Progress::new(signals.len());
            let mut readings = vec![progress.percent()];
            for (i, &stage) in signals.iter().enumerate() {
                if i == 0 {
                    progress.start(stage);
                } else {
                    progress.next_stage(stage);
                }
                readings.push(progress.percent());
                progress.stage_done();
                readings.push(progress.percent());
            }
            readings
        };

        let signals = ["fetch", "summarize"];
        assert_eq!(run(&signals), run(&signals));
    }
}
