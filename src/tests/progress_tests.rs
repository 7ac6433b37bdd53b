use super::*;
use anyhow::anyhow;

struct Script {
    samples: Vec<Result<ProgressSnapshot>>,
    calls: usize,
}

impl Script {
    fn new(samples: Vec<Result<ProgressSnapshot>>) -> Self {
        Self { samples, calls: 0 }
    }
}

impl ProgressSource for Script {
    fn progress(&mut self) -> Result<ProgressSnapshot> {
        let i = self.calls.min(self.samples.len() - 1);
        self.calls += 1;
        match &self.samples[i] {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(anyhow!("{e}")),
        }
    }
}

fn running(current: u64, total: u64) -> ProgressSnapshot {
    ProgressSnapshot {
        is_running: true,
        current,
        total,
        message: "updating".into(),
    }
}

fn finished() -> ProgressSnapshot {
    ProgressSnapshot {
        is_running: false,
        current: 10,
        total: 10,
        message: "done".into(),
    }
}

#[test]
fn percent_is_guarded_against_zero_total() {
    assert_eq!(running(50, 200).percent(), 25.0);
    assert_eq!(running(3, 0).percent(), 0.0);
    // Over-reporting clamps instead of overflowing the gauge.
    assert_eq!(running(300, 200).percent(), 100.0);
}

#[test]
fn first_tick_fires_immediately_on_start() {
    let t0 = Instant::now();
    let mut src = Script::new(vec![Ok(running(1, 4))]);
    let mut poller = ProgressPoller::new();
    poller.start(t0);
    poller.poll(t0, &mut src);
    assert_eq!(src.calls, 1);
    assert_eq!(poller.display().unwrap().current, 1);
}

#[test]
fn ticks_respect_the_period() {
    let t0 = Instant::now();
    let mut src = Script::new(vec![Ok(running(1, 4))]);
    let mut poller = ProgressPoller::new();
    poller.start(t0);
    poller.poll(t0, &mut src);
    poller.poll(t0 + Duration::from_millis(500), &mut src);
    assert_eq!(src.calls, 1, "half a period elapsed, no second request");
    poller.poll(t0 + TICK_PERIOD, &mut src);
    assert_eq!(src.calls, 2);
}

#[test]
fn restart_replaces_the_previous_schedule() {
    let t0 = Instant::now();
    let mut src = Script::new(vec![Ok(running(1, 4))]);
    let mut poller = ProgressPoller::new();
    poller.start(t0);
    poller.poll(t0, &mut src);
    // Second start drops the t0+1s deadline and fires its own first tick.
    poller.start(t0 + Duration::from_millis(900));
    poller.poll(t0 + Duration::from_millis(900), &mut src);
    assert_eq!(src.calls, 2);
    poller.poll(t0 + Duration::from_millis(950), &mut src);
    assert_eq!(src.calls, 2, "old schedule must not fire alongside the new one");
}

#[test]
fn completion_drains_then_requests_a_status_refresh() {
    let t0 = Instant::now();
    let mut src = Script::new(vec![Ok(finished())]);
    let mut poller = ProgressPoller::new();
    poller.start(t0);
    assert_eq!(poller.poll(t0, &mut src), PollOutcome::Unchanged);
    assert!(poller.display().is_some(), "final message stays visible while draining");

    let early = poller.poll(t0 + Duration::from_millis(1500), &mut src);
    assert_eq!(early, PollOutcome::Unchanged);

    let done = poller.poll(t0 + DRAIN_DELAY, &mut src);
    assert_eq!(done, PollOutcome::RefreshStatus);
    assert!(poller.display().is_none());
    assert!(!poller.is_active());

    // The refresh signal fires exactly once.
    let again = poller.poll(t0 + DRAIN_DELAY + TICK_PERIOD, &mut src);
    assert_eq!(again, PollOutcome::Unchanged);
    assert_eq!(src.calls, 1);
}

#[test]
fn request_failure_leaves_state_unchanged_and_retries_next_tick() {
    let t0 = Instant::now();
    let mut src = Script::new(vec![Err(anyhow!("connection refused")), Ok(running(2, 4))]);
    let mut poller = ProgressPoller::new();
    poller.start(t0);
    poller.poll(t0, &mut src);
    assert!(poller.is_active());
    poller.poll(t0 + TICK_PERIOD, &mut src);
    assert_eq!(poller.display().unwrap().current, 2);
}

#[test]
fn resume_enters_polling_only_when_a_job_is_running() {
    let t0 = Instant::now();
    let mut idle_src = Script::new(vec![Ok(finished())]);
    let mut poller = ProgressPoller::new();
    poller.resume(t0, &mut idle_src);
    assert!(!poller.is_active());
    assert!(poller.display().is_none());

    let mut busy_src = Script::new(vec![Ok(running(3, 9))]);
    poller.resume(t0, &mut busy_src);
    assert!(poller.is_active());
    assert_eq!(poller.display().unwrap().percent() as u64, 33);
}
