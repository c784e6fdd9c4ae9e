use chrono::{DateTime, Duration, TimeZone, Utc};
use interval_timer::{
    schedule::expand,
    state::{Cue, PhaseTracker},
    Schedule, ScheduleBlock, TimerEngine, TimerStatus, TimingError,
};

fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

fn default_schedule() -> Schedule {
    Schedule::new(vec![ScheduleBlock::new(7.0, 4.0, 20.0).unwrap()])
}

#[test]
fn test_full_session_walkthrough() {
    let mut engine = TimerEngine::new(default_schedule());
    assert_eq!(engine.status(), TimerStatus::Idle);
    assert_eq!(engine.elapsed_relative(), Ok(0.0));

    engine.resume(at(1_000));
    engine.advance(at(1_010));

    let sequence = engine.session_sequence();
    assert_eq!(sequence.len(), 2);
    assert_eq!((sequence[0].start, sequence[0].duration, sequence[0].working), (0.0, 7.0, true));
    assert_eq!((sequence[1].start, sequence[1].duration, sequence[1].period), (7.0, 3.0, 4.0));
    assert!(!engine.is_working());
    assert_eq!(engine.remaining(), 1.0);

    engine.pause(at(1_010));
    engine.resume(at(5_000));
    engine.advance(at(5_010));

    assert!(engine.is_finished());
    assert_eq!(engine.status(), TimerStatus::Finished);
    assert_eq!(engine.elapsed(), 20.0);
    let last = *engine.session_sequence().last().unwrap();
    assert_eq!((last.start, last.duration, last.period, last.working), (18.0, 2.0, 2.0, false));
    assert_eq!(engine.elapsed_relative(), Ok(1.0));

    engine.reset();
    assert_eq!(engine.status(), TimerStatus::Idle);
}

#[test]
fn test_pause_preserves_elapsed_regardless_of_gap() {
    for gap_hours in [0_i64, 1, 24, 24 * 30] {
        let schedule = Schedule::new(vec![ScheduleBlock::new(40.0, 20.0, 3_600.0).unwrap()]);
        let mut engine = TimerEngine::new(schedule);

        engine.resume(at(0));
        engine.pause(at(100));
        assert_eq!(engine.elapsed(), 100.0);

        let t_resume = 100 + gap_hours * 3_600;
        engine.resume(at(t_resume));
        engine.advance(at(t_resume + 45));
        engine.pause(at(t_resume + 45));
        assert_eq!(engine.elapsed(), 145.0, "gap of {gap_hours}h");
    }
}

#[test]
fn test_frequent_ticks_match_single_advance() {
    let mut ticked = TimerEngine::new(default_schedule());
    let mut jumped = TimerEngine::new(default_schedule());
    let start = at(0);

    ticked.resume(start);
    jumped.resume(start);
    for step in 1..=50 {
        ticked.advance(start + Duration::milliseconds(step * 250));
    }
    jumped.advance(start + Duration::milliseconds(50 * 250));

    assert_eq!(ticked.elapsed(), 12.5);
    assert_eq!(ticked.elapsed(), jumped.elapsed());
    assert_eq!(ticked.session_sequence(), jumped.session_sequence());
}

#[test]
fn test_cues_follow_session() {
    let schedule = Schedule::new(vec![
        ScheduleBlock::new(3.0, 2.0, 10.0).unwrap(),
        ScheduleBlock::new(4.0, 0.0, 4.0).unwrap(),
    ]);
    let mut engine = TimerEngine::new(schedule);
    let mut tracker = PhaseTracker::new();
    let mut cues = Vec::new();

    engine.resume(at(0));
    for t in 1..=16 {
        engine.advance(at(t));
        if let Some(cue) = tracker.observe(&engine) {
            cues.push(cue);
        }
    }

    assert_eq!(
        cues,
        vec![Cue::Work, Cue::Rest, Cue::Work, Cue::Rest, Cue::Work, Cue::End]
    );
}

#[test]
fn test_expansion_ends_on_session_boundary() {
    let schedule = Schedule::new(vec![
        ScheduleBlock::new(7.0, 4.0, 20.0).unwrap(),
        ScheduleBlock::new(45.0, 15.0, 100.0).unwrap(),
        ScheduleBlock::new(1.5, 0.5, 3.0).unwrap(),
    ]);
    let session = schedule.session_duration();
    let sequence = expand(&schedule, session);
    let last = sequence.last().unwrap();
    assert_eq!(last.start + last.duration, session);

    let total: f64 = sequence.iter().map(|p| p.duration).sum();
    assert_eq!(total, session);
}

#[test]
fn test_degenerate_schedule_is_surfaced() {
    let mut engine = TimerEngine::new(default_schedule());
    engine.set_schedule(Schedule::default());
    assert_eq!(engine.elapsed_relative(), Err(TimingError::DivisionByZero));
    assert!(engine.session_sequence().is_empty());
    assert_eq!(engine.remaining(), 0.0);
}
