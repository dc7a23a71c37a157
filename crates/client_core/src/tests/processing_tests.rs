use super::*;
use crate::schedule::TokioClock;

#[test]
fn standard_phases_last_four_seconds() {
    let sequence = ProcessingSequence::default();
    assert_eq!(PROCESSING_PHASES.len(), 5);
    assert_eq!(sequence.total_duration(), Duration::from_millis(4000));
    assert_eq!(PROCESSING_PHASES[0].id, "analyze");
    assert_eq!(PROCESSING_PHASES[4].text, "Připravujeme osobní prostor");
}

#[test]
fn snapshot_tracks_phase_and_progress() {
    let sequence = ProcessingSequence::default();

    let start = sequence.initial();
    assert_eq!(start.phase_index, 0);
    assert_eq!(start.phase_text, "Analyzujeme váš cíl");
    assert_eq!(start.progress, 0.0);
    assert!(!start.complete);

    let halfway_first = sequence.snapshot_at(Duration::from_millis(400));
    assert_eq!(halfway_first.phase_index, 0);
    assert!((halfway_first.progress - 10.0).abs() < 0.01);

    let second = sequence.snapshot_at(Duration::from_millis(800));
    assert_eq!(second.phase_index, 1);
    assert!((second.progress - 20.0).abs() < 0.01);

    let last = sequence.snapshot_at(Duration::from_millis(3999));
    assert_eq!(last.phase_index, 4);
    assert!(!last.complete);
}

#[test]
fn snapshot_completes_once_total_elapses() {
    let sequence = ProcessingSequence::default();
    let done = sequence.snapshot_at(Duration::from_secs(10));
    assert!(done.complete);
    assert_eq!(done.phase_index, 4);
    assert_eq!(done.progress, 100.0);
}

#[test]
fn progress_never_decreases() {
    let sequence = ProcessingSequence::default();
    let mut previous = 0.0_f32;
    for ms in (0..=4100).step_by(50) {
        let snapshot = sequence.snapshot_at(Duration::from_millis(ms));
        assert!(snapshot.progress >= previous, "regressed at {ms} ms");
        previous = snapshot.progress;
    }
}

#[test]
fn empty_sequence_is_complete_immediately() {
    let sequence = ProcessingSequence::new(&[]);
    assert_eq!(sequence.total_duration(), Duration::ZERO);
    assert!(sequence.initial().complete);
}

#[tokio::test(start_paused = true)]
async fn run_publishes_until_complete() {
    let sequence = ProcessingSequence::default();
    let (tx, mut rx) = watch::channel(sequence.initial());

    let started = tokio::time::Instant::now();
    sequence.run(&TokioClock, &tx).await;

    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(4000) && elapsed < Duration::from_millis(4100));
    let last = *rx.borrow_and_update();
    assert!(last.complete);
    assert_eq!(last.progress, 100.0);
}
