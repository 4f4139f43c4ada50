//! The warning deduplicator shared across threads and flag sets.

use std::sync::{Arc, Barrier};
use std::thread;

use cliflag::normalize::{NormalizationWarning, warn_word_sep_normalizer};
use cliflag::{FlagSet, UnderscoreWarnings};
use rstest::{fixture, rstest};
use test_helpers::capture::Recorder;

#[fixture]
fn recorder() -> Recorder {
    Recorder::new()
}

fn warnings_into(recorder: &Recorder) -> Arc<UnderscoreWarnings> {
    let sink = recorder.clone();
    Arc::new(UnderscoreWarnings::with_reporter(Arc::new(
        move |warning: &NormalizationWarning| sink.record(warning),
    )))
}

#[rstest]
fn concurrent_normalization_warns_exactly_once(recorder: Recorder) {
    const THREADS: usize = 16;
    let warnings = warnings_into(&recorder);
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let warnings = Arc::clone(&warnings);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                warnings.normalize("test_cmd").into_string()
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("worker finished"), "test-cmd");
    }
    assert_eq!(
        recorder.lines(),
        ["using an underscore in a flag name is not supported. test_cmd has been converted to test-cmd."]
    );
}

#[rstest]
fn sets_sharing_a_deduplicator_warn_once_per_raw_name(recorder: Recorder) {
    let warnings = warnings_into(&recorder);
    let mut first = FlagSet::with_normalizer("first", warn_word_sep_normalizer(Arc::clone(&warnings)));
    let mut second = FlagSet::with_normalizer("second", warn_word_sep_normalizer(Arc::clone(&warnings)));
    first.bool("dry_run", false, "").expect("registers");
    second.bool("dry_run", false, "").expect("registers");
    assert!(first.lookup("dry_run").is_some());
    second.string("log-dir", "", "").expect("registers");
    assert_eq!(recorder.len(), 1);
    assert!(warnings.has_warned("dry_run"));
    assert!(!warnings.has_warned("log-dir"));
}

#[rstest]
fn separate_deduplicators_do_not_share_state(recorder: Recorder) {
    let one = warnings_into(&recorder);
    let other = warnings_into(&recorder);
    let _ = one.normalize("a_b");
    let _ = other.normalize("a_b");
    assert_eq!(recorder.len(), 2);
}
