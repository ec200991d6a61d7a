use std::time::Duration;

use hero_typewriter::{
    Clock, Document, ManualClock, Mutation, Page, Phase, Script, Sequencer, StartOutcome, Status, Targets, Timings,
};

fn arndy_script() -> Script {
    Script {
        greetings: vec!["Howdy".to_string(), "Hola".to_string()],
        name: "I'm Arndy".to_string(),
        subtitle_1: "A".to_string(),
        subtitle_2: "B".to_string(),
    }
}

fn recording_sequencer(script: Script) -> Sequencer<Document> {
    let targets = Targets::default();
    let page = Document::with_targets(targets.required()).recording();
    Sequencer::new(script, targets, Timings::default(), page).unwrap()
}

/// Jumps the clock from deadline to deadline until `until` or until nothing is scheduled.
fn run_until(sequencer: &mut Sequencer<Document>, clock: &ManualClock, until: Duration) {
    while let Some(due) = sequencer.next_deadline() {
        if due > until {
            break;
        }
        clock.set(due);
        sequencer.tick(clock.now());
    }
    clock.set(until);
    sequencer.tick(clock.now());
}

fn run_intro_to_completion(sequencer: &mut Sequencer<Document>, clock: &ManualClock) {
    while !sequencer.state().intro_complete {
        let due = sequencer.next_deadline().expect("intro stalled");
        clock.set(due);
        sequencer.tick(clock.now());
    }
}

fn texts_of<'a>(journal: &'a [Mutation], target: &str) -> Vec<&'a str> {
    journal
        .iter()
        .filter_map(|m| match m {
            Mutation::Text { target: t, text } if t == target => Some(text.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn intro_renders_every_target() {
    let clock = ManualClock::new();
    let mut seq = recording_sequencer(arndy_script());
    assert_eq!(seq.run_intro(clock.now()), StartOutcome::Started);

    run_intro_to_completion(&mut seq, &clock);

    let page = seq.page();
    assert_eq!(page.text("greeting-text"), Some("Howdy"));
    assert_eq!(page.text("name-text"), Some(" I'm Arndy"));
    assert_eq!(page.text("subtitle-1"), Some("A "));
    assert_eq!(page.text("subtitle-2"), Some("B "));
    assert!(page.is_visible("view-work-btn"));
    assert_eq!(seq.state().phase, Phase::Rotating);
}

#[test]
fn intro_is_typed_one_character_at_a_time() {
    let clock = ManualClock::new();
    let mut seq = recording_sequencer(arndy_script());
    seq.run_intro(clock.now());
    run_intro_to_completion(&mut seq, &clock);

    let journal = seq.page().journal();
    assert_eq!(texts_of(journal, "greeting-text"), vec!["H", "Ho", "How", "Howd", "Howdy"]);
    assert_eq!(texts_of(journal, "name-text").len(), " I'm Arndy".len());
    assert_eq!(texts_of(journal, "subtitle-1"), vec!["A "]);
}

#[test]
fn phases_never_overlap() {
    let clock = ManualClock::new();
    let mut seq = recording_sequencer(Script {
        subtitle_1: "Video editor and designer".to_string(),
        subtitle_2: "Stories frame by frame".to_string(),
        ..arndy_script()
    });
    seq.run_intro(clock.now());
    run_until(&mut seq, &clock, Duration::from_secs(30));

    // Position of the first and last write of each intro target
    let journal = seq.page().journal();
    let span = |target: &str| {
        let positions: Vec<usize> = journal
            .iter()
            .enumerate()
            .filter(|(_, m)| matches!(m, Mutation::Text { target: t, .. } if t == target))
            .map(|(i, _)| i)
            .collect();
        (positions[0], positions[positions.len() - 1])
    };

    let name = span("name-text");
    let sub1 = span("subtitle-1");
    let sub2 = span("subtitle-2");
    let shown = journal
        .iter()
        .position(|m| matches!(m, Mutation::Shown { .. }))
        .unwrap();
    let first_greeting_after_intro = journal[shown..]
        .iter()
        .position(|m| matches!(m, Mutation::Text { target, .. } if target == "greeting-text"))
        .unwrap()
        + shown;

    assert_eq!(texts_of(journal, "greeting-text")[4], "Howdy");
    assert!(name.1 < sub1.0);
    assert!(sub1.1 < sub2.0);
    assert!(sub2.1 < shown);
    assert!(shown < first_greeting_after_intro);

    // Intro targets are written only during their own phase
    assert_eq!(seq.page().text("name-text"), Some(" I'm Arndy"));
    assert_eq!(seq.page().text("subtitle-1"), Some("Video editor and designer "));
    assert_eq!(seq.page().text("subtitle-2"), Some("Stories frame by frame "));
}

#[test]
fn rotation_types_next_greeting_and_empties_before_each_cycle() {
    let clock = ManualClock::new();
    let mut seq = recording_sequencer(arndy_script());
    seq.run_intro(clock.now());
    run_intro_to_completion(&mut seq, &clock);

    // Enough for two full rotation cycles
    run_until(&mut seq, &clock, clock.now() + Duration::from_secs(12));

    let greetings = texts_of(seq.page().journal(), "greeting-text");
    let rotation = &greetings[5..];
    assert_eq!(&rotation[..5], &["Howd", "How", "Ho", "H", ""]);
    assert_eq!(&rotation[5..9], &["H", "Ho", "Hol", "Hola"]);
    assert_eq!(&rotation[9..13], &["Hol", "Ho", "H", ""]);
    assert_eq!(&rotation[13..18], &["H", "Ho", "How", "Howd", "Howdy"]);

    // Every typing run starts from an empty slot
    for window in rotation.windows(2) {
        if window[1] == "H" && window[0] != "Ho" {
            assert_eq!(window[0], "");
        }
    }
}

#[test]
fn rotation_holds_fully_typed_greeting() {
    let clock = ManualClock::new();
    let mut seq = recording_sequencer(arndy_script());
    seq.run_intro(clock.now());
    run_intro_to_completion(&mut seq, &clock);

    let start = clock.now() + Duration::from_secs(3);
    // Erase "Howdy": 5 steps, empty check, then "Hola": 4 steps, completion check
    let hola_typed = start + Duration::from_millis(5 * 50) + Duration::from_millis(3 * 150);
    run_until(&mut seq, &clock, hola_typed);
    assert_eq!(seq.page().text("greeting-text"), Some("Hola"));

    run_until(&mut seq, &clock, hola_typed + Duration::from_millis(150 + 1999));
    assert_eq!(seq.page().text("greeting-text"), Some("Hola"));

    run_until(&mut seq, &clock, hola_typed + Duration::from_millis(150 + 2000));
    assert_eq!(seq.page().text("greeting-text"), Some("Hol"));
}

#[test]
fn rotation_wraps_around_the_list() {
    let clock = ManualClock::new();
    let targets = Targets::default();
    let page = Document::with_targets(targets.required());
    let script = Script {
        greetings: vec!["A".into(), "B".into(), "C".into()],
        ..arndy_script()
    };
    let mut seq = Sequencer::new(script, targets, Timings::default(), page).unwrap();
    seq.run_intro(clock.now());

    let mut order = Vec::new();
    while order.len() < 7 {
        let due = seq.next_deadline().unwrap();
        clock.set(due);
        seq.tick(clock.now());
        if seq.state().phase == Phase::Rotating && order.last() != Some(&seq.state().greeting_index) {
            order.push(seq.state().greeting_index);
        }
    }
    assert_eq!(order, vec![0, 1, 2, 0, 1, 2, 0]);
}

#[test]
fn missing_name_target_writes_nothing() {
    let clock = ManualClock::new();
    let targets = Targets::default();
    let mut page = Document::with_targets(targets.required()).recording();
    page.remove("name-text");

    let mut seq = Sequencer::new(arndy_script(), targets, Timings::default(), page).unwrap();
    assert_eq!(
        seq.run_intro(clock.now()),
        StartOutcome::MissingTarget("name-text".to_string())
    );
    clock.advance(Duration::from_secs(60));
    assert_eq!(seq.tick(clock.now()), 0);

    let page = seq.into_page();
    assert_eq!(page.mutations(), 0);
    assert!(page.journal().is_empty());
    for id in ["greeting-text", "subtitle-1", "subtitle-2"] {
        assert_eq!(page.text(id), Some(""));
    }
    assert_eq!(page.text("name-text"), None);
}

#[test]
fn starting_twice_does_not_duplicate_text() {
    let clock = ManualClock::new();
    let mut once = recording_sequencer(arndy_script());
    let mut twice = recording_sequencer(arndy_script());
    once.run_intro(clock.now());
    twice.run_intro(clock.now());

    let mut restarts = Vec::new();
    for _ in 0..60 {
        let due = once.next_deadline().unwrap();
        clock.set(due);
        once.tick(clock.now());
        restarts.push(twice.run_intro(clock.now()));
        twice.tick(clock.now());
    }

    assert!(restarts.iter().all(|r| *r == StartOutcome::AlreadyRunning));
    assert_eq!(once.page().journal(), twice.page().journal());
    assert_eq!(once.state(), twice.state());
}

#[test]
fn stop_from_another_thread_freezes_the_page() {
    let clock = ManualClock::new();
    let mut seq = recording_sequencer(arndy_script());
    seq.run_intro(clock.now());
    run_until(&mut seq, &clock, Duration::from_millis(1500));

    let handle = seq.stop_handle();
    std::thread::spawn(move || handle.stop()).join().unwrap();

    let writes = seq.page().mutations();
    run_until(&mut seq, &clock, Duration::from_secs(60));
    assert_eq!(seq.status(), Status::Stopped);
    assert_eq!(seq.page().mutations(), writes);
}

#[test]
fn restart_after_stop_replays_intro_from_scratch() {
    let clock = ManualClock::new();
    let mut seq = recording_sequencer(arndy_script());
    seq.run_intro(clock.now());
    run_until(&mut seq, &clock, Duration::from_secs(8));
    seq.stop();

    assert_eq!(seq.run_intro(clock.now()), StartOutcome::Started);
    for id in ["greeting-text", "name-text", "subtitle-1", "subtitle-2"] {
        assert_eq!(seq.page().text(id), Some(""));
    }

    run_intro_to_completion(&mut seq, &clock);
    assert_eq!(seq.page().text("greeting-text"), Some("Howdy"));
    assert_eq!(seq.page().text("subtitle-2"), Some("B "));
}

#[test]
fn custom_page_receives_every_write() {
    struct Tally {
        inner: Document,
        writes: usize,
    }

    impl Page for Tally {
        fn contains(&self, id: &str) -> bool {
            self.inner.contains(id)
        }
        fn set_text(&mut self, id: &str, text: &str) {
            self.writes += 1;
            self.inner.set_text(id, text);
        }
        fn append_word(&mut self, id: &str, word: &str) {
            self.writes += 1;
            self.inner.append_word(id, word);
        }
        fn clear(&mut self, id: &str) {
            self.inner.clear(id);
        }
        fn show(&mut self, id: &str) {
            self.inner.show(id);
        }
    }

    let targets = Targets::default();
    let page = Tally {
        inner: Document::with_targets(targets.required()),
        writes: 0,
    };
    let mut seq = Sequencer::new(arndy_script(), targets, Timings::default(), page).unwrap();
    seq.run_intro(Duration::ZERO);
    seq.tick(Duration::from_secs(5));

    // 5 greeting chars, 10 name chars, 2 subtitle words
    assert_eq!(seq.page().writes, 17);
    assert_eq!(seq.page().inner.text("subtitle-2"), Some("B "));
}
