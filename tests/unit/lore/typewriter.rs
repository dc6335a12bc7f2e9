use super::*;
use crate::lore::lines::{CURSOR_GLYPH, LINES, default_lines};
use crate::lore::view::Tone;

fn drive_to_end(tw: &mut Typewriter) -> (Duration, Vec<Step>) {
    let mut elapsed = Duration::ZERO;
    let mut steps = Vec::new();
    let mut step = tw.start();
    while let Some(delay) = step.delay {
        elapsed += delay;
        step = tw.advance();
        steps.push(step.clone());
    }
    (elapsed, steps)
}

#[test]
fn starts_typing_first_line_with_bare_cursor() {
    let mut tw = Typewriter::new(default_lines(), LoreTiming::default()).unwrap();
    let step = tw.start();
    assert_eq!(tw.state(), LoreState::Typing { line: 0, chars: 0 });
    assert_eq!(step.view.unwrap().rendered(), CURSOR_GLYPH.to_string());
    assert_eq!(step.delay, Some(Duration::from_millis(32)));
    assert!(tw.start().view.is_none());
}

#[test]
fn each_line_gets_exactly_len_reveals() {
    let mut tw = Typewriter::new(default_lines(), LoreTiming::default()).unwrap();
    drive_to_end(&mut tw);
    for (i, line) in LINES.iter().enumerate() {
        assert_eq!(tw.reveal_count(i), line.chars().count(), "line {i}");
    }
}

#[test]
fn total_elapsed_matches_timing_formula() {
    let timing = LoreTiming::default();
    let mut tw = Typewriter::new(default_lines(), timing).unwrap();
    let (elapsed, steps) = drive_to_end(&mut tw);
    assert_eq!(elapsed, timing.total_duration(&LINES[..]));
    assert_eq!(elapsed, tw.total_duration());
    assert_eq!(steps.iter().filter(|s| s.finished).count(), 1);
    assert!(steps.last().unwrap().finished);
}

#[test]
fn walks_hold_fade_and_interline_states_in_order() {
    let lines = vec!["ab".to_string(), "c".to_string()];
    let mut tw = Typewriter::new(lines, LoreTiming::default()).unwrap();
    tw.start();

    let mut seen = vec![tw.state()];
    while !tw.is_done() {
        tw.advance();
        seen.push(tw.state());
    }

    assert_eq!(
        seen,
        vec![
            LoreState::Typing { line: 0, chars: 0 },
            LoreState::Typing { line: 0, chars: 1 },
            LoreState::HoldingComplete { line: 0 },
            LoreState::FadingOut { line: 0 },
            LoreState::FadingIn { line: 1 },
            LoreState::Typing { line: 1, chars: 0 },
            LoreState::HoldingComplete { line: 1 },
            LoreState::FadingOut { line: 1 },
            LoreState::FadingIn { line: 2 },
            LoreState::Archive(ArchivePhase::Showing),
            LoreState::Archive(ArchivePhase::Fading),
            LoreState::Done,
        ]
    );
}

#[test]
fn fade_steps_wait_for_shared_fade_duration() {
    let lines = vec!["a".to_string()];
    let mut tw = Typewriter::new(lines, LoreTiming::default()).unwrap();
    tw.start();
    tw.advance(); // reveal 'a', hold
    let fade = tw.advance();
    assert!(fade.view.as_ref().unwrap().fading);
    assert_eq!(fade.view.unwrap().text, "a");
    assert_eq!(fade.delay, Some(crate::animation::fade::FADE_DURATION));

    let cleared = tw.advance();
    let v = cleared.view.unwrap();
    assert!(!v.fading);
    assert_eq!(v.text, "");
}

#[test]
fn archive_message_is_muted_without_cursor() {
    let lines = vec!["a".to_string()];
    let mut tw = Typewriter::new(lines, LoreTiming::default()).unwrap();
    tw.start();
    for _ in 0..4 {
        tw.advance();
    }
    assert_eq!(tw.state(), LoreState::Archive(ArchivePhase::Showing));
    let v = tw.view();
    assert_eq!(v.text, ARCHIVE_COMPLETE);
    assert_eq!(v.tone, Tone::Muted);
    assert!(!v.cursor);
}

#[test]
fn completion_fires_once_and_done_is_inert() {
    let mut tw = Typewriter::new(vec!["x".to_string()], LoreTiming::default()).unwrap();
    drive_to_end(&mut tw);
    assert!(tw.is_done());
    assert!(tw.view().is_blank());
    let after = tw.advance();
    assert!(!after.finished);
    assert!(after.delay.is_none());
    assert!(!tw.skip().finished);
}

#[test]
fn skip_finishes_immediately() {
    let mut tw = Typewriter::new(default_lines(), LoreTiming::default()).unwrap();
    tw.start();
    tw.advance();
    let step = tw.skip();
    assert!(step.finished);
    assert!(tw.is_done());
    assert_eq!(tw.cursor(), (LINES.len(), 0));
}

#[test]
fn empty_line_skips_straight_to_hold() {
    let lines = vec![String::new(), "z".to_string()];
    let mut tw = Typewriter::new(lines.clone(), LoreTiming::default()).unwrap();
    let step = tw.start();
    assert_eq!(tw.state(), LoreState::HoldingComplete { line: 0 });
    assert_eq!(step.delay, Some(Duration::from_millis(520)));

    let mut tw = Typewriter::new(lines, LoreTiming::default()).unwrap();
    drive_to_end(&mut tw);
    assert_eq!(tw.reveal_count(0), 0);
    assert_eq!(tw.reveal_count(1), 1);
}

#[test]
fn rejects_empty_line_list() {
    assert!(Typewriter::new(vec![], LoreTiming::default()).is_err());
}

#[test]
fn multibyte_lines_reveal_whole_characters() {
    let mut tw = Typewriter::new(vec!["é—z".to_string()], LoreTiming::default()).unwrap();
    tw.start();
    let texts: Vec<String> = (0..3)
        .map(|_| tw.advance().view.unwrap().text)
        .collect();
    assert_eq!(texts, vec!["é", "é—", "é—z"]);
}
