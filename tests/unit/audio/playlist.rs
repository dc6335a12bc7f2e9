use std::cell::Cell;
use std::rc::Rc;

use super::*;

fn tracks(n: usize) -> Vec<Track> {
    (0..n)
        .map(|i| Track::new(format!("t{i}"), format!("./assets/t{i}.mp3")))
        .collect()
}

fn playlist(n: usize, start: usize) -> Playlist<HeadlessPlayer> {
    let mut p = Playlist::new(HeadlessPlayer::new());
    p.init(tracks(n), start, 0.6);
    p
}

#[test]
fn set_track_wraps_in_both_directions() {
    let mut p = playlist(3, 0);
    p.set_track(-1);
    assert_eq!(p.current_index(), 2);
    p.set_track(7);
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.label(), "t1");
    assert_eq!(p.player().src.as_deref(), Some("./assets/t1.mp3"));
}

#[test]
fn init_selects_start_and_applies_volume() {
    let p = playlist(4, 6);
    assert_eq!(p.current_index(), 2);
    assert_eq!(p.player().volume, 0.6);
    assert_eq!(p.player().loads, 1);
    assert!(p.player().is_paused());
    assert_eq!(p.button(), ButtonGlyph::Play);
}

#[test]
fn empty_playlist_ignores_navigation() {
    let mut p = Playlist::new(HeadlessPlayer::new());
    p.init(Vec::new(), 3, 1.0);
    p.next();
    p.prev();
    p.set_track(5);
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.player().loads, 0);
    assert!(p.current().is_none());
}

#[test]
fn play_current_reflects_refusal_on_button() {
    let mut p = Playlist::new(HeadlessPlayer::blocked());
    p.init(tracks(2), 0, 1.0);
    p.play_current();
    assert_eq!(p.button(), ButtonGlyph::Play);
    assert!(p.player().is_paused());

    p.player_mut().autoplay_blocked = false;
    p.toggle();
    assert_eq!(p.button(), ButtonGlyph::Pause);
    assert!(!p.player().is_paused());
}

#[test]
fn toggle_pauses_and_resumes() {
    let mut p = playlist(2, 0);
    p.play_current();
    p.toggle();
    assert_eq!(p.button(), ButtonGlyph::Play);
    assert!(p.player().is_paused());
    p.toggle();
    assert_eq!(p.button(), ButtonGlyph::Pause);
    assert_eq!(p.player().plays, 2);
}

#[test]
fn next_prev_move_and_play() {
    let mut p = playlist(3, 2);
    p.next();
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.button(), ButtonGlyph::Pause);
    p.prev();
    p.prev();
    assert_eq!(p.current_index(), 1);
    assert_eq!(p.player().plays, 3);
}

#[test]
fn ended_advances_and_error_sets_label() {
    let mut p = playlist(2, 1);
    p.play_current();
    p.on_media_event(MediaEvent::Ended);
    assert_eq!(p.current_index(), 0);
    assert_eq!(p.label(), "t0");

    p.on_media_event(MediaEvent::Error(3));
    assert_eq!(p.label(), "Track failed to load (Decode error)");
    assert_eq!(p.button(), ButtonGlyph::Play);

    p.on_media_event(MediaEvent::Error(0));
    assert_eq!(p.label(), "Track failed to load (Unknown)");

    p.on_media_event(MediaEvent::Stalled);
    p.on_media_event(MediaEvent::CanPlay);
    assert_eq!(p.current_index(), 0);
}

#[test]
fn error_names_cover_media_codes() {
    let names: Vec<_> = (1..=4).map(media_error_name).collect();
    assert_eq!(
        names,
        vec!["Aborted", "Network error", "Decode error", "Source not supported"]
    );
    assert_eq!(media_error_name(9), "Unknown");
}

#[test]
fn volume_is_clamped_and_nan_ignored() {
    let mut p = playlist(1, 0);
    p.set_volume(1.7);
    assert_eq!(p.player().volume, 1.0);
    p.set_volume(-0.2);
    assert_eq!(p.volume(), 0.0);
    p.set_volume(f64::NAN);
    assert_eq!(p.volume(), 0.0);
}

struct Backdrop {
    playing: Rc<Cell<bool>>,
}

impl MediaPlayer for Backdrop {
    fn load(&mut self, _src: &str) {}
    fn play(&mut self) -> RelicResult<()> {
        self.playing.set(true);
        Ok(())
    }
    fn pause(&mut self) {
        self.playing.set(false);
    }
    fn is_paused(&self) -> bool {
        !self.playing.get()
    }
    fn set_volume(&mut self, _volume: f64) {}
}

#[test]
fn backdrop_follows_play_state() {
    let playing = Rc::new(Cell::new(false));
    let mut p = Playlist::new(HeadlessPlayer::new()).with_backdrop(Box::new(Backdrop {
        playing: Rc::clone(&playing),
    }));
    p.init(tracks(1), 0, 1.0);
    p.play_current();
    assert!(playing.get());
    p.toggle();
    assert!(!playing.get());
}

#[test]
fn backdrop_attached_mid_playback_starts_immediately() {
    let playing = Rc::new(Cell::new(false));
    let mut p = playlist(2, 0);
    p.play_current();
    p.set_backdrop(Box::new(Backdrop {
        playing: Rc::clone(&playing),
    }));
    assert!(playing.get());
    assert_eq!(p.backdrop().map(|b| b.is_paused()), Some(false));
}
