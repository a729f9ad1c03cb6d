use std::sync::{Arc, Mutex};

use captions::{
    CaptionMode, FrameAdvanced, ListenerId, PlayerClock, Presentation, StyleConfig, SyncSession,
    TimedTextFormat, TranscriptionResponse, WordPhase, decode, decode_srt, decode_vtt, encode_vtt,
    transcript_rows,
};
use tokio::sync::mpsc;

const SRT: &str = include_str!("../data/interview.srt");
const VTT: &str = include_str!("../data/interview.vtt");

/// Player double that records every subscription change and seek.
#[derive(Default)]
struct FakePlayer {
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    frame: u64,
    listeners: Vec<(ListenerId, mpsc::UnboundedSender<FrameAdvanced>)>,
    next_id: u64,
    seeks: Vec<u64>,
    unsubscribed: Vec<ListenerId>,
}

impl FakePlayer {
    fn play_to(&self, frame: u64) {
        let mut state = self.state.lock().unwrap();
        state.frame = frame;
        for (_, tx) in &state.listeners {
            let _ = tx.send(FrameAdvanced { frame });
        }
    }
}

impl PlayerClock for FakePlayer {
    fn current_frame(&self) -> u64 {
        self.state.lock().unwrap().frame
    }

    fn subscribe(&self, listener: mpsc::UnboundedSender<FrameAdvanced>) -> ListenerId {
        let mut state = self.state.lock().unwrap();
        let id = ListenerId(state.next_id);
        state.next_id += 1;
        state.listeners.push((id, listener));
        id
    }

    fn unsubscribe(&self, id: ListenerId) {
        let mut state = self.state.lock().unwrap();
        state.listeners.retain(|(existing, _)| *existing != id);
        state.unsubscribed.push(id);
    }

    fn seek(&self, frame: u64) {
        self.state.lock().unwrap().seeks.push(frame);
        self.play_to(frame);
    }
}

#[test]
fn srt_and_vtt_fixtures_agree() {
    let srt = decode_srt(SRT);
    let vtt = decode_vtt(VTT);

    assert_eq!(srt.len(), 6);
    assert_eq!(srt, vtt);
    assert_eq!(srt[1].text, "We started the project two years ago\nas a weekend experiment.");

    // exporting and re-reading keeps the sequence intact
    assert_eq!(decode_vtt(&encode_vtt(&srt)), srt);
}

#[test]
fn karaoke_playback_through_player() {
    let player = Arc::new(FakePlayer::default());
    let style = StyleConfig::default().with_mode(CaptionMode::Karaoke);
    let mut session = SyncSession::attach(player.clone(), decode_srt(SRT), style);

    // 1.5s into "Thanks for joining us today." (0.5..3.2, five words)
    player.play_to(45);
    let update = session.poll().unwrap();
    assert_eq!(update.frame.active_index, Some(0));
    assert_eq!(update.scroll_to, Some(0));

    let Some(Presentation::Karaoke(overlay)) = update.frame.presentation else {
        panic!("expected karaoke overlay");
    };
    let phases: Vec<WordPhase> = overlay.words.iter().map(|w| w.phase).collect();
    assert_eq!(
        phases,
        [
            WordPhase::Spoken,
            WordPhase::Active,
            WordPhase::Pending,
            WordPhase::Pending,
            WordPhase::Pending,
        ]
    );

    // still inside the same segment: no second scroll
    player.play_to(60);
    assert_eq!(session.poll().unwrap().scroll_to, None);

    // the gap between segments clears the overlay
    player.play_to(10 * 30 + 15);
    let update = session.poll().unwrap();
    assert_eq!(update.frame.active_index, None);
    assert!(update.frame.presentation.is_none());
}

#[test]
fn clicking_a_row_seeks_the_player() {
    let player = Arc::new(FakePlayer::default());
    let mut session = SyncSession::attach(
        player.clone(),
        decode_srt(SRT),
        StyleConfig::default().with_mode(CaptionMode::NewsBar),
    );

    let frame = session.seek_to_segment(3).unwrap();
    assert_eq!(frame, 330);
    assert_eq!(player.state.lock().unwrap().seeks, [330]);

    let update = session.poll().unwrap();
    assert_eq!(update.frame.active_index, Some(3));
    assert_eq!(update.scroll_to, Some(3));
    assert!(matches!(
        update.frame.presentation,
        Some(Presentation::NewsBar(ref bar)) if bar.progress == 0.0
    ));

    let rows = transcript_rows(session.controller().segments(), update.frame.active_index);
    assert!(rows[3].is_active);
    assert_eq!(rows[3].start_label, "00:00:11");

    assert!(session.seek_to_segment(99).is_err());
    assert_eq!(player.state.lock().unwrap().seeks.len(), 1);
}

#[test]
fn teardown_unsubscribes_the_listener() {
    let player = Arc::new(FakePlayer::default());
    let session = SyncSession::attach(player.clone(), decode_srt(SRT), StyleConfig::default());
    let id = session.subscription().id();

    drop(session);

    let state = player.state.lock().unwrap();
    assert!(state.listeners.is_empty());
    assert_eq!(state.unsubscribed, [id]);
}

#[test]
fn new_transcription_replaces_segments() {
    let player = Arc::new(FakePlayer::default());
    let mut session = SyncSession::attach(player.clone(), Vec::new(), StyleConfig::default());

    player.play_to(30);
    assert_eq!(session.poll().unwrap().frame.active_index, None);

    let response = TranscriptionResponse {
        success: true,
        filename: "interview.mp4".to_string(),
        language: "en".to_string(),
        srt: SRT.to_string(),
        vtt: VTT.to_string(),
    };
    session
        .controller_mut()
        .replace_segments(response.segments(TimedTextFormat::Vtt));

    let update = session.tick();
    assert_eq!(update.frame.active_index, Some(0));
    assert_eq!(update.scroll_to, Some(0));
    assert_eq!(
        session.controller().segments().len(),
        decode(TimedTextFormat::Srt, SRT).len()
    );
}
