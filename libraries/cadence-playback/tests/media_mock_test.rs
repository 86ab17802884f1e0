//! Controller-to-media command sequences, checked against a mocked resource

use cadence_playback::{
    MediaResource, PlayAttempt, PlaybackError, PlaybackEvent, PlayerConfig, Result, Track,
    TransportController, TransportState,
};
use mockall::{mock, predicate::eq, Sequence};

mock! {
    pub Media {}

    impl MediaResource for Media {
        fn set_source(&mut self, locator: &str) -> Result<()>;
        fn load(&mut self) -> Result<()>;
        fn play(&mut self, attempt: PlayAttempt) -> Result<()>;
        fn pause(&mut self);
        fn position(&self) -> f64;
        fn set_position(&mut self, secs: f64) -> Result<()>;
        fn duration(&self) -> Option<f64>;
        fn volume(&self) -> f32;
        fn set_volume(&mut self, level: f32) -> Result<()>;
        fn has_ended(&self) -> bool;
    }
}

fn tracks() -> Vec<Track> {
    vec![Track::new("1", "One", "A"), Track::new("2", "Two", "B")]
}

#[test]
fn selecting_a_track_sets_source_then_loads_then_plays() {
    let mut media = MockMedia::new();
    let mut seq = Sequence::new();

    media.expect_set_volume().returning(|_| Ok(()));

    media
        .expect_set_source()
        .with(eq("/api/tracks/1"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    media
        .expect_load()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(()));
    media
        .expect_set_source()
        .with(eq("/api/tracks/2"))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    media
        .expect_load()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(()));
    media
        .expect_play()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));

    let mut player = TransportController::new(PlayerConfig::default(), media);
    player.load(tracks());
    player.select("2");

    assert_eq!(player.state(), TransportState::Playing);
}

#[test]
fn pausing_does_not_reload() {
    let mut media = MockMedia::new();
    media.expect_set_volume().returning(|_| Ok(()));
    media.expect_set_source().times(1).returning(|_| Ok(()));
    media.expect_load().times(1).returning(|| Ok(()));
    media.expect_play().times(2).returning(|_| Ok(()));
    media.expect_pause().times(1).return_const(());

    let mut player = TransportController::new(PlayerConfig::default(), media);
    player.load(tracks());
    player.toggle_play();
    player.toggle_play();
    player.toggle_play();

    assert!(player.is_playing());
}

#[test]
fn muted_volume_is_sent_as_zero() {
    let mut media = MockMedia::new();
    media
        .expect_set_volume()
        .with(eq(0.7f32))
        .times(1)
        .returning(|_| Ok(()));
    media
        .expect_set_volume()
        .with(eq(0.0f32))
        .times(1)
        .returning(|_| Ok(()));

    let mut player = TransportController::new(PlayerConfig::default(), media);
    player.toggle_mute();

    assert!(player.volume().is_muted());
}

#[test]
fn failed_seek_is_reported_not_fatal() {
    let mut media = MockMedia::new();
    media.expect_set_volume().returning(|_| Ok(()));
    media.expect_set_source().returning(|_| Ok(()));
    media.expect_load().returning(|| Ok(()));
    media
        .expect_set_position()
        .returning(|_| Err(PlaybackError::Media("not seekable".into())));

    let mut player = TransportController::new(PlayerConfig::default(), media);
    player.load(tracks());
    player.drain_events();

    player.seek(10.0);

    let events = player.drain_events();
    assert!(matches!(
        events.as_slice(),
        [PlaybackEvent::Error { message }] if message.contains("not seekable")
    ));
    assert_eq!(player.state(), TransportState::Paused);
}

#[test]
fn async_rejection_reverts_latest_attempt() {
    let mut media = MockMedia::new();
    media.expect_set_volume().returning(|_| Ok(()));
    media.expect_set_source().returning(|_| Ok(()));
    media.expect_load().returning(|| Ok(()));
    media.expect_play().returning(|_| Ok(()));

    let mut player = TransportController::new(PlayerConfig::default(), media);
    player.load(tracks());
    player.toggle_play();
    let attempt = player.play_attempt();

    player.handle_play_rejected(attempt, "NotAllowedError");

    assert_eq!(player.state(), TransportState::Paused);
}
