//! Integration tests for the levelcast engine.
//!
//! Exercises complete runs: session lifecycle, edition changes between
//! ticks, poll rate changes, and smoothing over many cycles.

use levelcast_core::{
    ChannelRef, ChannelTopology, Edition, EngineConfig, LevelEngine, LevelKind, LevelSource,
    ParameterSink, PollRate, SelectionMode, Session, Slot, TickOutcome,
};

/// Level source keyed by hardware channel, with a read log.
#[derive(Default)]
struct Mixer {
    levels: Vec<(usize, f32)>,
    reads: Vec<(LevelKind, usize)>,
    opened: bool,
    closed: bool,
}

impl Mixer {
    fn set(&mut self, channel: usize, level: f32) {
        self.levels.retain(|&(c, _)| c != channel);
        self.levels.push((channel, level));
    }
}

impl LevelSource for Mixer {
    type Error = String;

    fn open(&mut self) -> Result<(), Self::Error> {
        self.opened = true;
        Ok(())
    }

    fn close(&mut self) -> Result<(), Self::Error> {
        self.closed = true;
        Ok(())
    }

    fn read_level(&mut self, kind: LevelKind, channel: usize) -> Result<f32, Self::Error> {
        self.reads.push((kind, channel));
        Ok(self
            .levels
            .iter()
            .find(|&&(c, _)| c == channel)
            .map_or(0.0, |&(_, level)| level))
    }
}

#[derive(Default)]
struct Board {
    values: [Option<f32>; Slot::COUNT],
    publications: usize,
}

impl ParameterSink for Board {
    fn publish(&mut self, slot: Slot, value: f32) {
        self.values[slot.index()] = Some(value);
        self.publications += 1;
    }
}

fn broadcast() -> EngineConfig {
    EngineConfig {
        mode: SelectionMode::Broadcast,
        selected: None,
        smoothing: false,
        ..EngineConfig::default()
    }
}

#[test]
fn test_session_run_and_close() {
    let mut mixer = Mixer::default();
    mixer.set(0, 0.6);
    {
        let mut session = Session::open(&mut mixer).unwrap();
        let mut engine = LevelEngine::new();
        let mut board = Board::default();
        let topology = ChannelTopology::for_edition(Edition::Standard);
        engine.tick(&topology, &broadcast(), session.source(), &mut board);
        assert_eq!(board.values[0], Some(0.6));
        session.close();
    }
    assert!(mixer.opened);
    assert!(mixer.closed);
}

#[test]
fn test_open_failure_is_reported() {
    #[derive(Debug)]
    struct Offline;
    impl LevelSource for Offline {
        type Error = String;
        fn open(&mut self) -> Result<(), Self::Error> {
            Err("login failed: mixer not installed".to_owned())
        }
        fn close(&mut self) -> Result<(), Self::Error> {
            panic!("close must not run after a failed open");
        }
        fn read_level(&mut self, _: LevelKind, _: usize) -> Result<f32, Self::Error> {
            Ok(0.0)
        }
    }

    let err = Session::open(Offline).unwrap_err();
    assert!(err.contains("login failed"));
}

#[test]
fn test_edition_change_keeps_slot_identity() {
    // A1 lives at hardware index 0 in every edition, but B1 moves
    let mut mixer = Mixer::default();
    mixer.set(0, 0.2);
    mixer.set(8, 0.7);
    mixer.set(24, 0.9);

    let mut engine = LevelEngine::new();
    let config = broadcast();
    let b1 = ChannelRef::InputBus(0).slot().unwrap().index();
    let a1 = ChannelRef::OutputBus(0).slot().unwrap().index();

    let mut board = Board::default();
    engine.tick(&ChannelTopology::for_edition(Edition::Standard), &config, &mut mixer, &mut board);
    assert_eq!(board.values[a1], Some(0.2));
    assert_eq!(board.values[b1], Some(0.7));

    let mut board = Board::default();
    engine.tick(&ChannelTopology::for_edition(Edition::Banana), &config, &mut mixer, &mut board);
    assert_eq!(board.values[a1], Some(0.2));
    assert_eq!(board.values[b1], Some(0.9));
}

#[test]
fn test_virtual_strip_index_follows_physical_count() {
    let mut mixer = Mixer::default();
    let config = EngineConfig {
        selected: Some(ChannelRef::VirtualStrip(0)),
        ..EngineConfig::default()
    };
    let mut engine = LevelEngine::new();

    let potato = ChannelTopology::for_edition(Edition::Potato);
    engine.tick(&potato, &config, &mut mixer, &mut Board::default());
    assert_eq!(mixer.reads, [(LevelKind::PostMute, 10), (LevelKind::PostMute, 11)]);

    mixer.reads.clear();
    let standard = ChannelTopology::for_edition(Edition::Standard);
    engine.tick(&standard, &config, &mut mixer, &mut Board::default());
    assert_eq!(mixer.reads, [(LevelKind::PostMute, 4), (LevelKind::PostMute, 5)]);
}

#[test]
fn test_poll_rate_change_between_ticks() {
    let topology = ChannelTopology::default();
    let mut mixer = Mixer::default();
    let mut engine = LevelEngine::new();
    let mut config = EngineConfig {
        poll_rate: PollRate::Hz1,
        ..EngineConfig::default()
    };

    let mut board = Board::default();
    for _ in 0..5 {
        assert_eq!(engine.tick(&topology, &config, &mut mixer, &mut board), TickOutcome::Idle);
    }

    config.poll_rate = PollRate::Hz10;
    assert!(engine.tick(&topology, &config, &mut mixer, &mut board).is_sampled());
    assert_eq!(engine.tick(&topology, &config, &mut mixer, &mut board), TickOutcome::Idle);
    assert!(engine.tick(&topology, &config, &mut mixer, &mut board).is_sampled());
}

#[test]
fn test_release_decays_to_silence() {
    let topology = ChannelTopology::default();
    let mut mixer = Mixer::default();
    mixer.set(0, 1.0);
    let config = EngineConfig {
        selected: Some(ChannelRef::PhysicalStrip(0)),
        ..EngineConfig::default()
    };
    let mut engine = LevelEngine::new();
    let mut board = Board::default();

    for _ in 0..30 {
        engine.tick(&topology, &config, &mut mixer, &mut board);
    }
    let peak = board.values[0].unwrap();
    assert!(peak > 0.99);

    mixer.set(0, 0.0);
    let mut previous = peak;
    for _ in 0..100 {
        engine.tick(&topology, &config, &mut mixer, &mut board);
        let value = board.values[0].unwrap();
        assert!(value <= previous);
        previous = value;
    }
    assert_eq!(previous, 0.0);
    assert_eq!(board.values[Slot::SELECTED.index()], Some(0.0));
}

#[test]
fn test_selected_mirrored_in_broadcast() {
    let topology = ChannelTopology::for_edition(Edition::Potato);
    let mut mixer = Mixer::default();
    mixer.set(40, 0.35);
    let config = EngineConfig {
        selected: Some(ChannelRef::InputBus(0)),
        ..broadcast()
    };
    let mut board = Board::default();
    let outcome = LevelEngine::new().tick(&topology, &config, &mut mixer, &mut board);

    assert_eq!(outcome, TickOutcome::Sampled { published: Slot::CHANNEL_COUNT + 1 });
    assert_eq!(board.values[Slot::SELECTED.index()], Some(0.35));
    assert_eq!(board.values[13], Some(0.35));
}

#[test]
fn test_unknown_edition_is_silent() {
    let topology = ChannelTopology::from_raw(42);
    let mut board = Board::default();
    let outcome =
        LevelEngine::new().tick(&topology, &broadcast(), &mut Mixer::default(), &mut board);
    assert_eq!(outcome, TickOutcome::Sampled { published: 0 });
    assert_eq!(board.publications, 0);
}
