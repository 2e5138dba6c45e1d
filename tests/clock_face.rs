#![allow(missing_docs)]
use std::cell::RefCell;
use std::collections::VecDeque;

use embassy_futures::block_on;
use strip_clock::clock_config::{ClockColors, ClockConfig};
use strip_clock::clock_face::{ClockFace, FaceAction, FaceState, FrameSink, StripClock};
use strip_clock::clock_time::ClockTime;
use strip_clock::led_strip::Frame1d;
use strip_clock::rtc::Rtc;
use strip_clock::{Error, Result};
use time::PrimitiveDateTime;
use time::macros::datetime;

const LEN: usize = 165;

fn new_face() -> ClockFace<LEN> {
    ClockFace::new(&ClockConfig::DEFAULT).unwrap()
}

#[test]
fn first_sample_always_acts() {
    let mut in_range = new_face();
    let mut out_of_range = new_face();
    assert_eq!(in_range.state(), FaceState::NeverRendered);

    assert!(matches!(in_range.update(ClockTime::new(6, 0, 0)), FaceAction::Render(_)));
    assert_eq!(out_of_range.update(ClockTime::new(5, 0, 0)), FaceAction::Blank);
    assert_eq!(in_range.state(), FaceState::Active);
    assert_eq!(out_of_range.state(), FaceState::Blanked);
}

#[test]
fn unchanged_sample_is_ignored() {
    let mut face = new_face();
    face.update(ClockTime::new(7, 5, 30));
    let frame = *face.frame();

    assert_eq!(face.update(ClockTime::new(7, 5, 30)), FaceAction::Unchanged);
    assert_eq!(face.frame(), &frame);
    assert!(!FaceAction::Unchanged.needs_flush());
}

#[test]
fn blanking_happens_once_per_out_of_range_stretch() {
    let mut face = new_face();
    face.update(ClockTime::new(18, 59, 59));

    let actions: Vec<FaceAction> = [
        ClockTime::new(19, 0, 0),
        ClockTime::new(19, 0, 0),
        ClockTime::new(19, 0, 1),
        ClockTime::new(23, 59, 59),
    ]
    .into_iter()
    .map(|time| face.update(time))
    .collect();

    assert_eq!(
        actions,
        [
            FaceAction::Blank,
            FaceAction::Unchanged,
            FaceAction::AlreadyBlank,
            FaceAction::AlreadyBlank,
        ]
    );
    let flushes = actions.iter().filter(|action| action.needs_flush()).count();
    assert_eq!(flushes, 1);
    assert_eq!(face.frame(), &Frame1d::new());
    assert!(face.is_blanked());
}

#[test]
fn reentering_range_clears_latch() {
    let mut face = new_face();
    assert_eq!(face.update(ClockTime::new(5, 59, 58)), FaceAction::Blank);
    assert_eq!(face.update(ClockTime::new(5, 59, 59)), FaceAction::AlreadyBlank);

    assert!(matches!(face.update(ClockTime::new(6, 0, 0)), FaceAction::Render(_)));
    assert!(!face.is_blanked());
    assert_eq!(face.frame(), face.layout().static_colors());

    assert_eq!(face.update(ClockTime::new(19, 0, 0)), FaceAction::Blank);
}

#[test]
fn render_after_blank_redraws_every_zone() {
    let mut face = new_face();
    face.update(ClockTime::new(4, 0, 0));

    face.update(ClockTime::new(8, 30, 45));

    let frame = face.frame();
    assert_eq!(frame[0], ClockColors::DEFAULT.past);
    assert_eq!(frame[29], ClockColors::DEFAULT.past);
    assert_eq!(Some(frame[30]), face.layout().static_color(30));
    assert_eq!(frame[164], ClockColors::DEFAULT.future);
    assert_eq!(frame[163], ClockColors::DEFAULT.second_counter);
}

struct FakeRtc {
    samples: VecDeque<Result<PrimitiveDateTime>>,
}

impl FakeRtc {
    fn new(samples: impl IntoIterator<Item = Result<PrimitiveDateTime>>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl Rtc for FakeRtc {
    async fn begin(&mut self) -> Result<()> {
        Ok(())
    }

    async fn is_running(&mut self) -> Result<bool> {
        Ok(true)
    }

    async fn adjust(&mut self, _date_time: PrimitiveDateTime) -> Result<()> {
        Ok(())
    }

    async fn now(&mut self) -> Result<PrimitiveDateTime> {
        self.samples.pop_front().unwrap_or(Err(Error::RtcBus))
    }
}

#[derive(Default)]
struct RecordingSink {
    frames: RefCell<Vec<Frame1d<LEN>>>,
}

impl FrameSink<LEN> for RecordingSink {
    async fn write_frame(&self, frame: Frame1d<LEN>) -> Result<()> {
        self.frames.borrow_mut().push(frame);
        Ok(())
    }
}

#[test]
fn strip_clock_flushes_only_changes() {
    let rtc = FakeRtc::new([
        Ok(datetime!(2025-03-15 07:05:30)),
        Ok(datetime!(2025-03-15 07:05:30)),
        Ok(datetime!(2025-03-15 07:05:31)),
        Ok(datetime!(2025-03-15 19:00:00)),
        Ok(datetime!(2025-03-15 19:00:01)),
    ]);
    let sink = RecordingSink::default();
    let mut clock = StripClock::new(rtc, &sink, new_face());

    let actions: Vec<FaceAction> = (0..5)
        .map(|_| block_on(clock.poll_once()).unwrap())
        .collect();

    assert!(matches!(actions[0], FaceAction::Render(_)));
    assert_eq!(actions[1], FaceAction::Unchanged);
    assert!(matches!(actions[2], FaceAction::Render(_)));
    assert_eq!(actions[3], FaceAction::Blank);
    assert_eq!(actions[4], FaceAction::AlreadyBlank);

    let frames = sink.frames.borrow();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0][12], ClockColors::DEFAULT.past);
    assert_eq!(frames[2], Frame1d::new());
}

#[test]
fn failed_read_leaves_face_alone() {
    let rtc = FakeRtc::new([Ok(datetime!(2025-03-15 12:00:00)), Err(Error::RtcInvalidData)]);
    let sink = RecordingSink::default();
    let mut clock = StripClock::new(rtc, &sink, new_face());

    block_on(clock.poll_once()).unwrap();
    let shown = *clock.face().frame();
    let err = block_on(clock.poll_once()).unwrap_err();

    assert!(matches!(err, Error::RtcInvalidData));
    assert_eq!(clock.face().frame(), &shown);
    assert_eq!(clock.face().last_sample(), Some(ClockTime::new(12, 0, 0)));
    assert_eq!(sink.frames.borrow().len(), 1);
}

struct FlakySink {
    failures: RefCell<VecDeque<bool>>,
    frames: RefCell<Vec<Frame1d<LEN>>>,
}

impl FlakySink {
    fn new(failures: impl IntoIterator<Item = bool>) -> Self {
        Self {
            failures: RefCell::new(failures.into_iter().collect()),
            frames: RefCell::new(Vec::new()),
        }
    }
}

impl FrameSink<LEN> for FlakySink {
    async fn write_frame(&self, frame: Frame1d<LEN>) -> Result<()> {
        if self.failures.borrow_mut().pop_front().unwrap_or(false) {
            // any error will do
            return Err(Error::RtcBus);
        }
        self.frames.borrow_mut().push(frame);
        Ok(())
    }
}

#[test]
fn failed_blank_is_sent_again() {
    let rtc = FakeRtc::new([
        Ok(datetime!(2025-03-15 18:59:59)),
        Ok(datetime!(2025-03-15 19:00:00)),
        Ok(datetime!(2025-03-15 19:00:00)),
        Ok(datetime!(2025-03-15 19:00:01)),
    ]);
    let sink = FlakySink::new([false, true]);
    let mut clock = StripClock::new(rtc, &sink, new_face());

    block_on(clock.poll_once()).unwrap();
    let err = block_on(clock.poll_once()).unwrap_err();
    assert!(matches!(err, Error::RtcBus));
    assert!(!clock.face().is_blanked());
    assert_eq!(clock.face().last_sample(), None);

    assert_eq!(block_on(clock.poll_once()).unwrap(), FaceAction::Blank);
    assert_eq!(block_on(clock.poll_once()).unwrap(), FaceAction::AlreadyBlank);

    let frames = sink.frames.borrow();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[1], Frame1d::new());
}

#[test]
fn failed_render_is_drawn_again_for_same_second() {
    let rtc = FakeRtc::new([
        Ok(datetime!(2025-03-15 07:05:30)),
        Ok(datetime!(2025-03-15 07:05:30)),
    ]);
    let sink = FlakySink::new([true]);
    let mut clock = StripClock::new(rtc, &sink, new_face());

    assert!(block_on(clock.poll_once()).is_err());
    assert_eq!(clock.face().state(), FaceState::Active);

    assert!(matches!(block_on(clock.poll_once()).unwrap(), FaceAction::Render(_)));
    assert_eq!(sink.frames.borrow().len(), 1);
    assert_eq!(clock.face().last_sample(), Some(ClockTime::new(7, 5, 30)));
}

#[test]
fn forgetting_a_blank_releases_the_latch() {
    let mut face = new_face();
    assert_eq!(face.update(ClockTime::new(20, 0, 0)), FaceAction::Blank);

    face.forget_sample();

    assert_eq!(face.state(), FaceState::NeverRendered);
    assert_eq!(face.update(ClockTime::new(20, 0, 0)), FaceAction::Blank);
    assert_eq!(face.frame(), &Frame1d::new());
}
