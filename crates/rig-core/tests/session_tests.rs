// Host-side tests for the activation lifecycle, driven by the manual scheduler.

use glam::Vec3;
use rig_core::*;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<&'static str>>>;

struct RecordingListener {
    log: Log,
}

impl InputListener for RecordingListener {
    fn detach(&mut self) {
        self.log.borrow_mut().push("detach");
    }
}

/// Wraps the manual scheduler to record when handles are cancelled.
struct RecordingScheduler {
    inner: ManualScheduler,
    log: Log,
}

impl FrameScheduler for RecordingScheduler {
    fn start(&self, callback: FrameCallback) -> FrameHandle {
        self.inner.start(callback)
    }

    fn cancel(&self, handle: FrameHandle) {
        self.log.borrow_mut().push("cancel");
        self.inner.cancel(handle);
    }
}

fn options() -> RigOptions {
    let mut o = RigOptions::default();
    o.smoothing.throttle_ms = 16.0;
    o
}

fn event(x: f32, y: f32, time_ms: f64) -> PointerSample {
    PointerSample {
        client_x: x,
        client_y: y,
        time_ms,
    }
}

const VIEW: Viewport = Viewport {
    width: 200.0,
    height: 100.0,
};

fn activate_with_feed(
    session: &mut RigSession<ManualScheduler>,
) -> (Rc<RefCell<Option<PointerFeed>>>, Rc<RefCell<Vec<CameraPose>>>) {
    let feed = Rc::new(RefCell::new(None));
    let poses = Rc::new(RefCell::new(Vec::new()));
    let f = feed.clone();
    let p = poses.clone();
    session.activate(
        move |pf| {
            *f.borrow_mut() = Some(pf);
            RecordingListener {
                log: Rc::new(RefCell::new(Vec::new())),
            }
        },
        move |pose| p.borrow_mut().push(*pose),
    );
    (feed, poses)
}

#[test]
fn one_pose_per_frame_regardless_of_event_count() {
    let sched = Rc::new(ManualScheduler::new());
    let mut session = RigSession::new(sched.clone(), options()).unwrap();
    let (feed, poses) = activate_with_feed(&mut session);
    let feed = feed.borrow().clone().unwrap();

    for i in 0..50 {
        feed.push(event(i as f32, 0.0, i as f64 * 20.0), VIEW);
    }
    assert!(poses.borrow().is_empty());

    sched.run_frames(3, 16.0);
    assert_eq!(poses.borrow().len(), 3);
    assert_eq!(session.rig().unwrap().frames(), 3);
}

#[test]
fn last_accepted_sample_wins_within_a_frame() {
    let sched = Rc::new(ManualScheduler::new());
    let mut opts = options();
    opts.smoothing.smoothing_factor = 1.0;
    opts.camera = CameraLerpConfig::from_position_factor(1.0);
    let mut session = RigSession::new(sched.clone(), opts).unwrap();
    let (feed, poses) = activate_with_feed(&mut session);
    let feed = feed.borrow().clone().unwrap();

    feed.push(event(0.0, 0.0, 0.0), VIEW);
    feed.push(event(200.0, 100.0, 5.0), VIEW); // throttled
    feed.push(event(100.0, 50.0, 40.0), VIEW);
    sched.tick(16.0);

    let pose = poses.borrow()[0];
    assert_eq!(pose.position, Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn filter_keeps_ticking_after_convergence() {
    let sched = Rc::new(ManualScheduler::new());
    let mut session = RigSession::new(sched.clone(), options()).unwrap();
    let (feed, poses) = activate_with_feed(&mut session);
    let feed = feed.borrow().clone().unwrap();

    sched.run_frames(20, 16.0);
    let rest = session.pose().unwrap();
    assert_eq!(rest.position, Vec3::new(0.0, 0.0, 5.0));

    // Converged and idle, but a new sample is still picked up.
    feed.push(event(200.0, 0.0, 1000.0), VIEW);
    sched.run_frames(5, 16.0);
    let moved = session.pose().unwrap();
    assert!(moved.position.x > 0.0);
    assert!(moved.position.y > 0.0);
    assert_eq!(poses.borrow().len(), 25);
}

#[test]
fn deactivate_runs_detach_then_cancel_then_discards_state() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let sched = Rc::new(RecordingScheduler {
        inner: ManualScheduler::new(),
        log: log.clone(),
    });
    let mut session = RigSession::new(sched.clone(), options()).unwrap();

    let feed_slot = Rc::new(RefCell::new(None));
    let f = feed_slot.clone();
    let l = log.clone();
    session.activate(
        move |pf| {
            *f.borrow_mut() = Some(pf);
            RecordingListener { log: l }
        },
        |_| {},
    );
    let feed: PointerFeed = feed_slot.borrow().clone().unwrap();
    assert!(feed.is_live());

    session.deactivate();
    assert_eq!(*log.borrow(), vec!["detach", "cancel"]);
    assert!(!session.is_active());
    assert!(session.pose().is_none());
    assert!(!feed.is_live());
    assert_eq!(feed.push(event(1.0, 1.0, 0.0), VIEW), None);
}

#[test]
fn no_pose_is_published_after_deactivate() {
    let sched = Rc::new(ManualScheduler::new());
    let mut session = RigSession::new(sched.clone(), options()).unwrap();
    let (_feed, poses) = activate_with_feed(&mut session);

    sched.run_frames(2, 16.0);
    session.deactivate();
    session.deactivate();
    sched.run_frames(5, 16.0);
    assert_eq!(poses.borrow().len(), 2);
    assert_eq!(sched.active(), 0);
}

#[test]
fn dropping_the_session_tears_down() {
    let sched = Rc::new(ManualScheduler::new());
    let poses = {
        let mut session = RigSession::new(sched.clone(), options()).unwrap();
        let (_feed, poses) = activate_with_feed(&mut session);
        sched.tick(16.0);
        poses
    };
    sched.run_frames(3, 16.0);
    assert_eq!(poses.borrow().len(), 1);
    assert_eq!(sched.active(), 0);
}

#[test]
fn reactivation_starts_from_fresh_state() {
    let sched = Rc::new(ManualScheduler::new());
    let mut session = RigSession::new(sched.clone(), options()).unwrap();
    let (feed, _poses) = activate_with_feed(&mut session);
    let first_feed = feed.borrow().clone().unwrap();
    first_feed.push(event(0.0, 0.0, 0.0), VIEW);
    sched.run_frames(30, 16.0);
    assert_ne!(session.pose().unwrap().position, Vec3::new(0.0, 0.0, 5.0));

    let (_feed, _poses) = activate_with_feed(&mut session);
    assert!(!first_feed.is_live());
    assert_eq!(sched.active(), 1);
    let rig = session.rig().unwrap();
    assert_eq!(rig.raw(), None);
    assert_eq!(rig.pose().position, Vec3::new(0.0, 0.0, 5.0));
}

#[test]
fn session_rejects_options_that_would_stall_or_diverge() {
    let sched = Rc::new(ManualScheduler::new());

    let mut frozen = options();
    frozen.camera.position_factor = 0.0;
    assert!(matches!(
        RigSession::new(sched.clone(), frozen),
        Err(ConfigError::InvalidFactor {
            name: "positionFactor",
            ..
        })
    ));

    let mut runaway = options();
    runaway.smoothing.smoothing_factor = -0.5;
    assert!(matches!(
        RigSession::new(sched.clone(), runaway),
        Err(ConfigError::InvalidFactor {
            name: "smoothingFactor",
            ..
        })
    ));

    assert_eq!(sched.active(), 0);
}
