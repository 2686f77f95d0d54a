use crate::camera::{CameraController, CameraPose, CameraTarget};
use crate::config::RigOptions;
use crate::sampler::{InputSampler, PointerSample, RawSample, Viewport};
use crate::smoothing::{SmoothedState, SmoothingFilter};

/// The whole pointer-to-camera pipeline for one activation.
///
/// Pointer events only write the raw sample; all filtering and camera motion
/// happens in [`Rig::frame`], once per tick.
#[derive(Clone, Debug)]
pub struct Rig {
    sampler: InputSampler,
    filter: SmoothingFilter,
    target: CameraTarget,
    camera: CameraController,
    frames: u64,
}

impl Rig {
    /// `options` must already be validated; [`crate::RigSession::new`] does
    /// that for every rig it builds.
    pub(crate) fn new(options: &RigOptions) -> Self {
        let target = CameraTarget::new(&options.target);
        Self {
            sampler: InputSampler::new(&options.smoothing),
            filter: SmoothingFilter::new(options.smoothing.smoothing_factor),
            camera: CameraController::new(options.camera, target.rest_pose()),
            target,
            frames: 0,
        }
    }

    pub fn on_pointer(&mut self, event: PointerSample, viewport: Viewport) -> RawSample {
        self.sampler.sample(event, viewport)
    }

    /// One tick: filter the latest raw sample, then ease the camera toward
    /// the target it implies.
    pub fn frame(&mut self) -> CameraPose {
        self.frames += 1;
        self.filter.step(self.sampler.current());
        let (position, look_at) = self.target.resolve(self.filter.state());
        self.camera.tick(position, look_at)
    }

    pub fn raw(&self) -> Option<RawSample> {
        self.sampler.raw()
    }

    pub fn smoothed(&self) -> SmoothedState {
        self.filter.state()
    }

    pub fn pose(&self) -> CameraPose {
        self.camera.pose()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn options() -> RigOptions {
        let mut o = RigOptions::default();
        o.smoothing.throttle_ms = 0.0;
        o
    }

    #[test]
    fn starts_at_rest_pose() {
        let rig = Rig::new(&options());
        assert_eq!(rig.pose().position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(rig.pose().look_at, Vec3::ZERO);
        assert_eq!(rig.raw(), None);
    }

    #[test]
    fn idle_frames_keep_rest_pose() {
        let mut rig = Rig::new(&options());
        for _ in 0..10 {
            rig.frame();
        }
        assert_eq!(rig.pose().position, Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(rig.smoothed(), SmoothedState::default());
    }

    #[test]
    fn pointer_events_alone_do_not_move_anything() {
        let mut rig = Rig::new(&options());
        let view = Viewport::new(100.0, 100.0);
        for i in 0..5 {
            rig.on_pointer(
                PointerSample {
                    client_x: 0.0,
                    client_y: 0.0,
                    time_ms: i as f64,
                },
                view,
            );
        }
        assert_eq!(rig.smoothed(), SmoothedState::default());
        assert_eq!(rig.frames(), 0);
    }

    #[test]
    fn camera_drifts_toward_pointer_corner() {
        let mut rig = Rig::new(&options());
        rig.on_pointer(
            PointerSample {
                client_x: 0.0,
                client_y: 0.0,
                time_ms: 0.0,
            },
            Viewport::new(100.0, 100.0),
        );
        for _ in 0..300 {
            rig.frame();
        }
        let p = rig.pose().position;
        assert!((p.x + 0.2).abs() < 2e-3, "x = {}", p.x);
        assert!((p.y - 0.2).abs() < 2e-3, "y = {}", p.y);
        assert_eq!(p.z, 5.0);
    }
}
