//! Developer-facing helpers for Umbra tests.

use std::cell::RefCell;

use glam::{Mat3, Mat4};
use umbra_render::textures::{TextureBinder, TextureKind, TextureUnit};

pub const EPSILON: f32 = 1e-5;

/// Installs `env_logger` for the test harness. Safe to call from every test.
pub fn init_test_logging() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Trace)
        .try_init();
}

#[must_use]
pub fn mat4_approx(a: Mat4, b: Mat4) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

#[must_use]
pub fn mat3_approx(a: Mat3, b: Mat3) -> bool {
    a.abs_diff_eq(b, EPSILON)
}

/// A texture identified only by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeTexture(pub &'static str);

/// One call received by a [`RecordingBinder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindCall {
    pub unit: u32,
    pub kind: TextureKind,
    pub texture: &'static str,
}

/// Binder that records every bind instead of touching a GPU.
#[derive(Debug, Default)]
pub struct RecordingBinder {
    calls: RefCell<Vec<BindCall>>,
}

impl RecordingBinder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn calls(&self) -> Vec<BindCall> {
        self.calls.borrow().clone()
    }

    /// Units bound so far, in call order.
    #[must_use]
    pub fn units(&self) -> Vec<u32> {
        self.calls.borrow().iter().map(|c| c.unit).collect()
    }

    fn record(&self, unit: TextureUnit, kind: TextureKind, texture: &FakeTexture) {
        self.calls.borrow_mut().push(BindCall {
            unit: unit.index(),
            kind,
            texture: texture.0,
        });
    }
}

impl TextureBinder for RecordingBinder {
    type Texture2D = FakeTexture;
    type TextureCube = FakeTexture;

    fn bind_texture_2d(&self, unit: TextureUnit, texture: &FakeTexture) {
        self.record(unit, TextureKind::Texture2D, texture);
    }

    fn bind_texture_cube(&self, unit: TextureUnit, texture: &FakeTexture) {
        self.record(unit, TextureKind::TextureCube, texture);
    }
}
