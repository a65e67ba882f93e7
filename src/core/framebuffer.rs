use crate::core::color::pack_rgb;
use nalgebra::Vector3;
use rayon::prelude::*;
use std::cell::UnsafeCell;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

const LOCK_STRIPES: usize = 1024;

/// Color + depth storage for one frame, optionally supersampled.
///
/// Depth is kept as atomic `f32` bits so rows can be shaded in parallel;
/// color writes are serialized through a pool of striped locks.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,
    pub sample_count: usize,
    pub buffer_width: usize,
    pub buffer_height: usize,

    color: Vec<UnsafeCell<Vector3<f32>>>,
    depth: Vec<AtomicU32>,
    locks: Vec<Mutex<()>>,
}

// Color access goes through `locks`, depth through atomics.
unsafe impl Sync for FrameBuffer {}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, sample_count: usize) -> Self {
        let sample_count = sample_count.max(1);
        let buffer_width = width * sample_count;
        let buffer_height = height * sample_count;
        let size = buffer_width * buffer_height;

        Self {
            width,
            height,
            sample_count,
            buffer_width,
            buffer_height,
            color: (0..size).map(|_| UnsafeCell::new(Vector3::zeros())).collect(),
            depth: (0..size)
                .map(|_| AtomicU32::new(f32::INFINITY.to_bits()))
                .collect(),
            locks: (0..LOCK_STRIPES).map(|_| Mutex::new(())).collect(),
        }
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.buffer_width && y < self.buffer_height).then(|| y * self.buffer_width + x)
    }

    /// Resets every sample to `color` and infinite depth.
    pub fn clear(&mut self, color: Vector3<f32>) {
        for c in &mut self.color {
            *c.get_mut() = color;
        }
        let far = f32::INFINITY.to_bits();
        for d in &mut self.depth {
            *d.get_mut() = far;
        }
    }

    /// Less-than depth test. On success the new depth is stored and the
    /// caller owns the right to write the sample's color.
    #[inline]
    pub fn depth_test_and_update(&self, x: usize, y: usize, depth: f32) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };

        let slot = &self.depth[idx];
        let mut current = slot.load(Ordering::Relaxed);
        loop {
            if depth >= f32::from_bits(current) {
                return false;
            }
            match slot.compare_exchange_weak(
                current,
                depth.to_bits(),
                Ordering::Acquire,
                Ordering::Relaxed,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    #[inline]
    pub fn write_color(&self, x: usize, y: usize, color: Vector3<f32>) {
        if let Some(idx) = self.index(x, y) {
            let _guard = self.locks[idx % self.locks.len()]
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            // SAFETY: the stripe lock for `idx` is held.
            unsafe {
                *self.color[idx].get() = color;
            }
        }
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x, y)
            .map(|idx| f32::from_bits(self.depth[idx].load(Ordering::Relaxed)))
    }

    /// Output pixel color, averaged over its supersamples.
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Vector3<f32>> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let n = self.sample_count;
        let sum: Vector3<f32> = (0..n * n)
            .map(|s| {
                let idx = (y * n + s / n) * self.buffer_width + x * n + s % n;
                // SAFETY: only called once drawing has finished.
                unsafe { *self.color[idx].get() }
            })
            .sum();
        Some(sum / (n * n) as f32)
    }

    /// Resolves the frame into a `0RGB` buffer of `width * height` pixels.
    pub fn resolve_into(&self, pixels: &mut [u32]) {
        pixels
            .par_chunks_mut(self.width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = self.get_pixel(x, y).map_or(0, pack_rgb);
                }
            });
    }
}
