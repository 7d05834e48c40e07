//! Celebration confetti: a short burst of colored flakes falling from the
//! top of the canvas, driven by the per-frame loop in the parent module.

use web_sys::CanvasRenderingContext2d;

/// How long new flakes keep spawning after the burst starts.
pub const BURST_DURATION_MS: f64 = 1000.0;

const SPAWN_PER_FRAME: usize = 5;
const FLAKE_SIZE: f64 = 8.0;
const GRAVITY_PER_FRAME: f64 = 0.15;

const COLORS: [&str; 3] = ["#00FF00", "#FFD700", "#FF6347"];

/// Simple linear-congruential generator for prototype randomness (not crypto
/// secure). State persists across draws so flakes spawned in one frame differ.
#[derive(Debug)]
pub struct Lcg(u32);

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self(seed)
    }

    /// Uniform-ish value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(1664525).wrapping_add(1013904223);
        f64::from(self.0) / (f64::from(u32::MAX) + 1.0)
    }
}

#[derive(Debug)]
struct Flake {
    x: f64,
    y: f64,
    vel_x: f64,
    vel_y: f64,
    color: &'static str,
}

#[derive(Debug)]
pub struct ConfettiBurst {
    flakes: Vec<Flake>,
    spawn_until_ms: f64,
}

impl ConfettiBurst {
    pub fn new(now: f64) -> Self {
        Self {
            flakes: Vec::new(),
            spawn_until_ms: now + BURST_DURATION_MS,
        }
    }

    /// Advance one frame: spawn while the burst window is open, apply
    /// gravity, prune flakes that fell off the canvas. Returns whether the
    /// burst is still alive.
    pub fn update(&mut self, now: f64, width: f64, height: f64, rng: &mut Lcg) -> bool {
        if now < self.spawn_until_ms {
            for _ in 0..SPAWN_PER_FRAME {
                let color_idx = (rng.next_f64() * COLORS.len() as f64) as usize % COLORS.len();
                self.flakes.push(Flake {
                    x: rng.next_f64() * width,
                    y: -FLAKE_SIZE,
                    vel_x: (rng.next_f64() - 0.5) * 2.0,
                    vel_y: 1.0 + rng.next_f64() * 3.0,
                    color: COLORS[color_idx],
                });
            }
        }
        for flake in &mut self.flakes {
            flake.x += flake.vel_x;
            flake.y += flake.vel_y;
            flake.vel_y += GRAVITY_PER_FRAME;
        }
        self.flakes.retain(|f| f.y < height + FLAKE_SIZE);
        now < self.spawn_until_ms || !self.flakes.is_empty()
    }

    pub fn draw(&self, ctx: &CanvasRenderingContext2d) {
        for flake in &self.flakes {
            ctx.set_fill_style_str(flake.color);
            ctx.fill_rect(flake.x, flake.y, FLAKE_SIZE, FLAKE_SIZE);
        }
    }
}
