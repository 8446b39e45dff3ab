//! Sky behind the page, driven by scroll progress
//!
//! Purely cosmetic. Nothing here is read back by navigation.

use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyPhase {
    Night,
    Day,
    Sunset,
}

impl SkyPhase {
    pub fn from_progress(progress: f64) -> Self {
        if progress < 0.15 {
            SkyPhase::Night
        } else if progress < 0.4 {
            SkyPhase::Day
        } else if progress < 0.7 {
            SkyPhase::Sunset
        } else {
            SkyPhase::Night
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SkyPhase::Night => "night",
            SkyPhase::Day => "day",
            SkyPhase::Sunset => "sunset",
        }
    }
}

/// Light text on a dark sky at either end of the page
pub fn is_dark(progress: f64) -> bool {
    progress < 0.15 || progress > 0.7
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, Copy)]
struct Hsl {
    h: f64,
    s: f64,
    l: f64,
}

// night, dawn, day, sunset, night
const SKY_KEYFRAMES: [(f64, Hsl); 5] = [
    (0.0, Hsl { h: 259.0, s: 0.587, l: 0.124 }),
    (0.25, Hsl { h: 35.0, s: 0.674, l: 0.169 }),
    (0.5, Hsl { h: 200.0, s: 0.9, l: 0.8 }),
    (0.75, Hsl { h: 30.0, s: 1.0, l: 0.65 }),
    (1.0, Hsl { h: 260.0, s: 0.6, l: 0.3 }),
];

/// Sky color for a scroll progress in `[0, 1]`
pub fn sky_color(progress: f64) -> Rgb {
    let p = if progress.is_nan() { 0.0 } else { progress.clamp(0.0, 1.0) };
    let upper = SKY_KEYFRAMES
        .iter()
        .position(|(at, _)| *at >= p)
        .unwrap_or(SKY_KEYFRAMES.len() - 1)
        .max(1);
    let (a_at, a) = SKY_KEYFRAMES[upper - 1];
    let (b_at, b) = SKY_KEYFRAMES[upper];
    let t = ((p - a_at) / (b_at - a_at)).clamp(0.0, 1.0);

    hsl_to_rgb(Hsl {
        h: a.h + (b.h - a.h) * t,
        s: a.s + (b.s - a.s) * t,
        l: a.l + (b.l - a.l) * t,
    })
}

fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let c = (1.0 - (2.0 * hsl.l - 1.0).abs()) * hsl.s;
    let h = (hsl.h.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = hsl.l - c / 2.0;
    let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb {
        r: to_byte(r),
        g: to_byte(g),
        b: to_byte(b),
    }
}

/// Damped spring that eases the rendered progress toward the real one
#[derive(Debug, Clone)]
pub struct SpringProgress {
    value: f64,
    velocity: f64,
    target: f64,
    stiffness: f64,
    damping: f64,
    rest_delta: f64,
}

impl Default for SpringProgress {
    fn default() -> Self {
        Self::new(60.0, 30.0, 0.001)
    }
}

impl SpringProgress {
    const MAX_STEP: f64 = 1.0 / 120.0;

    pub fn new(stiffness: f64, damping: f64, rest_delta: f64) -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
            stiffness,
            damping,
            rest_delta,
        }
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_at_rest(&self) -> bool {
        (self.target - self.value).abs() < self.rest_delta && self.velocity.abs() < self.rest_delta
    }

    /// Integrate over `elapsed`, in small fixed steps
    pub fn tick(&mut self, elapsed: Duration) -> f64 {
        let mut remaining = elapsed.as_secs_f64();
        while remaining > 0.0 && !self.is_at_rest() {
            let dt = remaining.min(Self::MAX_STEP);
            let accel = self.stiffness * (self.target - self.value) - self.damping * self.velocity;
            self.velocity += accel * dt;
            self.value += self.velocity * dt;
            remaining -= dt;
        }
        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
        }
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(SkyPhase::from_progress(0.0), SkyPhase::Night);
        assert_eq!(SkyPhase::from_progress(0.15), SkyPhase::Day);
        assert_eq!(SkyPhase::from_progress(0.39), SkyPhase::Day);
        assert_eq!(SkyPhase::from_progress(0.4), SkyPhase::Sunset);
        assert_eq!(SkyPhase::from_progress(0.7), SkyPhase::Night);
        assert!(is_dark(0.1));
        assert!(!is_dark(0.5));
        assert!(!is_dark(0.7));
        assert!(is_dark(0.71));
    }

    #[test]
    fn test_sky_color_keyframes() {
        // hsl(200, 90%, 80%)
        assert_eq!(
            sky_color(0.5),
            Rgb {
                r: 158,
                g: 219,
                b: 250
            }
        );
        // Out of range clamps to the ends
        assert_eq!(sky_color(-1.0), sky_color(0.0));
        assert_eq!(sky_color(2.0), sky_color(1.0));
        let night = sky_color(0.0);
        assert!(night.b > night.r && night.b > night.g);
    }

    #[test]
    fn test_spring_settles_on_target() {
        let mut spring = SpringProgress::default();
        spring.set_target(1.0);
        let early = spring.tick(Duration::from_millis(50));
        assert!(early > 0.0 && early < 1.0);
        spring.tick(Duration::from_secs(10));
        assert!(spring.is_at_rest());
        assert_eq!(spring.value(), 1.0);
    }
}
