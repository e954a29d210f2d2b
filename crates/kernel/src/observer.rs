use glam::{Vec2, Vec3};
use liminal_input::Intent;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use crate::config::PlayerConfig;

pub const MAX_VITAL: f32 = 100.0;

/// The player's body: where it is, where it looks, and its vitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    pub position: Vec3,
    /// Radians about +Y. Zero faces -Z.
    pub yaw: f32,
    /// Radians, clamped to straight up/down.
    pub pitch: f32,
    pub vertical_velocity: f32,
    pub grounded: bool,
    pub health: f32,
    pub energy: f32,
}

impl Observer {
    pub fn spawn(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
            vertical_velocity: 0.0,
            grounded: true,
            health: MAX_VITAL,
            energy: MAX_VITAL,
        }
    }

    /// Move back to `position` at rest. Facing and vitals carry over.
    pub fn respawn(&mut self, position: Vec3) {
        self.position = position;
        self.vertical_velocity = 0.0;
        self.grounded = true;
    }

    pub fn look(&mut self, delta: Vec2) {
        self.yaw -= delta.x;
        self.pitch = (self.pitch - delta.y).clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Horizontal displacement requested this tick, rotated into world space.
    ///
    /// Also spends or regenerates energy, since sprint cost depends on the
    /// same intent.
    pub fn planar_step(&mut self, intent: &Intent, cfg: &PlayerConfig, dt: f32) -> Vec3 {
        let moving = intent.is_moving();
        if intent.sprint && moving {
            self.energy = (self.energy - cfg.sprint_drain_per_sec * dt).max(0.0);
        } else {
            self.energy = (self.energy + cfg.energy_regen_per_sec * dt).min(MAX_VITAL);
        }
        if !moving {
            return Vec3::ZERO;
        }

        let speed = if intent.sprint && self.energy > cfg.sprint_min_energy {
            cfg.sprint_speed
        } else {
            cfg.walk_speed
        };
        let local = intent.direction() * speed * dt;
        let (sin, cos) = self.yaw.sin_cos();
        Vec3::new(
            local.x * cos + local.z * sin,
            0.0,
            -local.x * sin + local.z * cos,
        )
    }

    /// Jump, gravity and the ground plane. The floor is the only vertical
    /// collider.
    pub fn vertical_step(&mut self, jump: bool, cfg: &PlayerConfig, dt: f32) {
        if jump && self.grounded {
            self.vertical_velocity = cfg.jump_power;
            self.grounded = false;
        }
        self.vertical_velocity -= cfg.gravity * dt;
        self.position.y += self.vertical_velocity * dt;
        if self.position.y <= cfg.ground_height {
            self.position.y = cfg.ground_height;
            self.vertical_velocity = 0.0;
            self.grounded = true;
        }
    }

    pub fn restore_energy(&mut self, amount: f32) {
        self.energy = (self.energy + amount).min(MAX_VITAL);
    }

    pub fn restore_health(&mut self, amount: f32) {
        self.health = (self.health + amount).min(MAX_VITAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use liminal_input::Action;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn forward_walk_at_zero_yaw_goes_negative_z() {
        let mut obs = Observer::spawn(Vec3::new(25.0, 1.0, 25.0));
        let intent = Intent::from_actions(&[Action::MoveForward]);
        let step = obs.planar_step(&intent, &PlayerConfig::default(), 0.1);
        assert!(approx(step, Vec3::new(0.0, 0.0, -0.5)));
    }

    #[test]
    fn yaw_rotates_movement() {
        let mut obs = Observer::spawn(Vec3::ZERO);
        obs.yaw = FRAC_PI_2;
        let intent = Intent::from_actions(&[Action::MoveForward]);
        let step = obs.planar_step(&intent, &PlayerConfig::default(), 1.0);
        assert!(approx(step, Vec3::new(-5.0, 0.0, 0.0)));
    }

    #[test]
    fn sprint_is_faster_and_drains_energy() {
        let cfg = PlayerConfig::default();
        let mut obs = Observer::spawn(Vec3::ZERO);
        let intent = Intent::from_actions(&[Action::MoveRight, Action::Sprint]);
        let step = obs.planar_step(&intent, &cfg, 1.0);
        assert!(approx(step, Vec3::new(8.0, 0.0, 0.0)));
        assert_eq!(obs.energy, 85.0);
    }

    #[test]
    fn exhausted_sprint_falls_back_to_walking() {
        let cfg = PlayerConfig::default();
        let mut obs = Observer::spawn(Vec3::ZERO);
        obs.energy = 20.0;
        let intent = Intent::from_actions(&[Action::MoveRight, Action::Sprint]);
        // 20 - 15 leaves 5, below the sprint floor.
        let step = obs.planar_step(&intent, &cfg, 1.0);
        assert!(approx(step, Vec3::new(5.0, 0.0, 0.0)));
        obs.planar_step(&intent, &cfg, 1.0);
        assert_eq!(obs.energy, 0.0);
    }

    #[test]
    fn idle_regenerates_energy_up_to_max() {
        let cfg = PlayerConfig::default();
        let mut obs = Observer::spawn(Vec3::ZERO);
        obs.energy = 98.0;
        let step = obs.planar_step(&Intent::idle(), &cfg, 1.0);
        assert_eq!(step, Vec3::ZERO);
        assert_eq!(obs.energy, MAX_VITAL);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut obs = Observer::spawn(Vec3::ZERO);
        obs.look(Vec2::new(0.0, -10.0));
        assert_eq!(obs.pitch, FRAC_PI_2);
        obs.look(Vec2::new(0.0, 20.0));
        assert_eq!(obs.pitch, -FRAC_PI_2);
    }

    #[test]
    fn jump_rises_then_lands() {
        let cfg = PlayerConfig::default();
        let mut obs = Observer::spawn(Vec3::new(0.0, cfg.ground_height, 0.0));
        obs.vertical_step(true, &cfg, 0.05);
        assert!(!obs.grounded);
        assert!(obs.position.y > cfg.ground_height);

        // Jumping mid-air does nothing.
        let vy = obs.vertical_velocity;
        obs.vertical_step(true, &cfg, 0.0);
        assert_eq!(obs.vertical_velocity, vy);

        for _ in 0..100 {
            obs.vertical_step(false, &cfg, 0.05);
        }
        assert!(obs.grounded);
        assert_eq!(obs.position.y, cfg.ground_height);
        assert_eq!(obs.vertical_velocity, 0.0);
    }

    #[test]
    fn vitals_cap_at_max() {
        let mut obs = Observer::spawn(Vec3::ZERO);
        obs.health = 90.0;
        obs.restore_health(30.0);
        assert_eq!(obs.health, MAX_VITAL);
    }
}
