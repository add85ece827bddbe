//! Pointer repulsion: pushes dots away from the cursor.

use crate::settings::Settings;
use glam::DVec2;

/// Push direction used when a dot sits exactly on the cursor.
const COINCIDENT_DIRECTION: DVec2 = DVec2::X;

/// Radial push away from a cursor, fading linearly to zero at `radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repel {
    pub radius: f64,
    pub strength: f64,
    pub max_displacement: f64,
}

impl Repel {
    /// `None` when repulsion is disabled.
    pub fn from_settings(settings: &Settings) -> Option<Self> {
        settings.repel_enabled.then_some(Self {
            radius: settings.repel_radius,
            strength: settings.repel_strength,
            max_displacement: settings.max_displacement,
        })
    }

    /// Displacement for a dot at `point`.
    ///
    /// Zero without a cursor or at `distance >= radius`; otherwise
    /// `(1 - distance/radius) * strength` along the cursor-to-point
    /// direction, with magnitude capped at `max_displacement`.
    pub fn offset(&self, point: DVec2, cursor: Option<DVec2>) -> DVec2 {
        let Some(cursor) = cursor else {
            return DVec2::ZERO;
        };
        let delta = point - cursor;
        let distance = delta.length();
        if !(distance < self.radius) {
            return DVec2::ZERO;
        }
        let direction = if distance > 0.0 {
            delta / distance
        } else {
            COINCIDENT_DIRECTION
        };
        let magnitude = (1.0 - distance / self.radius) * self.strength;
        let capped = magnitude.clamp(-self.max_displacement, self.max_displacement);
        direction * capped
    }

    /// `point` moved by [`Repel::offset`].
    pub fn apply(&self, point: DVec2, cursor: Option<DVec2>) -> DVec2 {
        point + self.offset(point, cursor)
    }
}
