use bevy::{
    math::bounding::{Aabb3d, IntersectsVolume},
    prelude::*,
};

/// Axis-aligned body of water. Its surface is the top face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterVolume {
    min: Vec3,
    max: Vec3,
}

impl WaterVolume {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn surface_height(&self) -> f32 {
        self.max.y
    }

    pub fn min(&self) -> Vec3 {
        self.min
    }

    pub fn max(&self) -> Vec3 {
        self.max
    }

    pub fn bounds(&self) -> Aabb3d {
        Aabb3d::new((self.min + self.max) * 0.5, (self.max - self.min) * 0.5)
    }

    /// Touching faces count as overlap.
    pub fn overlaps(&self, body: &Aabb3d) -> bool {
        self.bounds().intersects(body)
    }
}

/// Every water volume in the level, registered once at load.
#[derive(Resource, Debug, Clone, Default)]
pub struct WaterRegions {
    volumes: Vec<WaterVolume>,
}

impl WaterRegions {
    pub fn register(&mut self, volume: WaterVolume) -> usize {
        self.volumes.push(volume);
        self.volumes.len() - 1
    }

    pub fn volumes(&self) -> &[WaterVolume] {
        &self.volumes
    }

    pub fn get(&self, index: usize) -> Option<&WaterVolume> {
        self.volumes.get(index)
    }

    /// Index of the first volume the body overlaps.
    pub fn overlapping(&self, body: &Aabb3d) -> Option<usize> {
        self.volumes.iter().position(|volume| volume.overlaps(body))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaterTransition {
    None,
    Entered(WaterVolume),
    Exited,
}

/// Which volume an actor is in, turned into enter/exit edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaterMembership {
    current: Option<usize>,
}

impl WaterMembership {
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Overlap test of the whole body against every registered volume. The
    /// actor stays in water until no part of the body touches any volume.
    ///
    /// Crossing straight from one volume into another reports `Entered` for
    /// the new one without an `Exited` in between.
    pub fn update(&mut self, regions: &WaterRegions, body: &Aabb3d) -> WaterTransition {
        let next = match self.current {
            // Keep the current volume while still touching it
            Some(index) if regions.get(index).is_some_and(|v| v.overlaps(body)) => Some(index),
            _ => regions.overlapping(body),
        };
        if next == self.current {
            return WaterTransition::None;
        }
        self.current = next;
        match next.and_then(|index| regions.get(index)) {
            Some(volume) => WaterTransition::Entered(*volume),
            None => WaterTransition::Exited,
        }
    }
}
