//! Vectors, directions and cuboid regions in editor coordinates.

use std::ops::{Add, Sub};

/// Double-precision point.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The block containing this point.
    pub fn to_block_point(&self) -> BlockVector3 {
        BlockVector3::new(
            self.x.floor() as i32,
            self.y.floor() as i32,
            self.z.floor() as i32,
        )
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

impl Add for Vector3 {
    type Output = Vector3;

    fn add(self, rhs: Self) -> Self::Output {
        Vector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vector3 {
    type Output = Vector3;

    fn sub(self, rhs: Self) -> Self::Output {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BlockVector3 {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockVector3 {
    pub const ZERO: BlockVector3 = BlockVector3::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn min(&self, other: &BlockVector3) -> BlockVector3 {
        BlockVector3::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    pub fn max(&self, other: &BlockVector3) -> BlockVector3 {
        BlockVector3::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Corner of the block with the lowest coordinates.
    pub fn to_vector3(&self) -> Vector3 {
        Vector3::new(self.x as f64, self.y as f64, self.z as f64)
    }

    /// Centre of the block.
    pub fn to_center(&self) -> Vector3 {
        Vector3::new(self.x as f64 + 0.5, self.y as f64 + 0.5, self.z as f64 + 0.5)
    }
}

impl Add for BlockVector3 {
    type Output = BlockVector3;

    fn add(self, rhs: Self) -> Self::Output {
        BlockVector3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

/// Compass and vertical directions. North is -z, east is +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
    Up,
    Down,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub const fn to_vector(self) -> BlockVector3 {
        match self {
            Direction::North => BlockVector3::new(0, 0, -1),
            Direction::East => BlockVector3::new(1, 0, 0),
            Direction::South => BlockVector3::new(0, 0, 1),
            Direction::West => BlockVector3::new(-1, 0, 0),
            Direction::Up => BlockVector3::new(0, 1, 0),
            Direction::Down => BlockVector3::new(0, -1, 0),
            Direction::NorthEast => BlockVector3::new(1, 0, -1),
            Direction::NorthWest => BlockVector3::new(-1, 0, -1),
            Direction::SouthEast => BlockVector3::new(1, 0, 1),
            Direction::SouthWest => BlockVector3::new(-1, 0, 1),
        }
    }

    pub const fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::North | Direction::East | Direction::South | Direction::West
        )
    }

    pub const fn is_upright(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

/// Axis-aligned box of blocks, both corners inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CuboidRegion {
    min: BlockVector3,
    max: BlockVector3,
}

impl CuboidRegion {
    /// Any two opposite corners, in any order.
    pub fn new(a: BlockVector3, b: BlockVector3) -> Self {
        Self {
            min: BlockVector3::min(&a, &b),
            max: BlockVector3::max(&a, &b),
        }
    }

    pub fn min(&self) -> BlockVector3 {
        self.min
    }

    pub fn max(&self) -> BlockVector3 {
        self.max
    }

    pub fn contains(&self, p: BlockVector3) -> bool {
        (self.min.x..=self.max.x).contains(&p.x)
            && (self.min.y..=self.max.y).contains(&p.y)
            && (self.min.z..=self.max.z).contains(&p.z)
    }

    /// Whether a point lies inside the union of the region's blocks.
    pub fn contains_point(&self, p: Vector3) -> bool {
        self.contains(p.to_block_point())
    }

    /// Number of blocks in the region, saturating at `u64::MAX` for regions
    /// spanning most of the coordinate range.
    pub fn volume(&self) -> u64 {
        let span = |lo: i32, hi: i32| (hi as i64 - lo as i64 + 1) as u64;
        span(self.min.x, self.max.x)
            .saturating_mul(span(self.min.y, self.max.y))
            .saturating_mul(span(self.min.z, self.max.z))
    }

    /// Every block position, x fastest, then z, then y.
    pub fn iter(&self) -> impl Iterator<Item = BlockVector3> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| {
            (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| BlockVector3::new(x, y, z)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_normalizes_corners() {
        let region = CuboidRegion::new(BlockVector3::new(3, -1, 2), BlockVector3::new(1, 1, 0));
        assert_eq!(region.min(), BlockVector3::new(1, -1, 0));
        assert_eq!(region.max(), BlockVector3::new(3, 1, 2));
        assert_eq!(region.volume(), 27);
        assert_eq!(region.iter().count(), 27);
        assert!(region.contains_point(Vector3::new(3.9, 1.2, 0.0)));
        assert!(!region.contains_point(Vector3::new(4.0, 1.2, 0.0)));
    }

    #[test]
    fn huge_regions_saturate_their_volume() {
        let everything = CuboidRegion::new(
            BlockVector3::new(i32::MIN, i32::MIN, i32::MIN),
            BlockVector3::new(i32::MAX, i32::MAX, i32::MAX),
        );
        assert_eq!(everything.volume(), u64::MAX);

        // 2^32 * 1 * 2^31 still fits.
        let slab = CuboidRegion::new(
            BlockVector3::new(i32::MIN, 0, 0),
            BlockVector3::new(i32::MAX, 0, i32::MAX),
        );
        assert_eq!(slab.volume(), 1 << 63);
    }

    #[test]
    fn negative_points_floor() {
        assert_eq!(
            Vector3::new(-0.5, 0.0, -1.0).to_block_point(),
            BlockVector3::new(-1, 0, -1)
        );
    }
}
