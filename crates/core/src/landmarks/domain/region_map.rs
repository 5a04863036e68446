use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::constants::MIN_LANDMARKS_FOR_REGIONS;
use crate::shared::point::Point2D;

/// Named anatomical region of a landmark set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FacialRegion {
    LeftEye,
    RightEye,
    Mouth,
    Eyebrows,
    Nose,
}

impl FacialRegion {
    pub const ALL: [FacialRegion; 5] = [
        FacialRegion::LeftEye,
        FacialRegion::RightEye,
        FacialRegion::Mouth,
        FacialRegion::Eyebrows,
        FacialRegion::Nose,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FacialRegion::LeftEye => "left_eye",
            FacialRegion::RightEye => "right_eye",
            FacialRegion::Mouth => "mouth",
            FacialRegion::Eyebrows => "eyebrows",
            FacialRegion::Nose => "nose",
        }
    }

    fn slot(self) -> usize {
        self as usize
    }
}

/// Index window of one region.
///
/// `full` is used when the set is strictly longer than `full.1`; shorter
/// sets fall back to the `fallback` window.
#[derive(Clone, Copy, Debug)]
struct RegionSpan {
    full: (usize, usize),
    fallback: (usize, usize),
}

/// Indexed by [`FacialRegion`] discriminant.
const REGION_TABLE: [RegionSpan; 5] = [
    // left_eye
    RegionSpan {
        full: (33, 39),
        fallback: (10, 16),
    },
    // right_eye
    RegionSpan {
        full: (39, 45),
        fallback: (16, 22),
    },
    // mouth
    RegionSpan {
        full: (45, 53),
        fallback: (22, 30),
    },
    // eyebrows
    RegionSpan {
        full: (17, 27),
        fallback: (5, 15),
    },
    // nose
    RegionSpan {
        full: (27, 32),
        fallback: (30, 35),
    },
];

impl RegionSpan {
    fn select(&self, len: usize) -> (usize, usize) {
        if len > self.full.1 {
            self.full
        } else {
            self.fallback
        }
    }
}

/// Landmark sub-sequences per facial region.
///
/// Every region is always present; degraded inputs map to empty slices.
/// Serializes as an object keyed by region name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionMap {
    regions: [Vec<Point2D>; 5],
}

impl RegionMap {
    /// Partitions `landmarks` by the fixed index table.
    pub fn map_regions(landmarks: &LandmarkSet) -> Self {
        let len = landmarks.len();
        if len < MIN_LANDMARKS_FOR_REGIONS {
            return Self::default();
        }
        let mut map = Self::default();
        for region in FacialRegion::ALL {
            let (start, end) = REGION_TABLE[region.slot()].select(len);
            map.regions[region.slot()] = landmarks.span(start, end).to_vec();
        }
        map
    }

    /// Builds a map from explicit per-region points.
    pub fn from_parts(parts: impl IntoIterator<Item = (FacialRegion, Vec<Point2D>)>) -> Self {
        let mut map = Self::default();
        for (region, points) in parts {
            map.regions[region.slot()] = points;
        }
        map
    }

    pub fn get(&self, region: FacialRegion) -> &[Point2D] {
        &self.regions[region.slot()]
    }

    pub fn is_empty(&self) -> bool {
        self.regions.iter().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FacialRegion, &[Point2D])> + '_ {
        FacialRegion::ALL
            .into_iter()
            .map(move |r| (r, self.get(r)))
    }
}

impl Serialize for RegionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FacialRegion::ALL.len()))?;
        for (region, points) in self.iter() {
            map.serialize_entry(region.name(), points)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Point `i` sits at `(i, -i)` so slices reveal which indices they came from.
    fn indexed(n: usize) -> LandmarkSet {
        (0..n)
            .map(|i| Point2D::new(i as f64, -(i as f64)))
            .collect::<Vec<_>>()
            .into()
    }

    fn first_index(map: &RegionMap, region: FacialRegion) -> usize {
        map.get(region)[0].x as usize
    }

    #[rstest]
    #[case::empty(0)]
    #[case::few(10)]
    #[case::just_below(49)]
    fn test_short_sets_yield_empty_regions(#[case] n: usize) {
        let map = RegionMap::map_regions(&indexed(n));
        assert!(map.is_empty());
        assert_eq!(map.iter().count(), 5);
    }

    #[test]
    fn test_full_set_uses_full_ranges() {
        let map = RegionMap::map_regions(&indexed(468));
        assert_eq!(first_index(&map, FacialRegion::LeftEye), 33);
        assert_eq!(first_index(&map, FacialRegion::RightEye), 39);
        assert_eq!(first_index(&map, FacialRegion::Mouth), 45);
        assert_eq!(first_index(&map, FacialRegion::Eyebrows), 17);
        assert_eq!(first_index(&map, FacialRegion::Nose), 27);

        assert_eq!(map.get(FacialRegion::LeftEye).len(), 6);
        assert_eq!(map.get(FacialRegion::RightEye).len(), 6);
        assert_eq!(map.get(FacialRegion::Mouth).len(), 8);
        assert_eq!(map.get(FacialRegion::Eyebrows).len(), 10);
        assert_eq!(map.get(FacialRegion::Nose).len(), 5);
    }

    #[test]
    fn test_fifty_points_mix_full_and_fallback() {
        // only the mouth bound (53) exceeds the minimum set size
        let map = RegionMap::map_regions(&indexed(50));
        assert_eq!(first_index(&map, FacialRegion::Mouth), 22);
        assert_eq!(map.get(FacialRegion::Mouth).len(), 8);
        assert_eq!(first_index(&map, FacialRegion::LeftEye), 33);
        assert_eq!(first_index(&map, FacialRegion::Nose), 27);
    }

    #[test]
    fn test_bound_is_strict() {
        let table = REGION_TABLE[FacialRegion::Mouth.slot()];
        assert_eq!(table.select(53), (22, 30));
        assert_eq!(table.select(54), (45, 53));
    }

    #[rstest]
    #[case::left_eye(FacialRegion::LeftEye, 39, (10, 16))]
    #[case::right_eye(FacialRegion::RightEye, 45, (16, 22))]
    #[case::eyebrows(FacialRegion::Eyebrows, 27, (5, 15))]
    #[case::nose(FacialRegion::Nose, 32, (30, 35))]
    fn test_fallback_windows(
        #[case] region: FacialRegion,
        #[case] len: usize,
        #[case] expected: (usize, usize),
    ) {
        assert_eq!(REGION_TABLE[region.slot()].select(len), expected);
    }

    #[test]
    fn test_preserves_point_order() {
        let map = RegionMap::map_regions(&indexed(60));
        let xs: Vec<f64> = map.get(FacialRegion::Nose).iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![27.0, 28.0, 29.0, 30.0, 31.0]);
    }

    #[test]
    fn test_serializes_with_region_names_in_order() {
        let map = RegionMap::from_parts([(FacialRegion::Nose, vec![Point2D::new(1.0, 2.0)])]);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(
            json,
            r#"{"left_eye":[],"right_eye":[],"mouth":[],"eyebrows":[],"nose":[{"x":1.0,"y":2.0}]}"#
        );
    }
}
