//! Scalar geometric cues read off a [`RegionMap`].
//!
//! Each feature has its own minimum point count; a region that is too short
//! drops only the feature that needs it.

use serde::Serialize;

use crate::landmarks::domain::region_map::{FacialRegion, RegionMap};
use crate::shared::point::Point2D;

/// Fewest points a region needs before any feature reads from it.
pub const MIN_REGION_POINTS: usize = 4;

/// Points averaged on each side of the eyebrow-to-eye distance.
const EYEBROW_SAMPLE: usize = 4;
const EYE_SAMPLE: usize = 8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct EmotionFeatures {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mouth_curve: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_openness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eyebrow_height: Option<f64>,
}

impl EmotionFeatures {
    /// Derives every feature whose region guard holds.
    pub fn extract(regions: &RegionMap) -> Self {
        Self {
            mouth_curve: mouth_curve(regions.get(FacialRegion::Mouth)),
            eye_openness: eye_openness(
                regions.get(FacialRegion::LeftEye),
                regions.get(FacialRegion::RightEye),
            ),
            eyebrow_height: eyebrow_height(
                regions.get(FacialRegion::Eyebrows),
                regions.get(FacialRegion::LeftEye),
                regions.get(FacialRegion::RightEye),
            ),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.mouth_curve.is_none() && self.eye_openness.is_none() && self.eyebrow_height.is_none()
    }
}

/// Mouth height over width. Indices 0/3 are the corners, 1/2 top and bottom.
fn mouth_curve(mouth: &[Point2D]) -> Option<f64> {
    if mouth.len() < MIN_REGION_POINTS {
        return None;
    }
    let width = (mouth[3].x - mouth[0].x).abs();
    let height = (mouth[2].y - mouth[1].y).abs();
    Some(if width > 0.0 { height / width } else { 0.0 })
}

fn eye_openness(left: &[Point2D], right: &[Point2D]) -> Option<f64> {
    if left.len() < MIN_REGION_POINTS || right.len() < MIN_REGION_POINTS {
        return None;
    }
    let left_open = (left[1].y - left[3].y).abs();
    let right_open = (right[1].y - right[3].y).abs();
    Some((left_open + right_open) / 2.0)
}

fn eyebrow_height(brows: &[Point2D], left: &[Point2D], right: &[Point2D]) -> Option<f64> {
    if brows.len() < MIN_REGION_POINTS || left.len() + right.len() < EYE_SAMPLE {
        return None;
    }
    let brow_y = mean_y(brows.iter().take(EYEBROW_SAMPLE));
    let eye_y = mean_y(left.iter().chain(right).take(EYE_SAMPLE));
    Some((brow_y - eye_y).abs())
}

fn mean_y<'a>(points: impl Iterator<Item = &'a Point2D>) -> f64 {
    let (sum, n) = points.fold((0.0, 0usize), |(sum, n), p| (sum + p.y, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::domain::landmark_set::LandmarkSet;
    use crate::landmarks::domain::landmark_synthesizer::LandmarkSynthesizer;
    use crate::shared::face_rect::FaceRect;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2D> {
        coords.iter().copied().map(Point2D::from).collect()
    }

    fn eye(top: f64, bottom: f64) -> Vec<Point2D> {
        // index 1 = top, index 3 = bottom
        pts(&[(0.0, 10.0), (1.0, top), (2.0, 10.0), (3.0, bottom)])
    }

    #[test]
    fn test_mouth_curve_from_sixty_point_set() {
        let mut points = vec![Point2D::default(); 60];
        points[45..49].copy_from_slice(&pts(&[
            (10.0, 5.0),  // left corner
            (20.0, 8.0),  // top
            (18.0, 15.0), // bottom
            (12.0, 12.0), // right corner
        ]));
        let regions = RegionMap::map_regions(&LandmarkSet::new(points));
        let features = EmotionFeatures::extract(&regions);
        // |15 - 8| / |12 - 10|
        assert_relative_eq!(features.mouth_curve.unwrap(), 3.5);
    }

    #[test]
    fn test_mouth_curve_zero_width_is_zero() {
        let mouth = pts(&[(5.0, 0.0), (6.0, 1.0), (6.0, 9.0), (5.0, 0.0)]);
        assert_eq!(mouth_curve(&mouth), Some(0.0));
    }

    #[test]
    fn test_eye_openness_averages_both_eyes() {
        let regions = RegionMap::from_parts([
            (FacialRegion::LeftEye, eye(8.0, 12.0)),
            (FacialRegion::RightEye, eye(7.0, 13.0)),
        ]);
        let features = EmotionFeatures::extract(&regions);
        assert_relative_eq!(features.eye_openness.unwrap(), 5.0);
    }

    #[test]
    fn test_eyebrow_height_uses_first_four_brow_and_eight_eye_points() {
        let brows = pts(&[
            (0.0, 2.0),
            (1.0, 2.0),
            (2.0, 4.0),
            (3.0, 4.0),
            (4.0, 100.0), // beyond the sample
        ]);
        let left = pts(&[(0.0, 10.0); 6]);
        let mut right = pts(&[(0.0, 14.0); 6]);
        right[2] = Point2D::new(0.0, 1000.0); // 9th combined point, ignored
        let regions = RegionMap::from_parts([
            (FacialRegion::Eyebrows, brows),
            (FacialRegion::LeftEye, left),
            (FacialRegion::RightEye, right),
        ]);
        let features = EmotionFeatures::extract(&regions);
        // brows: 3.0, eyes: (6*10 + 2*14) / 8 = 11.0
        assert_relative_eq!(features.eyebrow_height.unwrap(), 8.0);
    }

    #[rstest]
    #[case::three_points(3, false)]
    #[case::four_points(4, true)]
    fn test_mouth_minimum_points(#[case] n: usize, #[case] present: bool) {
        let mouth = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 3.0), (4.0, 0.0)])[..n].to_vec();
        let regions = RegionMap::from_parts([(FacialRegion::Mouth, mouth)]);
        assert_eq!(EmotionFeatures::extract(&regions).mouth_curve.is_some(), present);
    }

    #[rstest]
    #[case::three_points(3, false)]
    #[case::four_points(4, true)]
    fn test_eye_minimum_points(#[case] n: usize, #[case] present: bool) {
        let regions = RegionMap::from_parts([
            (FacialRegion::LeftEye, eye(8.0, 12.0)[..n].to_vec()),
            (FacialRegion::RightEye, eye(8.0, 12.0)),
        ]);
        assert_eq!(EmotionFeatures::extract(&regions).eye_openness.is_some(), present);
    }

    #[rstest]
    #[case::three_points(3, false)]
    #[case::four_points(4, true)]
    fn test_eyebrow_minimum_points(#[case] n: usize, #[case] present: bool) {
        let regions = RegionMap::from_parts([
            (FacialRegion::Eyebrows, pts(&[(0.0, 1.0); 4])[..n].to_vec()),
            (FacialRegion::LeftEye, eye(8.0, 12.0)),
            (FacialRegion::RightEye, eye(8.0, 12.0)),
        ]);
        assert_eq!(EmotionFeatures::extract(&regions).eyebrow_height.is_some(), present);
    }

    #[rstest]
    #[case::seven_combined(3, 4, false)]
    #[case::seven_combined_right_short(4, 3, false)]
    #[case::eight_combined(4, 4, true)]
    #[case::uneven_eight(2, 6, true)]
    fn test_eyebrow_needs_eight_eye_points(
        #[case] left: usize,
        #[case] right: usize,
        #[case] present: bool,
    ) {
        let regions = RegionMap::from_parts([
            (FacialRegion::Eyebrows, pts(&[(0.0, 1.0); 4])),
            (FacialRegion::LeftEye, pts(&[(0.0, 10.0); 6])[..left].to_vec()),
            (FacialRegion::RightEye, pts(&[(0.0, 10.0); 6])[..right].to_vec()),
        ]);
        let features = EmotionFeatures::extract(&regions);
        assert_eq!(features.eyebrow_height.is_some(), present);
        if present {
            assert_relative_eq!(features.eyebrow_height.unwrap(), 9.0);
        }
    }

    #[test]
    fn test_malformed_region_only_drops_its_feature() {
        let regions = RegionMap::from_parts([
            (FacialRegion::Mouth, pts(&[(0.0, 0.0); 2])),
            (FacialRegion::LeftEye, eye(8.0, 12.0)),
            (FacialRegion::RightEye, eye(8.0, 12.0)),
        ]);
        let features = EmotionFeatures::extract(&regions);
        assert!(features.mouth_curve.is_none());
        assert!(features.eye_openness.is_some());
    }

    #[test]
    fn test_short_landmark_set_yields_no_features() {
        let set = LandmarkSet::new(vec![Point2D::new(1.0, 1.0); 49]);
        let features = EmotionFeatures::extract(&RegionMap::map_regions(&set));
        assert!(features.is_empty());
    }

    #[test]
    fn test_extract_is_idempotent() {
        let set = LandmarkSynthesizer::seeded(11).synthesize(&FaceRect::new(40, 30, 120, 150));
        let regions = RegionMap::map_regions(&set);
        let first = EmotionFeatures::extract(&regions);
        let second = EmotionFeatures::extract(&regions);
        assert_eq!(first, second);
        assert!(first.mouth_curve.is_some());
        assert!(first.eye_openness.is_some());
        assert!(first.eyebrow_height.is_some());
    }

    #[test]
    fn test_missing_features_are_not_serialized() {
        let features = EmotionFeatures {
            eye_openness: Some(2.0),
            ..Default::default()
        };
        let json = serde_json::to_string(&features).unwrap();
        assert_eq!(json, r#"{"eye_openness":2.0}"#);
    }
}
