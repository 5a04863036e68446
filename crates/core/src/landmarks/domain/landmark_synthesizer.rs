//! Synthetic dense landmarks laid out from a face rectangle.
//!
//! The first 52 points follow fixed facial proportions (jawline, brows, eyes,
//! nose, mouth); the rest fill a noisy grid over the face so the set matches
//! the size of a dense face mesh.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::shared::constants::LANDMARK_COUNT;
use crate::shared::face_rect::FaceRect;
use crate::shared::point::Point2D;

pub const JAWLINE_POINTS: usize = 17;
pub const EYEBROW_POINTS: usize = 5;
pub const EYE_POINTS: usize = 6;
pub const NOSE_POINTS: usize = 5;
pub const MOUTH_POINTS: usize = 8;

/// Points emitted before the filler grid.
pub const STRUCTURED_POINTS: usize =
    JAWLINE_POINTS + 2 * EYEBROW_POINTS + 2 * EYE_POINTS + NOSE_POINTS + MOUTH_POINTS;

const FILLER_COLUMNS: usize = 20;

/// Filler noise standard deviation as a fraction of face width/height.
const FILLER_NOISE: f64 = 0.02;

/// Generates a [`LandmarkSet`] of exactly [`LANDMARK_COUNT`] points per face.
///
/// Only the filler block draws from the random source; every structured
/// point except the eye and mouth ellipses is a pure function of the rect.
pub struct LandmarkSynthesizer {
    rng: Box<dyn RngCore + Send>,
}

impl LandmarkSynthesizer {
    pub fn new(rng: Box<dyn RngCore + Send>) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(Box::new(StdRng::seed_from_u64(seed)))
    }

    pub fn from_entropy() -> Self {
        Self::new(Box::new(StdRng::from_os_rng()))
    }

    pub fn synthesize(&mut self, rect: &FaceRect) -> LandmarkSet {
        let x = rect.x as f64;
        let y = rect.y as f64;
        let w = rect.w as f64;
        let h = rect.h as f64;

        let mut points = Vec::with_capacity(LANDMARK_COUNT);

        for i in 0..JAWLINE_POINTS {
            let t = i as f64;
            points.push(Point2D::new(
                x + (t / 16.0) * w,
                y + h * 0.8 + (t * 0.3).sin() * h * 0.1,
            ));
        }

        for start in [0.2, 0.6] {
            for i in 0..EYEBROW_POINTS {
                points.push(Point2D::new(
                    x + w * (start + i as f64 * 0.1),
                    y + h * 0.25,
                ));
            }
        }

        for center_x in [0.3, 0.7] {
            let center = (x + w * center_x, y + h * 0.35);
            ellipse(&mut points, center, (w * 0.05, h * 0.03), EYE_POINTS, PI / 3.0);
        }

        for i in 0..NOSE_POINTS {
            points.push(Point2D::new(x + w * 0.5, y + h * (0.4 + i as f64 * 0.05)));
        }

        ellipse(
            &mut points,
            (x + w * 0.5, y + h * 0.7),
            (w * 0.08, h * 0.04),
            MOUTH_POINTS,
            PI / 4.0,
        );

        self.fill_grid(&mut points, x, y, w, h);

        points.truncate(LANDMARK_COUNT);
        points.resize(LANDMARK_COUNT, Point2D::new(x, y));
        LandmarkSet::new(points)
    }

    fn fill_grid(&mut self, points: &mut Vec<Point2D>, x: f64, y: f64, w: f64, h: f64) {
        let remaining = LANDMARK_COUNT.saturating_sub(points.len());
        let rows = (remaining / FILLER_COLUMNS + 1) as f64;
        let noise_x = Normal::new(0.0, w * FILLER_NOISE).ok();
        let noise_y = Normal::new(0.0, h * FILLER_NOISE).ok();

        for i in 0..remaining {
            let col = (i % FILLER_COLUMNS) as f64;
            let row = (i / FILLER_COLUMNS) as f64;
            let jx = noise_x.map_or(0.0, |n| n.sample(&mut self.rng));
            let jy = noise_y.map_or(0.0, |n| n.sample(&mut self.rng));
            points.push(Point2D::new(
                x + col * w / FILLER_COLUMNS as f64 + jx,
                y + row * h / rows + jy,
            ));
        }
    }
}

impl Default for LandmarkSynthesizer {
    fn default() -> Self {
        Self::from_entropy()
    }
}

fn ellipse(
    points: &mut Vec<Point2D>,
    center: (f64, f64),
    radii: (f64, f64),
    count: usize,
    step: f64,
) {
    for i in 0..count {
        let angle = i as f64 * step;
        points.push(Point2D::new(
            center.0 + angle.cos() * radii.0,
            center.1 + angle.sin() * radii.1,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const JAWLINE_END: usize = JAWLINE_POINTS;
    const EYEBROWS_END: usize = JAWLINE_END + 2 * EYEBROW_POINTS;
    const EYES_END: usize = EYEBROWS_END + 2 * EYE_POINTS;
    const NOSE_END: usize = EYES_END + NOSE_POINTS;

    fn face() -> FaceRect {
        FaceRect::new(100, 50, 80, 100)
    }

    #[test]
    fn test_structured_block_is_52_points() {
        assert_eq!(STRUCTURED_POINTS, 52);
    }

    #[rstest]
    #[case::small(FaceRect::new(0, 0, 1, 1))]
    #[case::typical(FaceRect::new(100, 50, 80, 100))]
    #[case::large(FaceRect::new(900, 700, 1200, 1600))]
    #[case::zero_width(FaceRect::new(10, 10, 0, 40))]
    fn test_always_468_points(#[case] rect: FaceRect) {
        let mut synth = LandmarkSynthesizer::seeded(7);
        assert_eq!(synth.synthesize(&rect).len(), LANDMARK_COUNT);
    }

    #[test]
    fn test_first_jawline_point() {
        let set = LandmarkSynthesizer::seeded(1).synthesize(&face());
        assert_relative_eq!(set.points()[0].x, 100.0);
        assert_relative_eq!(set.points()[0].y, 130.0);
    }

    #[test]
    fn test_first_left_eyebrow_point() {
        let set = LandmarkSynthesizer::seeded(1).synthesize(&face());
        assert_relative_eq!(set.points()[17].x, 116.0);
        assert_relative_eq!(set.points()[17].y, 75.0);
    }

    #[test]
    fn test_jawline_matches_formula() {
        let rect = face();
        let set = LandmarkSynthesizer::seeded(3).synthesize(&rect);
        let (w, h) = (rect.w as f64, rect.h as f64);
        for i in 0..JAWLINE_POINTS {
            let t = i as f64;
            let p = set.points()[i];
            assert_relative_eq!(p.x, 100.0 + (t / 16.0) * w, epsilon = 1e-9);
            assert_relative_eq!(p.y, 50.0 + 0.8 * h + (t * 0.3).sin() * 0.1 * h, epsilon = 1e-9);
        }
        assert_relative_eq!(set.points()[16].x, 180.0, epsilon = 1e-9);
    }

    #[test]
    fn test_eyebrows_share_one_height() {
        let set = LandmarkSynthesizer::seeded(3).synthesize(&face());
        for p in &set.points()[JAWLINE_END..EYEBROWS_END] {
            assert_relative_eq!(p.y, 75.0, epsilon = 1e-9);
        }
        // right brow starts at 0.6 w
        assert_relative_eq!(set.points()[22].x, 148.0, epsilon = 1e-9);
    }

    #[test]
    fn test_nose_is_vertical_line() {
        let set = LandmarkSynthesizer::seeded(3).synthesize(&face());
        for (i, p) in set.points()[EYES_END..NOSE_END].iter().enumerate() {
            assert_relative_eq!(p.x, 140.0, epsilon = 1e-9);
            assert_relative_eq!(p.y, 50.0 + 100.0 * (0.4 + i as f64 * 0.05), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_eye_points_stay_near_eye_centers() {
        let set = LandmarkSynthesizer::seeded(3).synthesize(&face());
        let left = &set.points()[EYEBROWS_END..EYEBROWS_END + EYE_POINTS];
        let right = &set.points()[EYEBROWS_END + EYE_POINTS..EYES_END];
        for p in left {
            assert!((p.x - 124.0).abs() <= 4.0 + 1e-9);
            assert!((p.y - 85.0).abs() <= 3.0 + 1e-9);
        }
        for p in right {
            assert!((p.x - 156.0).abs() <= 4.0 + 1e-9);
        }
    }

    #[test]
    fn test_mouth_points_stay_near_mouth_center() {
        let set = LandmarkSynthesizer::seeded(3).synthesize(&face());
        for p in &set.points()[NOSE_END..STRUCTURED_POINTS] {
            assert!((p.x - 140.0).abs() <= 6.4 + 1e-9);
            assert!((p.y - 120.0).abs() <= 4.0 + 1e-9);
        }
    }

    #[test]
    fn test_same_seed_reproduces_filler() {
        let a = LandmarkSynthesizer::seeded(42).synthesize(&face());
        let b = LandmarkSynthesizer::seeded(42).synthesize(&face());
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds_only_change_filler() {
        let a = LandmarkSynthesizer::seeded(1).synthesize(&face());
        let b = LandmarkSynthesizer::seeded(2).synthesize(&face());
        assert_eq!(
            &a.points()[..STRUCTURED_POINTS],
            &b.points()[..STRUCTURED_POINTS]
        );
        assert_ne!(
            &a.points()[STRUCTURED_POINTS..],
            &b.points()[STRUCTURED_POINTS..]
        );
    }

    #[test]
    fn test_filler_stays_roughly_inside_face() {
        let rect = face();
        let set = LandmarkSynthesizer::seeded(9).synthesize(&rect);
        // 6 sigma margin on each axis
        for p in &set.points()[STRUCTURED_POINTS..] {
            assert!(p.x > 100.0 - 10.0 && p.x < 180.0 + 10.0, "x = {}", p.x);
            assert!(p.y > 50.0 - 12.0 && p.y < 150.0 + 12.0, "y = {}", p.y);
        }
    }

    #[test]
    fn test_zero_width_collapses_x_to_origin() {
        let set = LandmarkSynthesizer::seeded(5).synthesize(&FaceRect::new(10, 20, 0, 40));
        assert!(set.points().iter().all(|p| p.x == 10.0));
    }

    #[test]
    fn test_empty_rect_collapses_to_origin() {
        let set = LandmarkSynthesizer::seeded(5).synthesize(&FaceRect::new(10, 20, 0, 0));
        assert!(set.points().iter().all(|p| *p == Point2D::new(10.0, 20.0)));
    }
}
