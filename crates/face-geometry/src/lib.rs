//! Facial Landmark Geometry
//!
//! Data model and pure geometry for face-mesh landmark samples:
//! - 468-point normalized landmark frames (MediaPipe Face Mesh layout)
//! - Euclidean distances between landmarks
//! - Eye aspect ratio (EAR) over six-point eye contours
//! - Mouth opening distance
//!
//! Everything here is stateless and safe to call from any number of
//! concurrent sessions.

mod landmarks;

pub use landmarks::{
    LandmarkError, LandmarkSample, Point3, LANDMARK_COUNT, LEFT_EYE_CONTOUR, LOWER_LIP, NOSE_TIP,
    RIGHT_EYE_CONTOUR, UPPER_LIP,
};

/// Euclidean distance between two landmark points.
pub fn distance(a: &Point3, b: &Point3) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let dz = a.z - b.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Eye aspect ratio over a six-point eye contour.
///
/// The contour is ordered `[p0..p5]` where `p0`/`p3` are the horizontal eye
/// corners, `p1`/`p2` the upper lid, and `p4`/`p5` the lower lid:
///
/// ```text
/// EAR = (|p1 - p5| + |p2 - p4|) / (2 * |p0 - p3|)
/// ```
///
/// Open eyes sit around 0.25-0.35; a closed eye drops below 0.20.
///
/// Callers must not pass degenerate contours (zero corner-to-corner
/// distance); the landmark source marks such frames `face_found = false`
/// before they reach geometry.
pub fn eye_aspect_ratio(sample: &LandmarkSample, contour: &[usize; 6]) -> f32 {
    let p = &sample.points;
    let vertical_a = distance(&p[contour[1]], &p[contour[5]]);
    let vertical_b = distance(&p[contour[2]], &p[contour[4]]);
    let horizontal = distance(&p[contour[0]], &p[contour[3]]);
    (vertical_a + vertical_b) / (2.0 * horizontal)
}

/// Vertical mouth opening between two lip landmarks.
pub fn mouth_opening(sample: &LandmarkSample, top: usize, bottom: usize) -> f32 {
    distance(&sample.points[top], &sample.points[bottom])
}
