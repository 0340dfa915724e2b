use approx::assert_relative_eq;
use walkmate_distance::{
    process_batch, DetectionBatch, DistanceConfig, DistanceError, ImageSize, RawDetection,
    SkipReason,
};
use walkmate_geometry::{order_quad_corners, Homography, Quad};

const BLOCK: Quad = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]];

fn batch(width: usize, height: usize, detections: Vec<RawDetection>) -> DetectionBatch {
    DetectionBatch {
        image_size: ImageSize { width, height },
        detections,
    }
}

#[test]
fn test_reference_block_centre() -> Result<(), Box<dyn std::error::Error>> {
    let homo = Homography::from_reference_quad(&BLOCK, 30.0)?;
    let p = homo.map_point(&[50.0, 50.0])?;
    assert_relative_eq!(p[0], 15.0, epsilon = 1e-9);
    assert_relative_eq!(p[1], 15.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_reference_block_corners() -> Result<(), Box<dyn std::error::Error>> {
    let homo = Homography::from_reference_quad(&BLOCK, 30.0)?;

    let p = homo.map_point(&[0.0, 100.0])?;
    assert_relative_eq!(p[0], 0.0, epsilon = 1e-9);
    assert_relative_eq!(p[1], 30.0, epsilon = 1e-9);

    let p = homo.map_point(&[100.0, 0.0])?;
    assert_relative_eq!(p[0], 30.0, epsilon = 1e-9);
    assert_relative_eq!(p[1], 0.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_object_straight_ahead() -> Result<(), Box<dyn std::error::Error>> {
    let detections = vec![
        RawDetection::new("braille_block", 0.91, BLOCK),
        RawDetection::new(
            "bollard",
            0.77,
            [[50.0, -10.0], [60.0, -10.0], [60.0, 0.0], [50.0, 0.0]],
        ),
    ];
    let result = process_batch(&DistanceConfig::default(), &batch(100, 100, detections))?;

    assert_relative_eq!(result.viewer_cm[0], 15.0, epsilon = 1e-9);
    assert_relative_eq!(result.viewer_cm[1], 30.0, epsilon = 1e-9);

    let report = &result.reports[1];
    assert_relative_eq!(report.closest_point_cm[0], 15.0, epsilon = 1e-9);
    assert_relative_eq!(report.closest_point_cm[1], 0.0, epsilon = 1e-9);
    assert_relative_eq!(report.distance_cm, 30.0, epsilon = 1e-9);
    assert_relative_eq!(report.lateral_cm, 0.0, epsilon = 1e-9);
    assert_relative_eq!(report.forward_cm, 30.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn test_perspective_street_scene() -> Result<(), Box<dyn std::error::Error>> {
    // a 1080x1920 portrait photo: the reference block near the bottom is seen
    // as a trapezoid, a second block and a bollard further up the sidewalk
    let detections = vec![
        RawDetection::new(
            "braille_block",
            0.88,
            [[480.0, 1380.0], [600.0, 1380.0], [590.0, 1290.0], [490.0, 1290.0]],
        ),
        RawDetection::new(
            "braille_block",
            0.93,
            [[420.0, 1780.0], [660.0, 1780.0], [650.0, 1620.0], [430.0, 1620.0]],
        ),
        RawDetection::new(
            "bollard",
            0.72,
            [[700.0, 1000.0], [730.0, 1000.0], [730.0, 900.0], [700.0, 900.0]],
        ),
    ];
    let result = process_batch(&DistanceConfig::default(), &batch(1080, 1920, detections))?;

    // the lower block is the closest to the viewer
    assert_eq!(result.reference_id, 1);
    assert_eq!(result.reports.len(), 3);

    // objects higher in the frame are farther away on the ground
    assert!(result.reports[1].distance_cm < result.reports[0].distance_cm);
    assert!(result.reports[0].distance_cm < result.reports[2].distance_cm);
    for report in result.reports.iter() {
        assert!(report.distance_cm.is_finite());
        assert_relative_eq!(report.distance_m * 100.0, report.distance_cm, epsilon = 1e-9);
        assert_relative_eq!(
            report.distance_cm,
            report.lateral_cm.hypot(report.forward_cm),
            epsilon = 1e-9
        );
    }
    Ok(())
}

#[test]
fn test_reference_corner_roundtrip() -> Result<(), Box<dyn std::error::Error>> {
    let quad = [[420.0, 1780.0], [660.0, 1780.0], [650.0, 1620.0], [430.0, 1620.0]];
    let side = 30.0;
    let homo = Homography::from_reference_quad(&quad, side)?;
    let mapped = homo.map_quad(&order_quad_corners(&quad))?;
    let expected = [[0.0, 0.0], [side, 0.0], [side, side], [0.0, side]];
    for (m, e) in mapped.iter().zip(expected.iter()) {
        assert_relative_eq!(m[0], e[0], epsilon = 1e-6, max_relative = 1e-6);
        assert_relative_eq!(m[1], e[1], epsilon = 1e-6, max_relative = 1e-6);
    }
    Ok(())
}

#[test]
fn test_collinear_reference_produces_no_output() {
    let detections = vec![RawDetection::new(
        "braille_block",
        0.9,
        [[0.0, 0.0], [50.0, 0.0], [100.0, 0.0], [50.0, 100.0]],
    )];
    let result = process_batch(&DistanceConfig::default(), &batch(100, 100, detections));
    assert!(matches!(result, Err(DistanceError::DegenerateGeometry(_))));
}

#[test]
fn test_empty_detections() {
    let result = process_batch(&DistanceConfig::default(), &batch(640, 480, vec![]));
    assert!(matches!(result, Err(DistanceError::NoValidObjects)));
}

#[test]
fn test_one_malformed_one_valid() -> Result<(), Box<dyn std::error::Error>> {
    let mut malformed = RawDetection::new("bollard", 0.6, [[0.0, 0.0]; 4]);
    malformed.vertices[1] = [Some(10.0), None];
    let detections = vec![malformed, RawDetection::new("braille_block", 0.9, BLOCK)];

    let result = process_batch(&DistanceConfig::default(), &batch(100, 100, detections))?;
    assert_eq!(result.reports.len(), 1);
    assert_eq!(result.reports[0].label, "braille_block");
    assert_eq!(result.reports[0].id, 1);
    assert!(result.num_skipped() > 0);
    assert_eq!(
        result.skipped[0].reason,
        SkipReason::MissingCoordinate { vertex: 1 }
    );
    Ok(())
}
