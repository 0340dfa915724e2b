use argh::FromArgs;
use std::path::PathBuf;

use walkmate::distance::{process_batch, BatchResult, DetectionBatch, DistanceConfig, ImageSize};
use walkmate::io as wio;

#[derive(FromArgs)]
/// Estimate ground distances to the detections of a photograph, calibrated on the
/// tactile block nearest to the viewer
struct Args {
    /// path to the detector JSON export
    #[argh(option, short = 'd')]
    detections: PathBuf,

    /// path to the source image, used to read its size
    #[argh(option, short = 'i')]
    image: Option<PathBuf>,

    /// width of the source image in pixels, when no image is given
    #[argh(option)]
    width: Option<usize>,

    /// height of the source image in pixels, when no image is given
    #[argh(option)]
    height: Option<usize>,

    /// path to a JSON configuration file
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// real-world side length of the reference block in centimeters
    #[argh(option)]
    block_size: Option<f64>,

    /// print the result as JSON
    #[argh(switch)]
    json: bool,
}

fn print_result(result: &BatchResult) {
    println!("reference object: {}", result.reference_id);
    println!(
        "viewer on the ground plane: ({:.1}, {:.1}) cm\n",
        result.viewer_cm[0], result.viewer_cm[1]
    );

    for report in result.reports.iter() {
        println!(
            "[{}] {} (confidence: {:.4})",
            report.id + 1,
            report.label,
            report.confidence
        );
        println!(
            "    - distance: {:.1} cm (~{:.2} m)",
            report.distance_cm, report.distance_m
        );
        println!("        * lateral (x): {:.1} cm", report.lateral_cm);
        println!("        * forward (y): {:.1} cm", report.forward_cm);
        println!("{}", "-".repeat(30));
    }

    if !result.skipped.is_empty() {
        println!("skipped {} detections:", result.num_skipped());
        for skipped in result.skipped.iter() {
            println!("[{}] {}: {}", skipped.id + 1, skipped.label, skipped.reason);
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let image_size = match (&args.image, args.width, args.height) {
        (Some(image), _, _) => wio::read_image_size(image)?,
        (None, Some(width), Some(height)) => ImageSize { width, height },
        _ => return Err("either --image or both --width and --height are required".into()),
    };
    log::info!("image size: {}x{}", image_size.width, image_size.height);

    let mut config = match &args.config {
        Some(path) => wio::read_config_json(path)?,
        None => DistanceConfig::default(),
    };
    if let Some(block_size) = args.block_size {
        config = config.with_block_side_cm(block_size);
    }

    let detections = wio::read_detections_json(&args.detections)?;
    log::info!("{} detections", detections.len());

    let batch = DetectionBatch {
        image_size,
        detections,
    };
    let result = process_batch(&config, &batch)?;

    if args.json {
        wio::write_reports_json(std::io::stdout().lock(), &result)?;
    } else {
        print_result(&result);
    }

    Ok(())
}
