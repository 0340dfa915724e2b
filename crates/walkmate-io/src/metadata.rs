use std::path::Path;

use ::image::{metadata::Orientation, ImageDecoder, ImageReader};
use walkmate_distance::ImageSize;

use crate::error::IoError;

/// Read the size of an image as displayed, without decoding its pixels.
///
/// When the file carries an EXIF orientation that rotates the picture by a quarter
/// turn, width and height are swapped so the size matches the frame the detector saw.
///
/// # Arguments
///
/// * `file_path` - Path to the image file (any format supported by the `image` crate).
///
/// # Example
///
/// ```no_run
/// use walkmate_io::read_image_size;
///
/// let size = read_image_size("outside01.jpg")?;
/// println!("{}x{}", size.width, size.height);
/// # Ok::<(), walkmate_io::IoError>(())
/// ```
pub fn read_image_size(file_path: impl AsRef<Path>) -> Result<ImageSize, IoError> {
    let file_path = file_path.as_ref();
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let mut decoder = ImageReader::open(file_path)?
        .with_guessed_format()?
        .into_decoder()?;
    let (width, height) = decoder.dimensions();

    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let quarter_turn = matches!(
        orientation,
        Orientation::Rotate90
            | Orientation::Rotate270
            | Orientation::Rotate90FlipH
            | Orientation::Rotate270FlipH
    );

    let (width, height) = if quarter_turn {
        log::debug!("{}: EXIF orientation {orientation:?}", file_path.display());
        (height, width)
    } else {
        (width, height)
    };

    Ok(ImageSize {
        width: width as usize,
        height: height as usize,
    })
}
