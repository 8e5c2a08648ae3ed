//! Image loading and page export

use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use printpdf::{
    ImageCompression, ImageOptimizationOptions, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions,
    RawImage, RawImageData, RawImageFormat, XObjectTransform,
};

use super::trim::trim_borders;
use crate::constants::{IMAGE_EXTENSIONS, MM_PER_INCH};
use crate::types::*;

/// Where composed pages are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A single multi-page PDF
    Pdf(PathBuf),
    /// A directory of `page_NNN.jpg` files
    PageImages(PathBuf),
}

impl OutputTarget {
    /// A `.pdf` extension selects PDF output, anything else a page directory
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let is_pdf = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf {
            OutputTarget::Pdf(path)
        } else {
            OutputTarget::PageImages(path)
        }
    }
}

/// List the images in a directory, sorted by file name.
///
/// The directory is created when it does not exist yet, in which case the
/// list is empty.
pub async fn discover_images(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    tokio::fs::create_dir_all(dir).await?;

    let mut paths = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if is_image_path(&path) && is_file_or_link_to_file(&path).await? {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    log::debug!("Found {} image(s) in {}", paths.len(), dir.display());
    Ok(paths)
}

/// `metadata` follows symlinks; a dangling link counts as no file
async fn is_file_or_link_to_file(path: &Path) -> Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err.into()),
    }
}

fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Load, decode and border-trim a single image
pub async fn load_image(id: usize, path: impl AsRef<Path>) -> Result<ImageDescriptor> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let image = tokio::task::spawn_blocking(move || {
        let decoded = image::load_from_memory(&bytes)?;
        Ok::<_, PackError>(trim_borders(decoded))
    })
    .await??;

    log::debug!(
        "Loaded image {} from {} ({}x{})",
        id,
        path.display(),
        image.width(),
        image.height()
    );
    Ok(ImageDescriptor::new(id, image))
}

/// Load multiple images; ids follow the order of `paths`
pub async fn load_images(paths: &[impl AsRef<Path>]) -> Result<Vec<ImageDescriptor>> {
    let mut images = Vec::new();
    for (id, path) in paths.iter().enumerate() {
        images.push(load_image(id, path).await?);
    }
    Ok(images)
}

/// Write the pages as one PDF, each page sized to its canvas at `dpi`.
///
/// Page rasters are embedded at full resolution as JPEG at `quality` (1-100).
pub async fn save_pdf(
    canvases: Vec<PageCanvas>,
    dpi: u32,
    quality: u8,
    path: impl AsRef<Path>,
) -> Result<()> {
    if canvases.is_empty() {
        return Err(PackError::EmptyInput);
    }
    let path = path.as_ref().to_owned();
    let page_count = canvases.len();
    let bytes = tokio::task::spawn_blocking(move || build_pdf(canvases, dpi, quality)).await??;
    tokio::fs::write(&path, bytes).await?;
    log::info!("Saved {} page(s) to {}", page_count, path.display());
    Ok(())
}

fn build_pdf(canvases: Vec<PageCanvas>, dpi: u32, quality: u8) -> Result<Vec<u8>> {
    if dpi == 0 {
        return Err(PackError::Config("DPI must be greater than zero".to_string()));
    }
    if !(1..=100).contains(&quality) {
        return Err(PackError::Config(format!(
            "JPEG quality must be between 1 and 100, got {}",
            quality
        )));
    }
    let px_to_mm = |px: u32| Mm(px as f32 / dpi as f32 * MM_PER_INCH);

    let mut doc = PdfDocument::new("Packed images");

    for canvas in canvases {
        let (width, height) = canvas.pixels.dimensions();
        let raw = RawImage {
            pixels: RawImageData::U8(canvas.pixels.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        let image_id = doc.add_image(&raw);

        let ops = vec![Op::UseXobject {
            id: image_id,
            transform: XObjectTransform {
                dpi: Some(dpi as f32),
                ..Default::default()
            },
        }];
        doc.pages
            .push(PdfPage::new(px_to_mm(width), px_to_mm(height), ops));
    }

    let mut warnings = Vec::new();
    // The default optimization caps images at 2MB, which would downsample pages
    let save_options = PdfSaveOptions {
        image_optimization: Some(ImageOptimizationOptions {
            max_image_size: None,
            quality: Some(quality as f32 / 100.0),
            format: Some(ImageCompression::Jpeg),
            ..Default::default()
        }),
        ..Default::default()
    };
    let bytes = doc.save(&save_options, &mut warnings);
    for warning in &warnings {
        log::debug!("PDF warning: {:?}", warning);
    }

    if bytes.is_empty() {
        return Err(PackError::Pdf("PDF serialization produced no output".to_string()));
    }
    Ok(bytes)
}

/// Write each page as `page_NNN.jpg` into `dir`, returning the written paths
pub async fn save_page_images(
    canvases: Vec<PageCanvas>,
    quality: u8,
    dir: impl AsRef<Path>,
) -> Result<Vec<PathBuf>> {
    if canvases.is_empty() {
        return Err(PackError::EmptyInput);
    }
    let dir = dir.as_ref().to_owned();
    tokio::fs::create_dir_all(&dir).await?;

    let encoded = tokio::task::spawn_blocking(move || {
        canvases
            .iter()
            .map(|canvas| {
                let mut bytes = Vec::new();
                JpegEncoder::new_with_quality(&mut bytes, quality).encode_image(&canvas.pixels)?;
                Ok::<_, PackError>((canvas.index, bytes))
            })
            .collect::<Result<Vec<_>>>()
    })
    .await??;

    let mut written = Vec::new();
    for (index, bytes) in encoded {
        let path = dir.join(page_file_name(index));
        tokio::fs::write(&path, bytes).await?;
        written.push(path);
    }

    log::info!("Saved {} page(s) to {}", written.len(), dir.display());
    Ok(written)
}

/// File name for a 1-based page index
pub fn page_file_name(index: usize) -> String {
    format!("page_{:03}.jpg", index)
}
