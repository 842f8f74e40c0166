//! Image optimizer for product uploads.
//!
//! Uploaded photos arrive in whatever format and resolution the owner's phone
//! produced. Before they are stored they are re-encoded as JPEG by walking a
//! descending quality ladder and keeping the smallest result, stopping as soon
//! as one candidate is small enough. Large sources are bounded in resolution
//! first. The routine is pure: bytes in, bytes out, no I/O.
//!
//! Termination is guaranteed as long as a single encode succeeds; the result
//! may be larger than the source when the source was already tiny.

use crate::errors::{Error, Result};
use image::{
    DynamicImage, GenericImageView, RgbImage, codecs::jpeg::JpegEncoder, imageops::FilterType,
};
use serde::Deserialize;
use std::cmp::Ordering;
use tracing::{debug, warn};

/// Thresholds for the quality search
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OptimizerSettings {
    /// Encoder qualities tried in order, highest first (0.0 - 1.0)
    pub qualities: Vec<f32>,
    /// Qualities tried with forced downscaling when the main sweep never beat the source
    pub fallback_qualities: Vec<f32>,
    /// Fractional size reduction that ends the search early
    pub target_reduction: f64,
    /// Sources larger than this many bytes are bounded to `max_dimension` first
    pub downscale_threshold: u64,
    /// Upper bound for the longer side when downscaling, in pixels
    pub max_dimension: u32,
}

impl Default for OptimizerSettings {
    fn default() -> Self {
        Self {
            qualities: vec![0.7, 0.6, 0.5, 0.4, 0.3, 0.25],
            fallback_qualities: vec![0.5, 0.4, 0.3],
            target_reduction: 0.3,
            downscale_threshold: 1024 * 1024,
            max_dimension: 1920,
        }
    }
}

/// One encode attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Encoder quality (0.0 - 1.0)
    pub quality: f32,
    /// Encoded width in pixels
    pub width: u32,
    /// Encoded height in pixels
    pub height: u32,
    /// Whether the source was scaled down for this attempt
    pub downscaled: bool,
    /// Encoded size in bytes
    pub size: usize,
}

/// Result of [`optimize_image`]
#[derive(Debug, Clone)]
pub struct OptimizedImage {
    /// Encoded JPEG bytes
    pub bytes: Vec<u8>,
    /// The attempt that produced `bytes`
    pub chosen: Candidate,
    /// Every successful attempt, in the order they were made
    pub attempts: Vec<Candidate>,
}

impl OptimizedImage {
    /// Size of the encoded output in bytes.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.chosen.size
    }

    /// Fractional reduction against `original_size`; negative when the output grew.
    #[must_use]
    pub fn reduction(&self, original_size: u64) -> f64 {
        reduction_ratio(original_size, self.chosen.size)
    }
}

/// `1 - new / original`, or 0 when the original size is unknown.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn reduction_ratio(original_size: u64, new_size: usize) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    1.0 - new_size as f64 / original_size as f64
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn quality_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn encode_jpeg(image: &RgbImage, quality: f32) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality_percent(quality));
    encoder
        .encode_image(image)
        .map_err(|e| Error::ImageEncode {
            message: e.to_string(),
        })?;
    if bytes.is_empty() {
        return Err(Error::ImageEncode {
            message: "encoder produced no output".to_string(),
        });
    }
    Ok(bytes)
}

/// Scales `image` so its longer side is at most `bound`, or `None` if it already fits.
fn bounded(image: &DynamicImage, bound: u32) -> Option<DynamicImage> {
    let (width, height) = image.dimensions();
    if width.max(height) <= bound {
        return None;
    }
    Some(image.resize(bound, bound, FilterType::Triangle))
}

/// Best-so-far tracking across every attempt of one optimization run.
struct Search {
    original_size: u64,
    target_reduction: f64,
    best: Option<(Candidate, Vec<u8>)>,
    lowest_quality: Option<(Candidate, Vec<u8>)>,
    attempts: Vec<Candidate>,
    last_error: Option<String>,
}

impl Search {
    const fn new(original_size: u64, target_reduction: f64) -> Self {
        Self {
            original_size,
            target_reduction,
            best: None,
            lowest_quality: None,
            attempts: Vec::new(),
            last_error: None,
        }
    }

    /// Encodes `image` at each quality in turn; returns true once the target is met.
    fn sweep(&mut self, image: &DynamicImage, downscaled: bool, qualities: &[f32]) -> bool {
        let rgb = image.to_rgb8();
        let (width, height) = rgb.dimensions();

        for &quality in qualities {
            let bytes = match encode_jpeg(&rgb, quality) {
                Ok(bytes) => bytes,
                Err(e) => {
                    debug!("Skipping quality {quality}: {e}");
                    self.last_error = Some(e.to_string());
                    continue;
                }
            };

            let candidate = Candidate {
                quality,
                width,
                height,
                downscaled,
                size: bytes.len(),
            };
            debug!(
                "Candidate q={quality} {width}x{height}: {} bytes ({:.1}% reduction)",
                candidate.size,
                reduction_ratio(self.original_size, candidate.size) * 100.0
            );
            self.attempts.push(candidate);

            let met = reduction_ratio(self.original_size, candidate.size) >= self.target_reduction;
            self.record(candidate, bytes);
            if met {
                return true;
            }
        }
        false
    }

    /// Keeps the smallest candidate and the lowest-quality one; ties go to
    /// the lower quality and the smaller size respectively.
    fn record(&mut self, candidate: Candidate, bytes: Vec<u8>) {
        let smaller = self.best.as_ref().is_none_or(|(best, _)| {
            candidate.size < best.size
                || (candidate.size == best.size && candidate.quality < best.quality)
        });
        let lower = self.lowest_quality.as_ref().is_none_or(|(lowest, _)| {
            match candidate.quality.total_cmp(&lowest.quality) {
                Ordering::Less => true,
                Ordering::Equal => candidate.size < lowest.size,
                Ordering::Greater => false,
            }
        });

        match (smaller, lower) {
            (true, true) => {
                self.lowest_quality = Some((candidate, bytes.clone()));
                self.best = Some((candidate, bytes));
            }
            (true, false) => self.best = Some((candidate, bytes)),
            (false, true) => self.lowest_quality = Some((candidate, bytes)),
            (false, false) => {}
        }
    }

    fn improved(&self) -> bool {
        self.best
            .as_ref()
            .is_some_and(|(best, _)| (best.size as u64) < self.original_size)
    }

    /// The smallest candidate if it beat the source, otherwise the
    /// lowest-quality encode as a last resort.
    fn finish(self) -> Result<OptimizedImage> {
        let improved = self.improved();
        let Self {
            best,
            lowest_quality,
            attempts,
            last_error,
            ..
        } = self;
        let picked = if improved {
            best
        } else {
            lowest_quality.or(best)
        };
        let (chosen, bytes) = picked.ok_or_else(|| Error::ImageEncode {
            message: last_error.unwrap_or_else(|| "no quality levels configured".to_string()),
        })?;
        Ok(OptimizedImage {
            bytes,
            chosen,
            attempts,
        })
    }
}

/// Re-encodes `source` to the smallest JPEG the quality search finds.
///
/// `original_size` is the byte size the reduction target is measured
/// against, normally `source.len()`.
///
/// # Errors
/// Returns [`Error::ImageDecode`] if `source` is not a decodable image and
/// [`Error::ImageEncode`] if no encode attempt succeeded at all.
pub fn optimize_image(
    source: &[u8],
    original_size: u64,
    settings: &OptimizerSettings,
) -> Result<OptimizedImage> {
    let decoded = image::load_from_memory(source).map_err(|e| Error::ImageDecode {
        message: e.to_string(),
    })?;

    let mut search = Search::new(original_size, settings.target_reduction);

    let resized = if original_size > settings.downscale_threshold {
        bounded(&decoded, settings.max_dimension)
    } else {
        None
    };
    let working = resized.as_ref().unwrap_or(&decoded);

    if search.sweep(working, resized.is_some(), &settings.qualities) {
        return search.finish();
    }

    if !search.improved() {
        let (width, height) = decoded.dimensions();
        let bound = settings.max_dimension.min(width.max(height) / 2).max(1);
        let forced = bounded(&decoded, bound);
        debug!("No candidate beat the source, retrying at {bound}px");
        search.sweep(
            forced.as_ref().unwrap_or(&decoded),
            forced.is_some(),
            &settings.fallback_qualities,
        );
    }

    if !search.improved() {
        warn!(
            "Could not shrink image below {original_size} bytes, keeping lowest-quality encode"
        );
    }

    search.finish()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use image::{ImageFormat, Rgb};
    use std::io::Cursor;

    fn encode_png(image: RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(image)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    /// Deterministic noise, which PNG cannot compress.
    fn noise_png(width: u32, height: u32) -> Vec<u8> {
        let mut state: u32 = 0x1234_5678;
        let image = RgbImage::from_fn(width, height, |_, _| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            Rgb([r, g, b])
        });
        encode_png(image)
    }

    #[test]
    fn test_noisy_image_meets_target() {
        let source = noise_png(128, 128);
        let original = source.len() as u64;

        let result = optimize_image(&source, original, &OptimizerSettings::default()).unwrap();

        assert!(result.size() > 0);
        assert!(result.size() * 10 <= source.len() * 7);
        assert!(result.reduction(original) >= 0.3);
        // the search stops at the first candidate that meets the target
        assert_eq!(result.attempts.last().unwrap().size, result.size());
    }

    #[test]
    fn test_result_is_smallest_attempt() {
        let source = noise_png(64, 64);
        // an unreachable target forces the whole ladder to run
        let settings = OptimizerSettings {
            target_reduction: 2.0,
            ..OptimizerSettings::default()
        };

        let result = optimize_image(&source, source.len() as u64, &settings).unwrap();

        assert!(result.attempts.len() >= settings.qualities.len());
        let smallest = result.attempts.iter().map(|c| c.size).min().unwrap();
        assert_eq!(result.size(), smallest);
        assert_eq!(result.bytes.len(), smallest);
    }

    #[test]
    fn test_tiny_image_still_produces_output() {
        let source = encode_png(RgbImage::from_pixel(1, 1, Rgb([200, 10, 10])));
        let original = source.len() as u64;

        let result = optimize_image(&source, original, &OptimizerSettings::default()).unwrap();

        assert!(result.size() > 0);
        assert!(!result.bytes.is_empty());
        // the main ladder plus the forced-downscale retry were all tried
        let settings = OptimizerSettings::default();
        assert_eq!(
            result.attempts.len(),
            settings.qualities.len() + settings.fallback_qualities.len()
        );
        // last resort is the lowest quality of the ladder
        assert!((result.chosen.quality - 0.25).abs() < f32::EPSILON);
        // a 1x1 source cannot shrink, so no attempt is labelled downscaled
        assert!(result.attempts.iter().all(|c| !c.downscaled));
        assert!(result.attempts.iter().all(|c| (c.width, c.height) == (1, 1)));
    }

    #[test]
    fn test_large_source_is_downscaled_first() {
        let source = noise_png(200, 100);
        let settings = OptimizerSettings {
            downscale_threshold: 1_000,
            max_dimension: 50,
            ..OptimizerSettings::default()
        };

        let result = optimize_image(&source, source.len() as u64, &settings).unwrap();

        assert!(result.chosen.downscaled);
        assert_eq!(result.chosen.width, 50);
        assert_eq!(result.chosen.height, 25);
        assert!(result.attempts.iter().all(|c| c.width <= 50));
    }

    #[test]
    fn test_small_source_keeps_resolution() {
        let source = noise_png(200, 100);

        let result =
            optimize_image(&source, source.len() as u64, &OptimizerSettings::default()).unwrap();

        assert!(!result.chosen.downscaled);
        assert_eq!((result.chosen.width, result.chosen.height), (200, 100));
    }

    #[test]
    fn test_undecodable_source_fails() {
        let result = optimize_image(b"definitely not an image", 23, &OptimizerSettings::default());
        assert!(matches!(result, Err(Error::ImageDecode { .. })));
    }

    #[test]
    fn test_empty_quality_ladder_fails_cleanly() {
        let source = noise_png(8, 8);
        let settings = OptimizerSettings {
            qualities: Vec::new(),
            fallback_qualities: Vec::new(),
            ..OptimizerSettings::default()
        };
        let result = optimize_image(&source, source.len() as u64, &settings);
        assert!(matches!(result, Err(Error::ImageEncode { .. })));
    }

    #[test]
    fn test_reduction_ratio() {
        assert!((reduction_ratio(1000, 700) - 0.3).abs() < 1e-9);
        assert!(reduction_ratio(100, 150) < 0.0);
        assert!(reduction_ratio(0, 10).abs() < f64::EPSILON);
    }
}
