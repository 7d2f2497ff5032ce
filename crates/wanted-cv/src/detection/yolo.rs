//! YOLO-style ONNX detector.
//!
//! The model is a black box trained elsewhere; all this file knows is the
//! usual export layout, one output of shape `[1, N, 5 + classes]` with rows
//! of `cx, cy, w, h, objectness, class scores...` in input-pixel space.

use std::path::Path;

use anyhow::{Context, bail};
use image::RgbImage;
use ndarray::Array4;
use ort::session::{Session, builder::GraphOptimizationLevel};

use crate::Result;
use crate::bbox::{BBox, BBoxCollection};
use crate::detection::{Detector, config::DetectionConfig};

/// Object detector backed by an externally trained YOLO export.
pub struct YoloDetector {
    session: Session,
    config: DetectionConfig,
    input_name: String,
    output_name: String,
}

impl YoloDetector {
    /// Load a detector from an ONNX weights file.
    pub fn load(weights: impl AsRef<Path>, config: DetectionConfig) -> Result<Self> {
        let weights = weights.as_ref();
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(weights)
            .with_context(|| format!("failed to load model weights from {}", weights.display()))?;

        let input_name = session
            .inputs
            .first()
            .map(|input| input.name.clone())
            .context("model declares no inputs")?;
        let output_name = session
            .outputs
            .first()
            .map(|output| output.name.clone())
            .context("model declares no outputs")?;

        Ok(Self {
            session,
            config,
            input_name,
            output_name,
        })
    }

    /// Resize to the model's input square and lay out as NCHW f32 in 0..1.
    fn preprocess(&self, image: &RgbImage) -> Array4<f32> {
        let size = self.config.input_size;
        let resized =
            image::imageops::resize(image, size, size, image::imageops::FilterType::Triangle);

        let mut tensor = Array4::<f32>::zeros((1, 3, size as usize, size as usize));
        for (x, y, pixel) in resized.enumerate_pixels() {
            for channel in 0..3 {
                tensor[[0, channel, y as usize, x as usize]] = pixel[channel] as f32 / 255.0;
            }
        }
        tensor
    }
}

impl Detector for YoloDetector {
    fn detect(&self, image: &RgbImage) -> Result<BBoxCollection> {
        let tensor = self.preprocess(image);

        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => tensor.view()]?)?;
        let output = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;

        let shape = output.shape().to_vec();
        let (rows, cols) = match shape.as_slice() {
            [1, rows, cols] => (*rows, *cols),
            [rows, cols] => (*rows, *cols),
            other => bail!("unexpected model output shape {:?}", other),
        };

        let data: Vec<f32> = output.iter().copied().collect();
        if data.len() != rows * cols {
            bail!(
                "model output has {} values, expected {}",
                data.len(),
                rows * cols
            );
        }

        let scale_x = image.width() as f64 / self.config.input_size as f64;
        let scale_y = image.height() as f64 / self.config.input_size as f64;

        let boxes = decode_rows(
            &data,
            cols,
            &self.config.class_names,
            self.config.confidence_threshold,
            scale_x,
            scale_y,
        )?;

        Ok(boxes.apply_nms(self.config.nms_threshold))
    }
}

/// Decode raw output rows into labeled boxes in submitted-image pixels.
fn decode_rows(
    data: &[f32],
    cols: usize,
    class_names: &[String],
    confidence_threshold: f64,
    scale_x: f64,
    scale_y: f64,
) -> Result<BBoxCollection> {
    if cols != 5 + class_names.len() {
        bail!(
            "model output rows have {} columns, expected {} for {} classes",
            cols,
            5 + class_names.len(),
            class_names.len()
        );
    }

    let mut boxes = BBoxCollection::new();

    for row in data.chunks_exact(cols) {
        let objectness = row[4] as f64;

        let mut class_id = 0usize;
        let mut class_score = f32::MIN;
        for (index, &score) in row[5..].iter().enumerate() {
            if score > class_score {
                class_id = index;
                class_score = score;
            }
        }

        let confidence = objectness * class_score as f64;
        if confidence < confidence_threshold {
            continue;
        }

        let cx = row[0] as f64 * scale_x;
        let cy = row[1] as f64 * scale_y;
        let width = row[2] as f64 * scale_x;
        let height = row[3] as f64 * scale_y;

        boxes.push(
            BBox::new(
                cx - width / 2.0,
                cy - height / 2.0,
                cx + width / 2.0,
                cy + height / 2.0,
                confidence,
            )
            .with_label(class_names[class_id].clone()),
        );
    }

    Ok(boxes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> Vec<String> {
        ["luigi", "mario", "yoshi", "wario"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn decode_scales_boxes_back_to_image_pixels() {
        // One confident mario row at the center of a 640 input, submitted
        // image half the size on each axis.
        let row = [320.0, 320.0, 64.0, 32.0, 0.95, 0.01, 0.99, 0.0, 0.0];
        let boxes = decode_rows(&row, 9, &classes(), 0.25, 0.5, 0.5).unwrap();

        assert_eq!(boxes.len(), 1);
        let bbox = &boxes.as_slice()[0];
        assert_eq!(bbox.label, "mario");
        assert_eq!(bbox.centroid(), (160.0, 160.0));
        assert_eq!(bbox.width(), 32.0);
        assert_eq!(bbox.height(), 16.0);
        assert!((bbox.confidence - 0.95 * 0.99).abs() < 1e-9);
    }

    #[test]
    fn decode_drops_rows_below_the_floor() {
        let rows = [
            // objectness * best class = 0.2 * 0.9, below the 0.25 floor
            320.0, 320.0, 64.0, 32.0, 0.2, 0.9, 0.0, 0.0, 0.0,
            // a clean wario
            100.0, 100.0, 20.0, 20.0, 0.9, 0.0, 0.0, 0.0, 0.8,
        ];
        let boxes = decode_rows(&rows, 9, &classes(), 0.25, 1.0, 1.0).unwrap();

        assert_eq!(boxes.len(), 1);
        assert_eq!(boxes.as_slice()[0].label, "wario");
    }

    #[test]
    fn decode_rejects_a_column_mismatch() {
        let row = [0.0; 7];
        assert!(decode_rows(&row, 7, &classes(), 0.25, 1.0, 1.0).is_err());
    }
}
