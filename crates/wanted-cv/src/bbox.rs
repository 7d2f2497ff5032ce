//! Bounding box representation and batch operations.

use serde::{Deserialize, Serialize};

/// One detection returned by the model, in the pixel space of the image
/// that was submitted (for this bot: crop-local coordinates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
    pub confidence: f64,
    pub label: String,
}

impl BBox {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64, confidence: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
            confidence,
            label: String::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Center of the box, the point the bot aims at.
    pub fn centroid(&self) -> (f64, f64) {
        (
            (self.xmin + self.xmax) / 2.0,
            (self.ymin + self.ymax) / 2.0,
        )
    }

    /// Intersection over union with another box.
    pub fn iou(&self, other: &BBox) -> f64 {
        let x1 = self.xmin.max(other.xmin);
        let y1 = self.ymin.max(other.ymin);
        let x2 = self.xmax.min(other.xmax);
        let y2 = self.ymax.min(other.ymax);

        if x2 <= x1 || y2 <= y1 {
            return 0.0;
        }

        let intersection = (x2 - x1) * (y2 - y1);
        let union = self.area() + other.area() - intersection;

        intersection / union
    }

    pub fn overlaps(&self, other: &BBox, threshold: f64) -> bool {
        self.iou(other) > threshold
    }

    /// Serialize for debug logging.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Collection of bounding boxes with batch operations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BBoxCollection {
    boxes: Vec<BBox>,
}

impl BBoxCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vec(boxes: Vec<BBox>) -> Self {
        Self { boxes }
    }

    pub fn push(&mut self, bbox: BBox) {
        self.boxes.push(bbox);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn as_slice(&self) -> &[BBox] {
        &self.boxes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BBox> {
        self.boxes.iter()
    }

    /// Keep only boxes carrying exactly this label.
    pub fn filter_by_label(mut self, label: &str) -> Self {
        self.boxes.retain(|bbox| bbox.label == label);
        self
    }

    /// Keep only boxes at or above the confidence floor.
    pub fn filter_by_confidence(mut self, threshold: f64) -> Self {
        self.boxes.retain(|bbox| bbox.confidence >= threshold);
        self
    }

    /// Highest-confidence box. Ties go to the earliest in returned order.
    pub fn best(&self) -> Option<&BBox> {
        let mut best: Option<&BBox> = None;
        for bbox in &self.boxes {
            match best {
                Some(current) if bbox.confidence <= current.confidence => {}
                _ => best = Some(bbox),
            }
        }
        best
    }

    /// Greedy non-maximum suppression across all labels.
    pub fn apply_nms(mut self, iou_threshold: f64) -> Self {
        if self.boxes.is_empty() {
            return self;
        }

        self.boxes
            .sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let mut keep = Vec::new();
        let mut suppressed = vec![false; self.boxes.len()];

        for i in 0..self.boxes.len() {
            if suppressed[i] {
                continue;
            }

            keep.push(self.boxes[i].clone());

            for j in (i + 1)..self.boxes.len() {
                if !suppressed[j] && self.boxes[i].overlaps(&self.boxes[j], iou_threshold) {
                    suppressed[j] = true;
                }
            }
        }

        Self::from_vec(keep)
    }
}

impl IntoIterator for BBoxCollection {
    type Item = BBox;
    type IntoIter = std::vec::IntoIter<BBox>;

    fn into_iter(self) -> Self::IntoIter {
        self.boxes.into_iter()
    }
}

impl FromIterator<BBox> for BBoxCollection {
    fn from_iter<T: IntoIterator<Item = BBox>>(iter: T) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mario(confidence: f64) -> BBox {
        BBox::new(100.0, 40.0, 140.0, 80.0, confidence).with_label("mario")
    }

    #[test]
    fn centroid_is_the_box_center() {
        assert_eq!(mario(0.95).centroid(), (120.0, 60.0));
    }

    #[test]
    fn label_filter_ignores_confident_foreign_boxes() {
        // A very confident wario at a lower index must not shadow the
        // sought mario.
        let collection = BBoxCollection::from_vec(vec![
            BBox::new(0.0, 0.0, 20.0, 20.0, 0.99).with_label("wario"),
            mario(0.95),
            BBox::new(50.0, 50.0, 60.0, 60.0, 0.40).with_label("mario"),
        ]);

        let candidates = collection.filter_by_label("mario");
        assert_eq!(candidates.len(), 2);

        let best = candidates.best().unwrap();
        assert_eq!(best.label, "mario");
        assert_eq!(best.confidence, 0.95);
    }

    #[test]
    fn best_breaks_ties_by_returned_order() {
        let first = BBox::new(0.0, 0.0, 10.0, 10.0, 0.9).with_label("a");
        let second = BBox::new(50.0, 50.0, 60.0, 60.0, 0.9).with_label("b");
        let collection = BBoxCollection::from_vec(vec![first.clone(), second]);
        assert_eq!(collection.best(), Some(&first));
    }

    #[test]
    fn iou_of_disjoint_boxes_is_zero() {
        let a = BBox::new(0.0, 0.0, 10.0, 10.0, 1.0);
        let b = BBox::new(20.0, 20.0, 30.0, 30.0, 1.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn nms_keeps_the_strongest_of_an_overlapping_pair() {
        let collection = BBoxCollection::from_vec(vec![
            BBox::new(0.0, 0.0, 10.0, 10.0, 0.8).with_label("mario"),
            BBox::new(2.0, 2.0, 12.0, 12.0, 0.9).with_label("mario"),
            BBox::new(50.0, 50.0, 60.0, 60.0, 0.7).with_label("wario"),
        ]);

        let kept = collection.apply_nms(0.5);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept.as_slice()[0].confidence, 0.9);
    }
}
