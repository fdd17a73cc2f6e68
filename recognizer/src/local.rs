use async_trait::async_trait;
use camera::EncodedImage;
use std::sync::Arc;
use tracing::debug;

use crate::{labels, Recognizer, RecognizerError};

/// One labeled object from a detection model.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub label: String,
    /// Model confidence in 0..=1.
    pub score: f32,
}

/// An object detection or image classification model.
#[async_trait]
pub trait DetectionModel: Send + Sync {
    /// Run inference against `image` and return raw labeled detections.
    async fn detect(&self, image: &EncodedImage) -> anyhow::Result<Vec<Detection>>;
}

/// Local recognition pipeline: model inference, confidence filter,
/// Spanish vocabulary mapping, and announcement building.
pub struct LocalDetector {
    model: Arc<dyn DetectionModel>,
    threshold: f32,
}

impl LocalDetector {
    pub const DEFAULT_THRESHOLD: f32 = 0.5;

    pub fn new(model: Arc<dyn DetectionModel>) -> Self {
        Self {
            model,
            threshold: Self::DEFAULT_THRESHOLD,
        }
    }

    /// Override the confidence threshold.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Build the spoken announcement for a set of raw detections.
    ///
    /// Low-confidence detections are dropped, labels are translated, and
    /// duplicates collapse to one mention each, keeping first-seen order.
    /// Returns `None` when nothing survives the filter.
    pub fn announcement(&self, detections: &[Detection]) -> Option<String> {
        let mut names: Vec<String> = Vec::new();
        for det in detections {
            if det.score <= self.threshold {
                continue;
            }
            let name = labels::translate(&det.label);
            if !names.contains(&name) {
                names.push(name);
            }
        }
        if names.is_empty() {
            None
        } else {
            Some(format!("Hay {}. Ten cuidado.", names.join(", ")))
        }
    }
}

#[async_trait]
impl Recognizer for LocalDetector {
    async fn describe(&self, image: &EncodedImage) -> Result<Option<String>, RecognizerError> {
        let detections = self
            .model
            .detect(image)
            .await
            .map_err(|e| RecognizerError::Model(e.to_string()))?;
        debug!(count = detections.len(), "model returned detections");
        Ok(self.announcement(&detections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoModel;

    #[async_trait]
    impl DetectionModel for NoModel {
        async fn detect(&self, _image: &EncodedImage) -> anyhow::Result<Vec<Detection>> {
            Ok(Vec::new())
        }
    }

    fn det(label: &str, score: f32) -> Detection {
        Detection {
            label: label.into(),
            score,
        }
    }

    fn detector() -> LocalDetector {
        LocalDetector::new(Arc::new(NoModel))
    }

    #[test]
    fn names_each_object_exactly_once_regardless_of_order() {
        let d = detector();
        let forward = [det("person", 0.9), det("dog", 0.8), det("person", 0.7)];
        let backward = [det("dog", 0.8), det("person", 0.9), det("dog", 0.6)];

        let a = d.announcement(&forward).unwrap();
        let b = d.announcement(&backward).unwrap();
        for msg in [&a, &b] {
            assert_eq!(msg.matches("persona").count(), 1, "{msg}");
            assert_eq!(msg.matches("perro").count(), 1, "{msg}");
        }
        assert_eq!(a, "Hay persona, perro. Ten cuidado.");
        assert_eq!(b, "Hay perro, persona. Ten cuidado.");
    }

    #[test]
    fn single_object_message() {
        let d = detector();
        assert_eq!(
            d.announcement(&[det("chair", 0.95)]).unwrap(),
            "Hay silla. Ten cuidado."
        );
    }

    #[test]
    fn low_confidence_detections_are_dropped() {
        let d = detector();
        assert_eq!(d.announcement(&[det("person", 0.5)]), None);
        assert_eq!(d.announcement(&[det("person", 0.3), det("dog", 0.1)]), None);
    }

    #[test]
    fn threshold_is_configurable() {
        let d = detector().with_threshold(0.2);
        assert_eq!(
            d.announcement(&[det("person", 0.3)]).unwrap(),
            "Hay persona. Ten cuidado."
        );
    }
}
