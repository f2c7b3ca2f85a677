use crate::models::OcrSpan;

/// Finds the span holding a field's value relative to its label span.
///
/// Spans are assumed to arrive in approximate reading order. A value is
/// either to the right of the label on the same line, or on the line just
/// below it. The first such span in scan order wins; there is no distance
/// ranking, so crowded layouts can pick the wrong neighbour.
#[derive(Debug, Clone, Copy)]
pub struct SpatialLocator {
    pub same_line_tolerance: f32,
    pub next_line_distance: f32,
}

impl Default for SpatialLocator {
    fn default() -> Self {
        SpatialLocator {
            same_line_tolerance: 20.0,
            next_line_distance: 50.0,
        }
    }
}

impl SpatialLocator {
    pub fn new(same_line_tolerance: f32, next_line_distance: f32) -> Self {
        SpatialLocator {
            same_line_tolerance,
            next_line_distance,
        }
    }

    pub fn find_value_near<'a>(&self, spans: &'a [OcrSpan], label_index: usize) -> Option<&'a str> {
        if label_index + 1 >= spans.len() {
            return None;
        }

        let label_y = spans[label_index].bbox.top();

        spans
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != label_index)
            .find(|&(i, span)| {
                let dy = span.bbox.top() - label_y;
                if dy.abs() < self.same_line_tolerance {
                    // Same line: only spans read after the label.
                    i > label_index
                } else {
                    dy > 0.0 && dy < self.next_line_distance
                }
            })
            .map(|(_, span)| span.text.as_str())
    }
}
