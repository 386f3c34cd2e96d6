use crate::models::bucket::{BucketKey, BucketMap};
use crate::models::sentiment::SentimentCategory;
use crate::models::series::{SeriesLayer, SeriesPoint, StackOffset, StackedSeries};

/// Lays bucket counts out as stacked layers for bar and stream views.
///
/// Layers are always stacked in `[neutral, positive, negative]` order over
/// buckets in ascending date order. Each point's height equals its count;
/// only the per-bucket baseline depends on the offset.
pub struct StackService;

impl StackService {
    pub fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn stack(&self, buckets: &BucketMap, offset: StackOffset) -> StackedSeries {
        let keys: Vec<BucketKey> = buckets.keys().copied().collect();

        // values[i][j]: count of category i in bucket j
        let values: Vec<Vec<f64>> = SentimentCategory::ALL
            .iter()
            .map(|c| buckets.values().map(|counts| f64::from(counts.get(*c))).collect())
            .collect();

        let baseline = match offset {
            StackOffset::Zero => vec![0.0; keys.len()],
            StackOffset::Wiggle => wiggle_baseline(&values, keys.len()),
        };

        let mut layers: Vec<SeriesLayer> = SentimentCategory::ALL
            .iter()
            .map(|c| SeriesLayer {
                category: *c,
                points: Vec::with_capacity(keys.len()),
            })
            .collect();

        for (j, key) in keys.iter().enumerate() {
            let mut y = baseline[j];
            for (i, layer) in layers.iter_mut().enumerate() {
                let top = y + values[i][j];
                layer.points.push(SeriesPoint {
                    key: *key,
                    y0: y,
                    y1: top,
                    category: layer.category,
                });
                y = top;
            }
        }

        let domain = stack_domain(&layers);
        StackedSeries {
            offset,
            keys,
            layers,
            domain,
        }
    }
}

impl Default for StackService {
    fn default() -> Self {
        Self::new()
    }
}

/// Streamgraph baseline (Byron & Wattenberg wiggle, as in d3's
/// `stackOffsetWiggle`). The first bucket sits at 0; each following
/// baseline moves by the count-weighted mean slope of the layer midlines,
/// which minimizes their summed squared slope. Buckets with no rows keep
/// the previous baseline.
fn wiggle_baseline(values: &[Vec<f64>], len: usize) -> Vec<f64> {
    let mut baseline = vec![0.0; len];
    let mut y = 0.0;
    for j in 1..len {
        let mut total = 0.0;
        let mut weighted = 0.0;
        let mut below = 0.0;
        for layer in values {
            let delta = layer[j] - layer[j - 1];
            total += layer[j];
            weighted += (delta / 2.0 + below) * layer[j];
            below += delta;
        }
        if total > 0.0 {
            y -= weighted / total;
        }
        baseline[j] = y;
    }
    baseline
}

/// `(min y0, max y1)` across every point; `(0, 0)` when there are none.
fn stack_domain(layers: &[SeriesLayer]) -> (f64, f64) {
    let mut points = layers.iter().flat_map(|l| l.points.iter()).peekable();
    if points.peek().is_none() {
        return (0.0, 0.0);
    }
    points.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.y0), hi.max(p.y1))
    })
}
