use crate::stats::Statistics;

/// Histogram bin edges. Every bin is half-open except the last one, which
/// also holds its upper edge.
pub const HISTOGRAM_BINS: [f64; 5] = [0.0, 25.0, 50.0, 75.0, 100.0];

pub fn display_grade(grade: i64) -> String {
    format!("{grade}%")
}

pub fn display_statistics(stats: &Statistics) -> String {
    format!(
        "Min: {}%\nAvg: {}%\nMax: {}%",
        stats.min, stats.avg, stats.max
    )
}

/// Count scores per bin. Scores outside the bins are not counted.
pub fn histogram(scores: &[f64], edges: &[f64]) -> Vec<usize> {
    let bins = edges.len().saturating_sub(1);
    let mut counts = vec![0; bins];
    for &score in scores {
        let bin = edges.windows(2).position(|w| w[0] <= score && score < w[1]);
        let bin = bin.or_else(|| (bins > 0 && score == edges[bins]).then(|| bins - 1));
        if let Some(bin) = bin {
            counts[bin] += 1;
        }
    }
    counts
}

/// Text histogram of an assignment's scores, one `#` per student.
pub fn display_histogram(title: &str, scores: &[f64]) -> String {
    let counts = histogram(scores, &HISTOGRAM_BINS);
    let bars = HISTOGRAM_BINS
        .windows(2)
        .zip(counts)
        .map(|(edges, count)| {
            format!(
                "{:>3}-{:<3} | {} ({count})",
                edges[0],
                edges[1],
                "#".repeat(count)
            )
        });
    std::iter::once(format!("{title} Scores"))
        .chain(bars)
        .collect::<Vec<_>>()
        .join("\n")
}
