use anyhow::Result;
use std::collections::VecDeque;

use crate::analysis::similarity::cosine_similarity;

/// Label assigned to points that belong to no dense region.
pub const NOISE: i32 = -1;

const UNVISITED: i32 = -2;

/// Density-based clustering (DBSCAN) over cosine distance.
///
/// A point is a core point when at least `min_samples` points (itself
/// included) lie within cosine distance `eps`; clusters are the transitive
/// closure of core-point neighborhoods, with border points attached to the
/// first cluster that reaches them.
///
/// # Arguments
/// * `points` - one embedding per point
/// * `eps` - neighborhood radius, as cosine distance (1 - similarity)
/// * `min_samples` - minimum neighborhood size for a core point
///
/// # Returns
/// * `Ok(labels)` - one label per point, `NOISE` for unclustered points
/// * `Err` - on dimension mismatch or degenerate (near-zero) embeddings
pub fn dbscan(points: &[&[f32]], eps: f32, min_samples: usize) -> Result<Vec<i32>> {
    let n = points.len();

    // Epsilon-neighborhoods from the pairwise distance matrix. Any malformed
    // embedding fails the whole batch; the caller decides what that means.
    let mut neighbors: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    for i in 0..n {
        for j in (i + 1)..n {
            let distance = 1.0 - cosine_similarity(points[i], points[j])?;
            if distance <= eps {
                neighbors[i].push(j);
                neighbors[j].push(i);
            }
        }
    }

    let mut labels = vec![UNVISITED; n];
    let mut cluster = 0i32;

    for point in 0..n {
        if labels[point] != UNVISITED {
            continue;
        }
        if neighbors[point].len() < min_samples {
            labels[point] = NOISE;
            continue;
        }

        // Core point: grow a new cluster through density-reachable points.
        labels[point] = cluster;
        let mut frontier: VecDeque<usize> = neighbors[point].iter().copied().collect();
        while let Some(next) = frontier.pop_front() {
            if labels[next] == NOISE {
                // Border point previously dismissed as noise.
                labels[next] = cluster;
                continue;
            }
            if labels[next] != UNVISITED {
                continue;
            }
            labels[next] = cluster;
            if neighbors[next].len() >= min_samples {
                frontier.extend(neighbors[next].iter().copied());
            }
        }

        cluster += 1;
    }

    Ok(labels)
}
