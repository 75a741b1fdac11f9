//! Pairing submission tuples with excerpt tuples.

use pathfinding::kuhn_munkres::{kuhn_munkres, Weights};
use serde::{Deserialize, Serialize};

use scriba_nlp::{PredicateTuple, Tools};

use crate::similarity::tuple_similarity;

/// How tuples from the two texts are paired before averaging their scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingStrategy {
    /// Repeatedly take the best remaining pair. Ties go to the pair seen
    /// first, submission-major.
    #[default]
    Greedy,
    /// Maximum total score over all one-to-one assignments.
    Optimal,
}

/// A matched pair: indices into the submission and excerpt tuple lists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TupleMatch {
    pub submission: usize,
    pub excerpt: usize,
    pub score: f64,
}

impl MatchingStrategy {
    /// Pair up to `min(submission.len(), excerpt.len())` tuples.
    pub fn pair(
        self,
        tools: &Tools,
        submission: &[PredicateTuple],
        excerpt: &[PredicateTuple],
    ) -> Vec<TupleMatch> {
        let scores: Vec<Vec<f64>> = submission
            .iter()
            .map(|s| excerpt.iter().map(|e| tuple_similarity(tools, s, e)).collect())
            .collect();
        match self {
            MatchingStrategy::Greedy => greedy(&scores, excerpt.len()),
            MatchingStrategy::Optimal => optimal(&scores, excerpt.len()),
        }
    }
}

/// Mean score of the pairs, `None` when nothing was paired.
pub fn mean_score(matches: &[TupleMatch]) -> Option<f64> {
    if matches.is_empty() {
        return None;
    }
    let total: f64 = matches.iter().map(|m| m.score).sum();
    Some(total / matches.len() as f64)
}

fn greedy(scores: &[Vec<f64>], columns: usize) -> Vec<TupleMatch> {
    let mut rows_left = vec![true; scores.len()];
    let mut cols_left = vec![true; columns];
    let mut matches = Vec::new();

    loop {
        let mut best: Option<TupleMatch> = None;
        for (i, row) in scores.iter().enumerate().filter(|(i, _)| rows_left[*i]) {
            for (j, &score) in row.iter().enumerate().filter(|(j, _)| cols_left[*j]) {
                if best.map_or(true, |b| score > b.score) {
                    best = Some(TupleMatch {
                        submission: i,
                        excerpt: j,
                        score,
                    });
                }
            }
        }
        let Some(found) = best else { break };
        rows_left[found.submission] = false;
        cols_left[found.excerpt] = false;
        matches.push(found);
    }

    matches
}

/// Integer weights for the assignment solver, transposed when there are more
/// submission tuples than excerpt tuples so that rows never exceed columns.
struct ScoreMatrix {
    data: Vec<Vec<i64>>,
    transposed: bool,
}

impl ScoreMatrix {
    fn new(scores: &[Vec<f64>], columns: usize) -> Self {
        let data = scores
            .iter()
            .map(|row| row.iter().map(|s| (s * 100.0).round() as i64).collect())
            .collect();
        Self {
            data,
            transposed: scores.len() > columns,
        }
    }

    fn raw_rows(&self) -> usize {
        self.data.len()
    }

    fn raw_columns(&self) -> usize {
        self.data.first().map_or(0, Vec::len)
    }
}

impl Weights<i64> for ScoreMatrix {
    fn rows(&self) -> usize {
        if self.transposed {
            self.raw_columns()
        } else {
            self.raw_rows()
        }
    }

    fn columns(&self) -> usize {
        if self.transposed {
            self.raw_rows()
        } else {
            self.raw_columns()
        }
    }

    fn at(&self, row: usize, col: usize) -> i64 {
        let (i, j) = if self.transposed { (col, row) } else { (row, col) };
        self.data.get(i).and_then(|r| r.get(j)).copied().unwrap_or(0)
    }

    fn neg(&self) -> Self {
        let data = self
            .data
            .iter()
            .map(|row| row.iter().map(|&v| -v).collect())
            .collect();
        Self {
            data,
            transposed: self.transposed,
        }
    }
}

fn optimal(scores: &[Vec<f64>], columns: usize) -> Vec<TupleMatch> {
    if scores.is_empty() || columns == 0 {
        return Vec::new();
    }
    let matrix = ScoreMatrix::new(scores, columns);
    let (_, assignment) = kuhn_munkres(&matrix);

    let mut matches: Vec<TupleMatch> = assignment
        .into_iter()
        .enumerate()
        .map(|(row, col)| {
            let (i, j) = if matrix.transposed { (col, row) } else { (row, col) };
            TupleMatch {
                submission: i,
                excerpt: j,
                score: scores[i][j],
            }
        })
        .collect();
    matches.sort_by_key(|m| m.submission);
    matches
}
