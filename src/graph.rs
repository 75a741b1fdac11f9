//! Processing graphs.
//!
//! A [`ProcessingGraph`] maps each stage to the stages that consume its
//! output. Graphs are assembled with a [`GraphBuilder`], which checks the
//! structure once so the executor never has to.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::fmt;

use crate::stages::{Stage, StageKind};
use crate::GraphError;

/// An immutable, validated stage DAG.
pub struct ProcessingGraph {
    stages: BTreeMap<StageKind, Box<dyn Stage>>,
    dependents: BTreeMap<StageKind, Vec<StageKind>>,
}

impl fmt::Debug for ProcessingGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.stages.keys().map(|kind| (kind, self.dependents(*kind))))
            .finish()
    }
}

impl ProcessingGraph {
    pub fn stage(&self, kind: StageKind) -> Option<&dyn Stage> {
        self.stages.get(&kind).map(|stage| stage.as_ref())
    }

    pub fn contains(&self, kind: StageKind) -> bool {
        self.stages.contains_key(&kind)
    }

    /// Stages fed by `kind`, in registration order.
    pub fn dependents(&self, kind: StageKind) -> &[StageKind] {
        self.dependents.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn kinds(&self) -> impl Iterator<Item = StageKind> + '_ {
        self.stages.keys().copied()
    }

    /// Stages reachable from `root`, root included, in breadth-first order.
    pub fn reachable(&self, root: StageKind) -> Vec<StageKind> {
        let mut seen = HashSet::from([root]);
        let mut order = vec![root];
        let mut queue = VecDeque::from([root]);
        while let Some(kind) = queue.pop_front() {
            for &next in self.dependents(kind) {
                if seen.insert(next) {
                    order.push(next);
                    queue.push_back(next);
                }
            }
        }
        order
    }
}

#[derive(Debug, Default)]
pub struct GraphBuilder {
    stages: BTreeMap<StageKind, Box<dyn Stage>>,
    edges: Vec<(StageKind, StageKind)>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a stage, replacing any stage of the same kind.
    pub fn stage(mut self, stage: Box<dyn Stage>) -> Self {
        self.stages.insert(stage.kind(), stage);
        self
    }

    /// Register the default-configured stage of each kind.
    pub fn default_stages(self, kinds: &[StageKind]) -> Self {
        kinds
            .iter()
            .fold(self, |builder, kind| builder.stage(kind.default_stage()))
    }

    /// `from` feeds each of `to`.
    pub fn edges(mut self, from: StageKind, to: &[StageKind]) -> Self {
        for &target in to {
            if !self.edges.contains(&(from, target)) {
                self.edges.push((from, target));
            }
        }
        self
    }

    pub fn build(self) -> Result<ProcessingGraph, GraphError> {
        let mut dependents: BTreeMap<StageKind, Vec<StageKind>> = BTreeMap::new();
        for &(from, to) in &self.edges {
            for kind in [from, to] {
                if !self.stages.contains_key(&kind) {
                    return Err(GraphError::UnknownStage(kind));
                }
            }
            dependents.entry(from).or_default().push(to);
        }

        let graph = ProcessingGraph {
            stages: self.stages,
            dependents,
        };
        check_acyclic(&graph)?;
        check_output_keys(&graph)?;
        Ok(graph)
    }
}

fn check_acyclic(graph: &ProcessingGraph) -> Result<(), GraphError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Active,
        Done,
    }

    fn visit(
        graph: &ProcessingGraph,
        kind: StageKind,
        marks: &mut HashMap<StageKind, Mark>,
    ) -> Result<(), GraphError> {
        match marks.get(&kind) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Active) => return Err(GraphError::Cycle(kind)),
            None => {}
        }
        marks.insert(kind, Mark::Active);
        for &next in graph.dependents(kind) {
            visit(graph, next, marks)?;
        }
        marks.insert(kind, Mark::Done);
        Ok(())
    }

    let mut marks = HashMap::new();
    for kind in graph.kinds() {
        visit(graph, kind, &mut marks)?;
    }
    Ok(())
}

/// Within any single run the stages' output keys must be distinct. Stages
/// that are never reachable from one another (alternative roots) may share
/// a key.
fn check_output_keys(graph: &ProcessingGraph) -> Result<(), GraphError> {
    for root in graph.kinds() {
        let mut writers: HashMap<&'static str, StageKind> = HashMap::new();
        for kind in graph.reachable(root) {
            let Some(stage) = graph.stage(kind) else {
                continue;
            };
            let key = stage.output_key();
            if let Some(&first) = writers.get(key) {
                return Err(GraphError::DuplicateOutputKey {
                    key: key.to_string(),
                    first,
                    second: kind,
                });
            }
            writers.insert(key, kind);
        }
    }
    Ok(())
}

/// Cleaner or citation remover, then parsing, tuples and lemmas.
pub fn default_graph() -> Result<ProcessingGraph, GraphError> {
    use StageKind::*;
    GraphBuilder::new()
        .default_stages(&[
            TextCleaner,
            CitationRemover,
            Parser,
            PredicatePatternsMatcher,
            Lemmatizer,
        ])
        .edges(TextCleaner, &[Parser])
        .edges(CitationRemover, &[Parser])
        .edges(Parser, &[PredicatePatternsMatcher, Lemmatizer])
        .build()
}

/// Token-level artifacts without parsing.
pub fn token_graph() -> Result<ProcessingGraph, GraphError> {
    use StageKind::*;
    GraphBuilder::new()
        .default_stages(&[TextCleaner, SentenceTokenizer, WordTokenizer, PosTagger, Lemmatizer])
        .edges(TextCleaner, &[SentenceTokenizer, WordTokenizer])
        .edges(WordTokenizer, &[PosTagger])
        .edges(PosTagger, &[Lemmatizer])
        .build()
}
