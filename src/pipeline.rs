//! Breadth-first graph executor.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::cache::{Cache, CacheStore, Fingerprint, MemoryStore};
use crate::config::RunConfig;
use crate::graph::ProcessingGraph;
use crate::stages::{Stage, StageContext, StageKind};
use crate::tools::Tools;
use crate::{Artifact, Document, ProcessError, ProcessResult};

/// Runs a processing graph from one root stage.
///
/// Every stage reachable from the root runs exactly once per call, in
/// breadth-first order; a stage fed by several predecessors reads the output
/// of the first one dequeued. The first failing stage aborts the run.
#[derive(Clone)]
pub struct TextProcessor {
    graph: Arc<ProcessingGraph>,
    root: StageKind,
    store: Arc<dyn CacheStore>,
}

impl std::fmt::Debug for TextProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextProcessor")
            .field("root", &self.root)
            .field("graph", &self.graph)
            .finish()
    }
}

/// Fingerprint digests of the artifacts written so far, by output key.
type Digests = HashMap<&'static str, String>;

impl TextProcessor {
    pub fn new(graph: impl Into<Arc<ProcessingGraph>>, root: StageKind) -> Self {
        TextProcessor {
            graph: graph.into(),
            root,
            store: Arc::new(MemoryStore::new()),
        }
    }

    /// Share a cache store between processors or runs.
    pub fn with_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        self.store = store;
        self
    }

    pub fn root(&self) -> StageKind {
        self.root
    }

    pub fn graph(&self) -> &ProcessingGraph {
        &self.graph
    }

    pub fn store(&self) -> &Arc<dyn CacheStore> {
        &self.store
    }

    pub fn run(&self, text: &str, config: &RunConfig) -> ProcessResult<Document> {
        let root = self
            .graph
            .stage(self.root)
            .ok_or(ProcessError::UnknownRoot(self.root))?;
        let tools = Tools::global();
        let cache = Cache::new(self.store.as_ref(), config.enable_cache);
        let mut document = Document::new(text);
        let mut digests = Digests::new();

        let output = execute(root, &document, None, config, tools, &cache, &mut digests)?;
        document.put(root.output_key(), output);

        let mut visited = HashSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);
        while let Some(kind) = queue.pop_front() {
            let Some(input_key) = self.graph.stage(kind).map(|stage| stage.output_key()) else {
                continue;
            };
            for &next in self.graph.dependents(kind) {
                if visited.contains(&next) {
                    continue;
                }
                let Some(stage) = self.graph.stage(next) else {
                    continue;
                };
                let output = execute(
                    stage,
                    &document,
                    Some(input_key),
                    config,
                    tools,
                    &cache,
                    &mut digests,
                )?;
                document.put(stage.output_key(), output);
                visited.insert(next);
                queue.push_back(next);
            }
        }
        Ok(document)
    }
}

fn execute(
    stage: &dyn Stage,
    document: &Document,
    input_key: Option<&'static str>,
    config: &RunConfig,
    tools: &Tools,
    cache: &Cache<'_>,
    digests: &mut Digests,
) -> ProcessResult<Artifact> {
    let kind = stage.kind();
    let attrs = stage.attrs().to_string();
    let params = stage.params(config);
    let upstream = input_key.and_then(|key| digests.get(key)).map(String::as_str);
    let fingerprint = Fingerprint {
        stage: kind.as_str(),
        attrs: &attrs,
        params: params.as_deref(),
        base_text: document.text(),
        input_key,
        upstream,
    };
    let digest = fingerprint.digest();

    let ctx = StageContext {
        document,
        input_key,
        config,
        tools,
    };
    let artifact = cache.wrap(&fingerprint, || stage.process(&ctx)).map_err(|err| {
        tracing::debug!(stage = %kind, input_key = input_key.unwrap_or("-"), %err, "stage failed");
        err
    })?;
    tracing::debug!(
        stage = %kind,
        input_key = input_key.unwrap_or("-"),
        output_key = stage.output_key(),
        artifact = artifact.kind_name(),
        "stage executed"
    );
    digests.insert(stage.output_key(), digest);
    Ok(artifact)
}
