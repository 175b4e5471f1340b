//! Run summaries for people and for scripts.

use core::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::{
    coloring::{Coloring, PhaseStats},
    graph::CsrGraph,
};

/// Number of color classes listed in a report.
pub const HISTOGRAM_CLASSES: usize = 16;

/// Size of one color class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassShare {
    /// The color.
    pub color: u32,
    /// Vertices with this color.
    pub vertices: usize,
    /// Percentage of all vertices with this color or a lower one.
    pub cumulative_percent: f64,
}

/// Everything printed after a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColoringReport {
    /// Vertex count.
    pub nodes: usize,
    /// Half-edge count.
    pub edges: usize,
    /// `edges / nodes`.
    pub average_degree: f64,
    /// Worker threads, if the run was parallel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
    /// Seconds spent coloring.
    pub runtime_secs: f64,
    /// Millions of vertices per second.
    pub mnodes_per_sec: f64,
    /// Millions of half-edges per second.
    pub medges_per_sec: f64,
    /// `1 + max(color)`.
    pub colors_used: usize,
    /// The first [`HISTOGRAM_CLASSES`] classes.
    pub classes: Vec<ClassShare>,
    /// Engine counters, if the run went through the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phases: Option<PhaseStats>,
}

impl ColoringReport {
    /// Summarizes `coloring` of `graph` computed in `runtime`.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(graph: &CsrGraph, coloring: &Coloring, runtime: Duration) -> Self {
        let nodes = graph.node_count();
        let edges = graph.edge_count();
        let secs = runtime.as_secs_f64();
        let per_sec = |count: usize| if secs > 0.0 { count as f64 * 1e-6 / secs } else { 0.0 };

        let sizes = coloring.class_sizes();
        let mut running = 0usize;
        let classes = sizes
            .iter()
            .take(HISTOGRAM_CLASSES)
            .enumerate()
            .map(|(color, &vertices)| {
                running += vertices;
                ClassShare {
                    color: u32::try_from(color).unwrap_or(u32::MAX),
                    vertices,
                    cumulative_percent: 100.0 * running as f64 / nodes as f64,
                }
            })
            .collect();

        Self {
            nodes,
            edges,
            average_degree: if nodes == 0 { 0.0 } else { edges as f64 / nodes as f64 },
            threads: None,
            runtime_secs: secs,
            mnodes_per_sec: per_sec(nodes),
            medges_per_sec: per_sec(edges),
            colors_used: coloring.color_count(),
            classes,
            phases: None,
        }
    }

    /// Records the thread count.
    #[must_use]
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Attaches engine counters.
    #[must_use]
    pub fn with_phases(mut self, phases: PhaseStats) -> Self {
        self.phases = Some(phases);
        self
    }

    /// Pretty-printed JSON.
    ///
    /// # Errors
    /// Propagates `serde_json` failures.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for ColoringReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "nodes: {}", self.nodes)?;
        writeln!(f, "edges: {}", self.edges)?;
        writeln!(f, "avg degree: {:.2}", self.average_degree)?;
        if let Some(threads) = self.threads {
            writeln!(f, "threads: {threads}")?;
        }
        if let Some(p) = &self.phases {
            writeln!(f, "heavy vertices: {}", p.heavy_vertices)?;
            writeln!(f, "max range: {}", p.max_range)?;
            writeln!(f, "passes: {} heavy, {} light", p.heavy_passes, p.light_passes)?;
        }
        writeln!(f, "runtime:    {:.6} s", self.runtime_secs)?;
        writeln!(f, "throughput: {:.6} Mnodes/s", self.mnodes_per_sec)?;
        writeln!(f, "throughput: {:.6} Medges/s", self.medges_per_sec)?;
        writeln!(f, "colors used: {}", self.colors_used)?;
        for class in &self.classes {
            writeln!(
                f,
                "col {:2}: {:10} ({:5.1}%)",
                class.color, class.vertices, class.cumulative_percent
            )?;
        }
        Ok(())
    }
}
