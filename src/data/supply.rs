//! Rice supply flows
//!
//! Each row describes one year of rice moving from a producing province to an
//! intermediate region (stage one) and on from that region to a final
//! destination (stage two). [`FlowGraph`] turns the rows of a year into the
//! node/edge lists a Sankey diagram needs.

use super::error::DataResult;
use super::table::Table;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Destination node whose share of stage-two flow is reported
pub const URBAN_NODE: &str = "Hanoi urban";

/// Years the slider offers
pub const FIRST_YEAR: i32 = 2010;
pub const LAST_YEAR: i32 = 2022;
pub const YEAR_STEP: usize = 2;

/// One row of the supply table
#[derive(Debug, Clone, PartialEq)]
pub struct SupplyFlowRecord {
    pub year: i32,
    pub province: String,
    pub intermediate: String,
    pub stage_one: f64,
    pub destination: String,
    pub stage_two: f64,
}

/// A weighted edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowEdge {
    pub source: String,
    pub target: String,
    pub supply: f64,
}

/// Sankey graph for a single year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowGraph {
    pub year: i32,
    /// Distinct region names: all edge sources first, then targets, first-seen order
    pub nodes: Vec<String>,
    /// Deduplicated stage-one edges followed by aggregated stage-two edges
    pub edges: Vec<FlowEdge>,
    /// Number of leading edges that belong to stage one
    pub stage_one_len: usize,
}

impl FlowGraph {
    /// Index of a node label
    pub fn node_index(&self, label: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n == label)
    }

    pub fn stage_one(&self) -> &[FlowEdge] {
        &self.edges[..self.stage_one_len]
    }

    pub fn stage_two(&self) -> &[FlowEdge] {
        &self.edges[self.stage_one_len..]
    }

    /// Total stage-one flow into the intermediate regions
    pub fn total_flow(&self) -> f64 {
        self.stage_one().iter().map(|e| e.supply).sum()
    }

    /// Total stage-two flow
    pub fn stage_two_total(&self) -> f64 {
        self.stage_two().iter().map(|e| e.supply).sum()
    }

    /// Percentage of stage-two flow ending at [`URBAN_NODE`]
    ///
    /// `None` when the year has no stage-two flow.
    pub fn urban_share(&self) -> Option<f64> {
        let total = self.stage_two_total();
        if total == 0.0 {
            return None;
        }
        let urban: f64 = self
            .stage_two()
            .iter()
            .filter(|e| e.target == URBAN_NODE)
            .map(|e| e.supply)
            .sum();
        Some(urban / total * 100.0)
    }

    /// `(source index, target index, weight)` per edge
    pub fn links(&self) -> Vec<(usize, usize, f64)> {
        self.edges
            .iter()
            .filter_map(|e| {
                Some((self.node_index(&e.source)?, self.node_index(&e.target)?, e.supply))
            })
            .collect()
    }
}

/// All supply rows
#[derive(Debug, Clone, Default)]
pub struct SupplyFlows {
    pub records: Vec<SupplyFlowRecord>,
}

impl SupplyFlows {
    pub fn load(path: &Path) -> DataResult<Self> {
        let flows = Self::from_table(&Table::read(path)?)?;
        tracing::info!(file = %path.display(), rows = flows.records.len(), "Loaded supply flows");
        Ok(flows)
    }

    pub fn from_table(table: &Table) -> DataResult<Self> {
        let year = table.column("Year")?;
        let province = table.column("province")?;
        let target = table.column("Target")?;
        let stage_one = table.column("Supply to Hanoi")?;
        let target_1 = table.column("Target_1")?;
        let stage_two = table.column("Rice supply")?;

        let records = (0..table.len())
            .map(|row| {
                Ok(SupplyFlowRecord {
                    year: table.i32_at(row, year)?,
                    province: table.str_at(row, province).to_string(),
                    intermediate: table.str_at(row, target).to_string(),
                    stage_one: table.f64_at(row, stage_one)?,
                    destination: table.str_at(row, target_1).to_string(),
                    stage_two: table.f64_at(row, stage_two)?,
                })
            })
            .collect::<DataResult<Vec<_>>>()?;

        Ok(Self { records })
    }

    /// Years offered by the slider
    pub fn slider_years() -> Vec<i32> {
        (FIRST_YEAR..=LAST_YEAR).step_by(YEAR_STEP).collect()
    }

    /// Build the two-stage graph for `year`
    pub fn graph(&self, year: i32) -> FlowGraph {
        let rows: Vec<&SupplyFlowRecord> = self.records.iter().filter(|r| r.year == year).collect();

        let mut stage_one: Vec<FlowEdge> = Vec::new();
        for r in &rows {
            let edge = FlowEdge {
                source: r.province.clone(),
                target: r.intermediate.clone(),
                supply: r.stage_one,
            };
            let duplicate = stage_one.iter().any(|e| {
                e.source == edge.source
                    && e.target == edge.target
                    && e.supply.to_bits() == edge.supply.to_bits()
            });
            if !duplicate {
                stage_one.push(edge);
            }
        }

        let mut grouped: BTreeMap<(String, String), f64> = BTreeMap::new();
        for r in &rows {
            *grouped
                .entry((r.intermediate.clone(), r.destination.clone()))
                .or_insert(0.0) += r.stage_two;
        }

        let stage_one_len = stage_one.len();
        let mut edges = stage_one;
        edges.extend(
            grouped
                .into_iter()
                .map(|((source, target), supply)| FlowEdge { source, target, supply }),
        );

        let mut nodes: Vec<String> = Vec::new();
        let labels = edges
            .iter()
            .map(|e| &e.source)
            .chain(edges.iter().map(|e| &e.target));
        for label in labels {
            if !nodes.contains(label) {
                nodes.push(label.clone());
            }
        }

        FlowGraph {
            year,
            nodes,
            edges,
            stage_one_len,
        }
    }
}
