//! Check command implementation
//!
//! Loads the inputs and builds the interaction matrix without calibrating.

use std::io::Write;
use std::path::Path;

use gravity_core::network::{DuplicateFlowPolicy, InteractionMatrixBuilder};
use tracing::{info, warn};

use crate::io;
use crate::Result;

/// What `gravityfit check` found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Points in the point file
    pub points: usize,
    /// Records in the flow file
    pub flow_records: usize,
    /// Nodes that appear in at least one flow
    pub nodes: usize,
    /// Pairs that take part in the fit
    pub valid_pairs: usize,
    /// Recorded pairs left out of the fit (zero flow or zero distance)
    pub excluded_pairs: usize,
    /// Points that never appear in a flow
    pub unused_points: usize,
}

/// Run the check command, printing the report to `out`.
pub fn run<W: Write>(
    points: &Path,
    flows: &Path,
    policy: DuplicateFlowPolicy,
    out: &mut W,
) -> Result<CheckReport> {
    info!("Checking inputs...");
    let point_records = io::read_points(points)?;
    let flow_records = io::read_flows(flows)?;
    let matrix = InteractionMatrixBuilder::new(&point_records)
        .duplicate_policy(policy)
        .build(&flow_records)?;

    let report = CheckReport {
        points: point_records.len(),
        flow_records: flow_records.len(),
        nodes: matrix.node_count(),
        valid_pairs: matrix.valid_pair_count(),
        excluded_pairs: matrix.observed().len() - matrix.valid_pair_count(),
        unused_points: point_records.len() - matrix.node_count(),
    };

    if report.unused_points > 0 {
        warn!(unused = report.unused_points, "Some points carry no flow");
    }

    writeln!(out, "points         {}", report.points)?;
    writeln!(out, "flow records   {}", report.flow_records)?;
    writeln!(out, "nodes          {}", report.nodes)?;
    writeln!(out, "valid pairs    {}", report.valid_pairs)?;
    writeln!(out, "excluded pairs {}", report.excluded_pairs)?;
    writeln!(out, "unused points  {}", report.unused_points)?;

    info!("Inputs OK");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CliError;

    fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_check_report() {
        let dir = tempfile::tempdir().unwrap();
        let points = write(
            dir.path(),
            "points.txt",
            "A\t0\t0\nB\t1\t0\nC\t0\t1\nZ\t5\t5\n",
        );
        let flows = write(dir.path(), "flows.txt", "A\tB\t10\nB\tC\t0\nC\tA\t4\n");

        let mut out = Vec::new();
        let report = run(&points, &flows, DuplicateFlowPolicy::Replace, &mut out).unwrap();
        assert_eq!(
            report,
            CheckReport {
                points: 4,
                flow_records: 3,
                nodes: 3,
                valid_pairs: 2,
                excluded_pairs: 1,
                unused_points: 1,
            }
        );
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("valid pairs    2"));
    }

    #[test]
    fn test_check_missing_point() {
        let dir = tempfile::tempdir().unwrap();
        let points = write(dir.path(), "points.txt", "A\t0\t0\nB\t1\t0\n");
        let flows = write(dir.path(), "flows.txt", "A\tQ\t10\n");
        let err = run(
            &points,
            &flows,
            DuplicateFlowPolicy::Replace,
            &mut Vec::<u8>::new(),
        )
        .unwrap_err();
        assert!(matches!(err, CliError::Network(ref e) if e.is_missing_point()));
    }
}
