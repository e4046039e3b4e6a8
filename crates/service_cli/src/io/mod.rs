//! File input and output for `gravityfit`.

mod reader;
mod writer;

pub use reader::{parse_flows, parse_points, read_flows, read_points};
pub use writer::{
    write_csv, write_json, write_summary, BETA_SCORES_FILE, CALIBRATION_FILE, NODE_MASSES_FILE,
};
