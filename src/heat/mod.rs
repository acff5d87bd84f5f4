pub mod aggregate;
pub mod exec;
pub mod grid;
pub mod output;
pub mod report;
pub mod window;

pub use aggregate::{
    aggregate, aggregate_filtered, day_distance, Aggregator, DayBuckets, DayDistance, OUT_OF_RANGE,
};
pub use exec::exec;
pub use grid::Grid;
pub use output::{build_output, output_json, render_heatmap, render_report};
pub use window::{DayZone, WindowClock};
