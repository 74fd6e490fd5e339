mod align;

pub use align::{align, ChartData, Dataset, LABEL_FORMAT};
