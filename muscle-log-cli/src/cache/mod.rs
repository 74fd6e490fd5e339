mod coalesce;
mod done_dates;

pub use coalesce::SingleFlight;
pub use done_dates::{DoneDateCache, DoneDateSet};
