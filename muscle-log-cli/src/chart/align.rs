use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::timestamp;
use crate::models::MemberSeries;

/// Axis labels are month/day
pub const LABEL_FORMAT: &str = "%m/%d";

/// Chart-ready data: one shared axis and one value row per member.
///
/// `None` marks an axis position where the member has no sample; it
/// serializes as JSON `null` so renderers draw a gap.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<Option<f64>>,
}

/// Put irregular member series on one chronological axis.
///
/// The axis is the union of every member's timestamps ordered by instant;
/// equal instants collapse to one position. A member with several samples
/// at the same instant reports the largest, so the result does not depend
/// on input order.
pub fn align(members: &[MemberSeries]) -> ChartData {
    let axis: BTreeSet<DateTime<Utc>> = members
        .iter()
        .flat_map(|member| member.points.iter())
        .map(|point| timestamp::instant(&point.t))
        .collect();

    let labels = axis
        .iter()
        .map(|instant| instant.format(LABEL_FORMAT).to_string())
        .collect();

    let datasets = members
        .iter()
        .map(|member| {
            let mut values: BTreeMap<DateTime<Utc>, f64> = BTreeMap::new();
            for point in &member.points {
                values
                    .entry(timestamp::instant(&point.t))
                    .and_modify(|v| *v = v.max(point.v))
                    .or_insert(point.v);
            }

            Dataset {
                label: member.label.clone(),
                data: axis.iter().map(|instant| values.get(instant).copied()).collect(),
            }
        })
        .collect();

    ChartData { labels, datasets }
}
