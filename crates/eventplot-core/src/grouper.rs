// File: crates/eventplot-core/src/grouper.rs
// Summary: Partition rows by event (first-seen order) and sort each group by date.

use std::collections::HashMap;

use crate::record::Row;

/// All rows of one event, sorted by date ascending. Rows without a date come last, in input order.
#[derive(Clone, Debug)]
pub struct EventGroup {
    pub event: String,
    pub rows: Vec<Row>,
}

pub fn group_by_event(rows: Vec<Row>) -> Vec<EventGroup> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<EventGroup> = Vec::new();
    for row in rows {
        match index.get(&row.event) {
            Some(&i) => groups[i].rows.push(row),
            None => {
                index.insert(row.event.clone(), groups.len());
                groups.push(EventGroup { event: row.event.clone(), rows: vec![row] });
            }
        }
    }
    for g in &mut groups {
        // stable: equal dates (and all missing dates) keep input order
        g.rows.sort_by_key(|r| (r.date.is_none(), r.date));
    }
    groups
}
