//! Queries over a built relationship map.
//!
//! The builder never walks edges; everything transitive lives here. Walks
//! keep a visited set and cycle search keeps its current path, so cyclic
//! declarations terminate.

use std::collections::{BTreeSet, HashSet, VecDeque};

use super::RelationshipMap;

/// Every spec reachable through `depends_on`, nearest first (start excluded)
pub fn upstream(map: &RelationshipMap, id: &str) -> Vec<String> {
    walk(id, |node| map.depends_on(node))
}

/// Every spec that transitively requires `id`, nearest first (start excluded)
pub fn downstream(map: &RelationshipMap, id: &str) -> Vec<String> {
    walk(id, |node| map.required_by(node))
}

fn walk<'a, F>(start: &str, next: F) -> Vec<String>
where
    F: Fn(&str) -> &'a [String],
{
    let mut visited: HashSet<String> = HashSet::from([start.to_string()]);
    let mut queue: VecDeque<String> = VecDeque::from([start.to_string()]);
    let mut order = Vec::new();

    while let Some(node) = queue.pop_front() {
        for neighbor in next(&node) {
            if visited.insert(neighbor.clone()) {
                order.push(neighbor.clone());
                queue.push_back(neighbor.clone());
            }
        }
    }

    order
}

/// Report every elementary dependency cycle among known specs.
///
/// Each cycle is listed once, starting at its smallest identifier, with that
/// identifier repeated at the end (`a -> b -> a`). Cycles come back sorted.
pub fn find_cycles(map: &RelationshipMap) -> Vec<Vec<String>> {
    let mut found = BTreeSet::new();

    for start in map.ids() {
        let mut path = vec![start.to_string()];
        collect_cycles_from(map, start, &mut path, &mut found);
    }

    found.into_iter().collect()
}

/// Extend `path` through specs ordered after `start`; a cycle is recorded
/// whenever an edge leads back to `start`, so each one is seen only from
/// its smallest member.
fn collect_cycles_from(
    map: &RelationshipMap,
    start: &str,
    path: &mut Vec<String>,
    found: &mut BTreeSet<Vec<String>>,
) {
    let Some(node) = path.last().cloned() else {
        return;
    };

    for dep in map.depends_on(&node) {
        if !map.contains(dep) || dep.as_str() < start {
            continue;
        }
        if dep == start {
            let mut cycle = path.clone();
            cycle.push(start.to_string());
            found.insert(cycle);
        } else if !path.contains(dep) {
            path.push(dep.clone());
            collect_cycles_from(map, start, path, found);
            path.pop();
        }
    }
}
