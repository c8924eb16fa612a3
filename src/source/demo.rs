//! Generated demo content.

use super::StoryDescriptor;

/// Items revealed per load-more request.
pub const DEMO_PAGE_SIZE: usize = 8;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Grace", "Alan", "Barbara", "Dennis", "Edsger", "Frances", "Ken", "Margaret", "Niklaus",
    "Radia", "Tony",
];

const LAST_NAMES: &[&str] = &[
    "Lovelace", "Hopper", "Turing", "Liskov", "Ritchie", "Dijkstra", "Allen", "Thompson",
    "Hamilton", "Wirth", "Perlman", "Hoare",
];

/// Cumulative snapshots over `count` generated items.
///
/// Snapshot `k` holds the first `(k + 1) * DEMO_PAGE_SIZE` items, so each
/// load-more grows the list by a page. The first item is the viewer's own
/// story and stays out of the compact row. Zero items yield one empty
/// snapshot.
pub fn demo_pages(count: usize) -> Vec<Vec<StoryDescriptor>> {
    let items: Vec<StoryDescriptor> = (0..count).map(demo_item).collect();
    if items.is_empty() {
        return vec![Vec::new()];
    }
    (1..=count.div_ceil(DEMO_PAGE_SIZE))
        .map(|page| items[..(page * DEMO_PAGE_SIZE).min(count)].to_vec())
        .collect()
}

fn demo_item(index: usize) -> StoryDescriptor {
    if index == 0 {
        return StoryDescriptor {
            count: 1,
            skip_small: true,
            ..StoryDescriptor::new(1, "My story")
        };
    }
    let first = FIRST_NAMES[index % FIRST_NAMES.len()];
    let last = LAST_NAMES[(index / FIRST_NAMES.len() + index) % LAST_NAMES.len()];
    let count = (index % 4 + 1) as u32;
    StoryDescriptor {
        count,
        unread_count: if index % 3 == 0 { 0 } else { count },
        ..StoryDescriptor::new(index as u64 + 1, format!("{first} {last}"))
    }
}
