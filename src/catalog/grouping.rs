//! Groups child records (parts) under their parent drama.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// A record that belongs to a parent and has a position within it.
pub trait Child {
    type ParentId: Clone + Eq + Hash + Ord;

    fn parent_id(&self) -> &Self::ParentId;

    fn sequence_number(&self) -> i32;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Group<K, T> {
    pub parent_id: K,
    pub parent_title: String,
    /// Whether the parent lookup failed and `parent_title` is the fallback.
    pub orphaned: bool,
    pub children: Vec<T>,
}

/// Sorts children ascending by sequence number. Stable, so equal numbers
/// keep their incoming order.
pub fn sort_by_sequence<T: Child>(children: &mut [T]) {
    children.sort_by_key(|child| child.sequence_number());
}

/// Partitions `children` by parent id.
///
/// Each group carries the parent's title from `titles`, or `unknown_label`
/// when the parent is missing. Children are sorted by sequence number and
/// groups by parent title (plain string ordering, ties by parent id).
pub fn group_by_parent<T: Child>(
    children: Vec<T>,
    titles: &HashMap<T::ParentId, String>,
    unknown_label: &str,
) -> Vec<Group<T::ParentId, T>> {
    let mut buckets: HashMap<T::ParentId, Vec<T>> = HashMap::new();
    for child in children {
        buckets
            .entry(child.parent_id().clone())
            .or_default()
            .push(child);
    }

    let mut groups: Vec<Group<T::ParentId, T>> = buckets
        .into_iter()
        .map(|(parent_id, mut children)| {
            sort_by_sequence(&mut children);
            let (parent_title, orphaned) = match titles.get(&parent_id) {
                Some(title) => (title.clone(), false),
                None => (unknown_label.to_string(), true),
            };
            Group {
                parent_id,
                parent_title,
                orphaned,
                children,
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        a.parent_title
            .cmp(&b.parent_title)
            .then_with(|| a.parent_id.cmp(&b.parent_id))
    });

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Ep {
        id: &'static str,
        parent: String,
        number: i32,
    }

    impl Child for Ep {
        type ParentId = String;

        fn parent_id(&self) -> &String {
            &self.parent
        }

        fn sequence_number(&self) -> i32 {
            self.number
        }
    }

    fn ep(id: &'static str, parent: &str, number: i32) -> Ep {
        Ep {
            id,
            parent: parent.to_string(),
            number,
        }
    }

    fn titles() -> HashMap<String, String> {
        HashMap::from([
            ("a".to_string(), "Zebra Love".to_string()),
            ("b".to_string(), "Autumn Rain".to_string()),
        ])
    }

    #[test]
    fn children_sorted_within_group() {
        let groups = group_by_parent(
            vec![ep("3", "a", 3), ep("1", "a", 1), ep("2", "a", 2)],
            &titles(),
            "Unknown Drama",
        );
        assert_eq!(groups.len(), 1);
        let numbers: Vec<i32> = groups[0].children.iter().map(|e| e.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn groups_sorted_by_title_and_every_child_placed_once() {
        let input = vec![
            ep("a2", "a", 2),
            ep("b1", "b", 1),
            ep("x1", "ghost", 1),
            ep("a1", "a", 1),
        ];
        let groups = group_by_parent(input.clone(), &titles(), "Unknown Drama");

        let order: Vec<&str> = groups.iter().map(|g| g.parent_title.as_str()).collect();
        assert_eq!(order, vec!["Autumn Rain", "Unknown Drama", "Zebra Love"]);

        let placed: usize = groups.iter().map(|g| g.children.len()).sum();
        assert_eq!(placed, input.len());
        for child in &input {
            let hits = groups
                .iter()
                .filter(|g| g.children.iter().any(|c| c.id == child.id))
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn missing_parent_uses_fallback_label() {
        let groups = group_by_parent(vec![ep("x", "gone", 1)], &HashMap::new(), "Unknown Drama");
        assert_eq!(groups[0].parent_title, "Unknown Drama");
        assert!(groups[0].orphaned);
    }

    #[test]
    fn title_order_is_case_sensitive() {
        let titles = HashMap::from([
            ("p".to_string(), "apple".to_string()),
            ("q".to_string(), "Banana".to_string()),
        ]);
        let groups = group_by_parent(vec![ep("1", "p", 1), ep("2", "q", 1)], &titles, "?");
        assert_eq!(groups[0].parent_title, "Banana");
        assert_eq!(groups[1].parent_title, "apple");
    }

    #[test]
    fn duplicate_sequence_numbers_keep_insertion_order() {
        let groups = group_by_parent(
            vec![ep("first", "a", 2), ep("second", "a", 2), ep("zero", "a", 1)],
            &titles(),
            "?",
        );
        let ids: Vec<&str> = groups[0].children.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["zero", "first", "second"]);
    }
}
