//! Range Overlap Index
//!
//! Per-namespace view of the allocated subnet ranges. The index is rebuilt
//! from the persisted subnets while the namespace lock is held, so it is
//! always consistent with the store and is never shared as a raw mutable
//! container.

use crate::domain::models::cidr::{Cidr, IpRange};
use crate::domain::models::subnet::{Subnet, SubnetId};

/// An entry of the index: one existing subnet's range
#[derive(Debug, Clone, Copy)]
pub struct IndexEntry {
    pub subnet_id: SubnetId,
    pub cidr: Cidr,
}

/// Overlap index over the subnets of a single namespace
#[derive(Debug, Default)]
pub struct OverlapIndex {
    entries: Vec<IndexEntry>,
}

impl OverlapIndex {
    /// Build the index from a namespace's existing subnets
    #[must_use]
    pub fn from_subnets(subnets: &[Subnet]) -> Self {
        Self {
            entries: subnets
                .iter()
                .map(|s| IndexEntry {
                    subnet_id: *s.id(),
                    cidr: *s.cidr(),
                })
                .collect(),
        }
    }

    /// Return the first existing subnet whose range intersects `candidate`,
    /// if any. Linear in the number of subnets.
    #[must_use]
    pub fn find_overlap(&self, candidate: &IpRange) -> Option<&IndexEntry> {
        self.entries
            .iter()
            .find(|entry| entry.cidr.range().overlaps(candidate))
    }

    /// Find the lowest aligned, non-overlapping `/prefix` block inside
    /// `root`.
    ///
    /// Candidates start at `root`'s network address and advance in steps of
    /// the block size, so every candidate start is a multiple of
    /// `2^(32-prefix)`. The first candidate that fits inside the root and
    /// overlaps nothing wins; `None` means the root is exhausted.
    #[must_use]
    pub fn suggest_next_free(&self, root: &Cidr, prefix: u8) -> Option<Cidr> {
        if prefix > 32 || prefix < root.prefix() {
            return None;
        }

        let root_range = root.range();
        let step = 1u64 << (32 - u32::from(prefix));
        let mut cursor = u64::from(root_range.start);

        while cursor + step - 1 <= u64::from(root_range.end) {
            #[allow(clippy::cast_possible_truncation)]
            let candidate = IpRange {
                start: cursor as u32,
                end: (cursor + step - 1) as u32,
            };

            match self.find_overlap(&candidate) {
                None => {
                    #[allow(clippy::cast_possible_truncation)]
                    return Cidr::from_parts(cursor as u32, prefix).ok();
                }
                Some(entry) => {
                    // jump past the conflicting range, re-aligned to the
                    // block boundary
                    let conflict_end = u64::from(entry.cidr.range().end);
                    let next = conflict_end + 1;
                    let aligned = next.div_ceil(step) * step;
                    cursor = aligned.max(cursor + step);
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::namespace::NamespaceId;
    use crate::domain::models::subnet::CreateSubnetData;

    fn subnet(cidr: &str) -> Subnet {
        Subnet::new(CreateSubnetData {
            namespace_id: NamespaceId::new(),
            cidr: Cidr::parse(cidr).unwrap(),
            label: cidr.to_string(),
            vlan_id: None,
            location: None,
        })
        .unwrap()
    }

    fn index(cidrs: &[&str]) -> OverlapIndex {
        let subnets: Vec<Subnet> = cidrs.iter().map(|c| subnet(c)).collect();
        OverlapIndex::from_subnets(&subnets)
    }

    #[test]
    fn detects_contained_and_containing_overlaps() {
        let idx = index(&["10.0.1.0/24"]);

        // /25 inside the existing /24
        let inside = Cidr::parse("10.0.1.128/25").unwrap().range();
        assert!(idx.find_overlap(&inside).is_some());

        // /16 containing the existing /24
        let around = Cidr::parse("10.0.0.0/16").unwrap().range();
        assert!(idx.find_overlap(&around).is_some());

        // disjoint sibling
        let sibling = Cidr::parse("10.0.2.0/24").unwrap().range();
        assert!(idx.find_overlap(&sibling).is_none());
    }

    #[test]
    fn reports_which_subnet_conflicts() {
        let conflicting = subnet("10.0.1.0/24");
        let other = subnet("10.9.0.0/24");
        let idx = OverlapIndex::from_subnets(&[other, conflicting.clone()]);

        let candidate = Cidr::parse("10.0.1.64/26").unwrap().range();
        let entry = idx.find_overlap(&candidate).unwrap();
        assert_eq!(entry.subnet_id, *conflicting.id());
        assert_eq!(entry.cidr.to_string(), "10.0.1.0/24");
    }

    #[test]
    fn suggests_root_start_in_an_empty_namespace() {
        let root = Cidr::parse("10.0.0.0/8").unwrap();
        let idx = OverlapIndex::default();
        assert_eq!(
            idx.suggest_next_free(&root, 24).unwrap().to_string(),
            "10.0.0.0/24"
        );
    }

    #[test]
    fn suggests_lowest_free_aligned_block() {
        // 10.0.0.0/24, 10.0.1.0/24 and 10.1.0.0/24 are taken; the lowest
        // free aligned /24 is 10.0.2.0/24, skipping over the occupied
        // blocks without touching 10.1.0.0/24.
        let root = Cidr::parse("10.0.0.0/8").unwrap();
        let idx = index(&["10.0.0.0/24", "10.0.1.0/24", "10.1.0.0/24"]);
        assert_eq!(
            idx.suggest_next_free(&root, 24).unwrap().to_string(),
            "10.0.2.0/24"
        );
    }

    #[test]
    fn suggestion_respects_alignment_across_odd_sized_neighbors() {
        // a /25 occupies the lower half of 10.0.0.0/24; the next aligned /24
        // must start at 10.0.1.0, not 10.0.0.128
        let root = Cidr::parse("10.0.0.0/16").unwrap();
        let idx = index(&["10.0.0.0/25"]);
        assert_eq!(
            idx.suggest_next_free(&root, 24).unwrap().to_string(),
            "10.0.1.0/24"
        );
    }

    #[test]
    fn suggestion_can_fill_a_gap_between_subnets() {
        let root = Cidr::parse("192.168.0.0/16").unwrap();
        let idx = index(&["192.168.0.0/24", "192.168.2.0/24"]);
        assert_eq!(
            idx.suggest_next_free(&root, 24).unwrap().to_string(),
            "192.168.1.0/24"
        );
    }

    #[test]
    fn returns_none_when_the_root_is_exhausted() {
        let root = Cidr::parse("10.0.0.0/24").unwrap();
        let idx = index(&["10.0.0.0/25", "10.0.0.128/25"]);
        assert!(idx.suggest_next_free(&root, 25).is_none());
        assert!(idx.suggest_next_free(&root, 24).is_none());
    }

    #[test]
    fn returns_none_when_the_block_is_larger_than_the_root() {
        let root = Cidr::parse("10.0.0.0/24").unwrap();
        let idx = OverlapIndex::default();
        assert!(idx.suggest_next_free(&root, 16).is_none());
    }

    #[test]
    fn a_whole_root_sized_block_fits_an_empty_root() {
        let root = Cidr::parse("10.0.0.0/24").unwrap();
        let idx = OverlapIndex::default();
        assert_eq!(
            idx.suggest_next_free(&root, 24).unwrap().to_string(),
            "10.0.0.0/24"
        );
    }
}
