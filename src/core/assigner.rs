use crate::core::{EnrollmentRecord, Group, GroupAssignment};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Randomly partitions a roster snapshot into two near-equal groups.
///
/// The randomness source is pluggable: production uses OS entropy, tests a
/// seeded rng. Two runs over the same snapshot may produce different
/// memberships; only the size/coverage invariant is guaranteed.
pub struct GroupAssigner<R: Rng> {
    rng: R,
}

impl GroupAssigner<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> GroupAssigner<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Shuffles a copy of the snapshot and splits it at `ceil(n/2)`: the
    /// first half becomes Group A, the rest Group B. Stored records are never
    /// mutated; the returned records are tagged copies.
    pub fn run(&mut self, snapshot: &[EnrollmentRecord]) -> GroupAssignment {
        if snapshot.is_empty() {
            tracing::info!("no enrollments to randomize");
            return GroupAssignment::default();
        }

        let mut shuffled: Vec<EnrollmentRecord> = snapshot.to_vec();
        shuffled.shuffle(&mut self.rng);

        let split = shuffled.len().div_ceil(2);
        let mut group_a = shuffled;
        let mut group_b = group_a.split_off(split);
        for record in &mut group_a {
            record.group = Some(Group::A);
        }
        for record in &mut group_b {
            record.group = Some(Group::B);
        }

        tracing::info!(
            "randomized {} enrollments into {} + {}",
            group_a.len() + group_b.len(),
            group_a.len(),
            group_b.len()
        );
        GroupAssignment { group_a, group_b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Gender;
    use chrono::Utc;
    use std::collections::HashSet;
    use uuid::Uuid;

    fn record(name: &str) -> EnrollmentRecord {
        EnrollmentRecord {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: "+1234567890".to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            age: 30,
            gender: Gender::Other,
            attachment_name: None,
            created_at: Utc::now(),
            group: None,
        }
    }

    fn snapshot(n: usize) -> Vec<EnrollmentRecord> {
        (0..n).map(|i| record(&format!("User{}", i))).collect()
    }

    fn seeded() -> GroupAssigner<StdRng> {
        GroupAssigner::new(StdRng::seed_from_u64(42))
    }

    #[test]
    fn test_empty_snapshot_yields_empty_groups() {
        let assignment = seeded().run(&[]);
        assert!(assignment.is_empty());
        assert!(assignment.group_a.is_empty());
        assert!(assignment.group_b.is_empty());
    }

    #[test]
    fn test_five_records_split_three_two() {
        let snapshot = snapshot(5);
        let assignment = seeded().run(&snapshot);
        assert_eq!(assignment.group_a.len(), 3);
        assert_eq!(assignment.group_b.len(), 2);
    }

    #[test]
    fn test_size_and_coverage_invariant() {
        for n in 1..=10 {
            let snapshot = snapshot(n);
            let assignment = seeded().run(&snapshot);

            assert_eq!(assignment.group_a.len(), n.div_ceil(2));
            assert_eq!(assignment.group_b.len(), n / 2);

            let assigned: HashSet<Uuid> = assignment
                .group_a
                .iter()
                .chain(assignment.group_b.iter())
                .map(|r| r.id)
                .collect();
            let original: HashSet<Uuid> = snapshot.iter().map(|r| r.id).collect();

            // No duplicates, no omissions.
            assert_eq!(assigned.len(), n);
            assert_eq!(assigned, original);
        }
    }

    #[test]
    fn test_output_records_are_tagged() {
        let snapshot = snapshot(4);
        let assignment = seeded().run(&snapshot);

        assert!(assignment.group_a.iter().all(|r| r.group == Some(Group::A)));
        assert!(assignment.group_b.iter().all(|r| r.group == Some(Group::B)));
        // The snapshot itself is untouched.
        assert!(snapshot.iter().all(|r| r.group.is_none()));
    }

    #[test]
    fn test_identical_names_tracked_by_id() {
        let twins = vec![record("Alex"), record("Alex")];
        let assignment = seeded().run(&twins);

        let assigned: HashSet<Uuid> = assignment
            .group_a
            .iter()
            .chain(assignment.group_b.iter())
            .map(|r| r.id)
            .collect();
        assert_eq!(assigned.len(), 2);
    }

    #[test]
    fn test_same_seed_reproduces_partition() {
        let snapshot = snapshot(7);

        let first = GroupAssigner::new(StdRng::seed_from_u64(7)).run(&snapshot);
        let second = GroupAssigner::new(StdRng::seed_from_u64(7)).run(&snapshot);

        let ids = |group: &[EnrollmentRecord]| group.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(&first.group_a), ids(&second.group_a));
        assert_eq!(ids(&first.group_b), ids(&second.group_b));
    }
}
