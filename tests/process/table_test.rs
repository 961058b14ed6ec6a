/*!
 * Process Table Tests
 * Registration, lookup and eviction properties
 */

use jobshell::{CommandSpec, ProcessStatus, ProcessTable};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn status_strategy() -> impl Strategy<Value = ProcessStatus> {
    prop_oneof![
        Just(ProcessStatus::Running),
        Just(ProcessStatus::Suspended),
        Just(ProcessStatus::Terminated),
    ]
}

proptest! {
    #[test]
    fn prop_registered_pids_are_found(pids in prop::collection::btree_set(1u32..100_000, 0..40)) {
        let mut table = ProcessTable::new();
        for &pid in &pids {
            table.register(CommandSpec::new(format!("cmd-{}", pid)), pid);
        }

        for &pid in &pids {
            let record = table.find(pid).unwrap();
            prop_assert_eq!(record.pid, pid);
            prop_assert_eq!(record.command.name(), format!("cmd-{}", pid));
            prop_assert_eq!(record.status, ProcessStatus::Running);
        }

        let listed: BTreeSet<u32> = table.snapshot().iter().map(|e| e.pid).collect();
        prop_assert_eq!(listed, pids);
    }

    #[test]
    fn prop_remove_terminated_keeps_live_records(
        entries in prop::collection::btree_map(1u32..100_000, status_strategy(), 0..40)
    ) {
        let mut table = ProcessTable::new();
        for (&pid, &status) in &entries {
            table.register(CommandSpec::new("job"), pid);
            table.set_status(pid, status);
        }

        let terminated = entries.values().filter(|s| **s == ProcessStatus::Terminated).count();
        prop_assert_eq!(table.remove_terminated(), terminated);

        for entry in table.snapshot() {
            prop_assert_ne!(entry.status, ProcessStatus::Terminated);
            prop_assert_eq!(Some(&entry.status), entries.get(&entry.pid));
        }
        prop_assert_eq!(table.len(), entries.len() - terminated);
    }
}

#[test]
fn test_snapshot_is_stable() {
    let mut table = ProcessTable::new();
    table.register(CommandSpec::new("a"), 10);
    table.register(CommandSpec::new("b"), 20);
    table.set_status(10, ProcessStatus::Suspended);

    assert_eq!(table.snapshot(), table.snapshot());
    assert_eq!(table.pids(), vec![20, 10]);
}

#[test]
fn test_clear_all_empties_table() {
    let mut table = ProcessTable::new();
    table.register(CommandSpec::new("a"), 10);
    table.clear_all();
    assert!(table.is_empty());
    assert!(table.find(10).is_none());
}
