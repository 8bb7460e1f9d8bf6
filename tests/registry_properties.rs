// tests/registry_properties.rs

use std::collections::HashSet;

use proptest::prelude::*;

use execagent::registry::Registry;
use execagent::types::{Command, CommandExec, ExecStatus};

/// One attempt to write a record for the `idx`-th registered ID.
#[derive(Debug, Clone)]
enum Write {
    Success { idx: usize, lines: Vec<String> },
    Failure { idx: usize, reason: String },
    Reset { idx: usize },
}

fn write_strategy() -> impl Strategy<Value = Write> {
    prop_oneof![
        (0..8usize, proptest::collection::vec("[a-z ]{0,8}", 0..4))
            .prop_map(|(idx, lines)| Write::Success { idx, lines }),
        (0..8usize, "[a-z ]{1,12}").prop_map(|(idx, reason)| Write::Failure { idx, reason }),
        (0..8usize).prop_map(|idx| Write::Reset { idx }),
    ]
}

fn status_strategy() -> impl Strategy<Value = ExecStatus> {
    prop_oneof![
        Just(ExecStatus::InProgress),
        Just(ExecStatus::Success),
        Just(ExecStatus::Failure),
    ]
}

proptest! {
    #[test]
    fn registered_ids_are_unique(count in 1..500usize) {
        let registry = Registry::new();
        let ids: HashSet<String> = (0..count).map(|_| registry.register()).collect();
        prop_assert_eq!(ids.len(), count);
        prop_assert_eq!(registry.len(), count);
    }

    #[test]
    fn first_terminal_write_wins(writes in proptest::collection::vec(write_strategy(), 0..40)) {
        let registry = Registry::new();
        let ids: Vec<String> = (0..8).map(|_| registry.register()).collect();
        let mut expected: Vec<Option<CommandExec>> = vec![None; ids.len()];

        for write in writes {
            let (idx, record) = match write {
                Write::Success { idx, lines } => (idx, CommandExec::success(ids[idx].clone(), lines)),
                Write::Failure { idx, reason } => (idx, CommandExec::failure(ids[idx].clone(), reason)),
                Write::Reset { idx } => (idx, CommandExec::in_progress(ids[idx].clone())),
            };

            let accepted = registry.apply(record.clone()).is_ok();
            let should_accept = record.is_terminal() && expected[idx].is_none();
            prop_assert_eq!(accepted, should_accept);
            if should_accept {
                expected[idx] = Some(record);
            }

            for (i, id) in ids.iter().enumerate() {
                let current = registry.get(id).unwrap();
                match &expected[i] {
                    Some(terminal) => prop_assert_eq!(&current, terminal),
                    None => {
                        prop_assert_eq!(current.status, ExecStatus::InProgress);
                        prop_assert!(current.results.is_empty());
                    }
                }
            }
        }
    }

    #[test]
    fn wire_format_round_trips(
        command in "\\PC{0,16}",
        args in proptest::collection::vec("\\PC{0,8}", 0..4),
        sync in any::<bool>(),
        id in "cmd-[0-9]{1,19}",
        status in status_strategy(),
        results in proptest::collection::vec("\\PC{0,12}", 0..4),
    ) {
        let cmd = Command { command, args, sync };
        let json = serde_json::to_string(&cmd).unwrap();
        prop_assert_eq!(serde_json::from_str::<Command>(&json).unwrap(), cmd);

        let exec = CommandExec { id, status, results };
        let json = serde_json::to_string(&exec).unwrap();
        prop_assert_eq!(serde_json::from_str::<CommandExec>(&json).unwrap(), exec);
    }
}
