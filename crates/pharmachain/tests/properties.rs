//! Property tests for persisted chains driven through the facade.

use pharmachain::core::Block;
use pharmachain_testkit::generators::{chain, event_type, payload};
use pharmachain_testkit::TempLedger;
use proptest::prelude::*;
use serde_json::Value;

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_persisted_chain_reloads_and_extends(
        blocks in chain(6),
        limit in 1usize..10,
        next_type in event_type(),
        next_payload in payload(),
    ) {
        let fixture = TempLedger::new();
        fixture.write_raw(&blocks);
        let service = fixture.service();

        let (head, tail, appended, after) = block_on(async {
            let head = service.verify_chain().await.unwrap();
            let tail = service.get_chain_tail(limit).await.unwrap();
            let appended = service.register_event(&next_type, &next_payload).await.unwrap();
            let after = service.verify_chain().await.unwrap();
            (head, tail, appended, after)
        });

        prop_assert_eq!(head.len() as usize, blocks.len());
        let skip = blocks.len().saturating_sub(limit);
        prop_assert_eq!(&tail[..], &blocks[skip..]);

        let last: &Block = blocks.last().unwrap();
        prop_assert_eq!(appended.index, last.index + 1);
        prop_assert_eq!(appended.prev_hash, last.hash);
        prop_assert_eq!(appended.data.payload(), Some(&next_payload));
        prop_assert_eq!(after.index, appended.index);
    }

    #[test]
    fn test_payload_survives_file_roundtrip(data in payload()) {
        let fixture = TempLedger::new();
        let service = fixture.service();

        let stored = block_on(async {
            service.register_event("NOTE", &data).await.unwrap();
            fixture.service().get_chain_tail(1).await.unwrap()
        });

        let reloaded: Option<&Value> = stored[0].data.payload();
        prop_assert_eq!(reloaded, Some(&data));
        prop_assert!(stored[0].has_valid_hash());
    }
}
