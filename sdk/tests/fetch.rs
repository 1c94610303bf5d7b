mod common;

use common::{position_bytes, MockSource};
use solana_sdk::pubkey::Pubkey;
use whirlpool_positions::{fetch_batched, state::parse_position, Error};

#[tokio::test]
async fn preserves_order_and_marks_missing_accounts() {
    let (a, b, c) = (Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique());
    let pool = Pubkey::new_unique();
    let source = MockSource::new()
        .with_account(a, position_bytes(&pool, &Pubkey::new_unique(), 1))
        .with_account(c, position_bytes(&pool, &Pubkey::new_unique(), 3));

    let fetched = fetch_batched(&source, &[a, b, c], 100, parse_position).await.unwrap();

    let summary: Vec<(Pubkey, bool)> = fetched.iter().map(|m| (m.address, m.exists())).collect();
    assert_eq!(summary, vec![(a, true), (b, false), (c, true)]);
    assert_eq!(fetched[2].data.as_ref().unwrap().liquidity, 3);
}

#[tokio::test]
async fn splits_requests_by_batch_size() {
    let pool = Pubkey::new_unique();
    let addresses: Vec<Pubkey> = (0..5).map(|_| Pubkey::new_unique()).collect();
    let mut source = MockSource::new();
    for (i, address) in addresses.iter().enumerate().filter(|(i, _)| i % 2 == 0) {
        source = source.with_account(*address, position_bytes(&pool, &Pubkey::new_unique(), i as u128));
    }

    let chunked = fetch_batched(&source, &addresses, 2, parse_position).await.unwrap();
    assert_eq!(source.multiple_calls(), 3);
    assert_eq!(source.requested_chunks().iter().sum::<usize>(), 5);

    let unbounded = fetch_batched(&source, &addresses, 100, parse_position).await.unwrap();
    assert_eq!(source.multiple_calls(), 4);
    assert_eq!(chunked, unbounded);
}

#[tokio::test]
async fn empty_input_makes_no_calls() {
    let source = MockSource::new();
    let fetched = fetch_batched(&source, &[], 100, parse_position).await.unwrap();
    assert!(fetched.is_empty());
    assert_eq!(source.multiple_calls(), 0);
}

#[tokio::test]
async fn zero_batch_size_is_rejected() {
    let source = MockSource::new();
    let err = fetch_batched(&source, &[Pubkey::new_unique()], 0, parse_position)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[tokio::test]
async fn decode_error_on_existing_account_propagates() {
    let address = Pubkey::new_unique();
    let source = MockSource::new().with_account(address, vec![0u8; 12]);
    let err = fetch_batched(&source, &[address], 100, parse_position).await.unwrap_err();
    assert!(matches!(err, Error::ParseError { .. }));
}

#[tokio::test]
async fn rpc_failure_propagates() {
    let mut source = MockSource::new();
    source.fail_fetches = true;
    let err = fetch_batched(&source, &[Pubkey::new_unique()], 100, parse_position)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Rpc(_)));
}
