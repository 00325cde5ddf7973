use alloy_primitives::{address, b256, bytes, keccak256, Address, Bytes, U256};
use ica_types::{AccountKey, Call, ChainAddresses, ChainCallError, Domain, RoutingOverride};
use proptest::prelude::*;

use crate::{
    account::{Account, InterchainAccount},
    create2::{account_address, predict_remote_account},
    decoder::{decode_message, decode_override, RouterMessage},
    dispatch::{build, send_transaction, DispatchRequest},
    encoder::encode_override,
    errors::IcaError,
    mock::{router_account, MockChain},
    quote::FeePolicy,
    resolver::{resolve_and_verify, AccountRoute},
    router::constants::PLACEHOLDER_FEE,
    salt::account_salt,
};

const ORIGIN: Domain = 97;
const REMOTE: Domain = 534351;

const OWNER: Address = address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
const ORIGIN_ROUTER: Address = address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb");
const REMOTE_ISM: Address = address!("cccccccccccccccccccccccccccccccccccccccc");
const REMOTE_ROUTER: Address = address!("dddddddddddddddddddddddddddddddddddddddd");
const ACCOUNT: Address = address!("bf2bc6cc0f09961b68b13fc70e6eb7d5445913cf");

fn remote_addresses() -> ChainAddresses {
    ChainAddresses {
        mailbox: Address::repeat_byte(0x5a),
        ism: REMOTE_ISM,
        router: REMOTE_ROUTER,
    }
}

async fn bind(origin: MockChain, remote: &MockChain) -> InterchainAccount<MockChain> {
    InterchainAccount::resolve(remote, &remote_addresses(), ORIGIN, OWNER, ORIGIN_ROUTER, origin)
        .await
        .unwrap()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
}

fn arb_address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from)
}

fn arb_call() -> impl Strategy<Value = Call> {
    (
        arb_address(),
        proptest::option::of(any::<[u8; 32]>().prop_map(U256::from_be_bytes)),
        proptest::collection::vec(any::<u8>(), 0..96),
    )
        .prop_map(|(to, value, data)| Call {
            to,
            value,
            data: data.into(),
        })
}

#[tokio::test]
async fn test_known_account_end_to_end() {
    let key = AccountKey::new(ORIGIN, OWNER, ORIGIN_ROUTER, REMOTE_ISM);
    assert_eq!(
        account_salt(&key),
        b256!("3491cc75466444ead146272b4b89c77cbf6f9ec68dadc1cfc6c21bacffb52ef1")
    );
    assert_eq!(account_address(&key, REMOTE_ROUTER), ACCOUNT);

    let remote = MockChain::new(REMOTE);
    let ica = bind(MockChain::new(ORIGIN), &remote).await;
    assert_eq!(ica.address(), ACCOUNT);
    assert_eq!(ica.router(), REMOTE_ROUTER);
    assert_eq!(ica.ism(), REMOTE_ISM);
    assert_eq!(ica.origin_router(), ORIGIN_ROUTER);
}

#[tokio::test]
async fn test_send_transaction_dispatches_through_origin_router() -> eyre::Result<()> {
    let target = Address::repeat_byte(0x11);
    let origin = MockChain::new(ORIGIN).with_gas_price(REMOTE, U256::from(2));
    let remote = MockChain::new(REMOTE).with_gas_estimate(77_000);
    let ica = bind(origin, &remote).await;

    let request = DispatchRequest::new(target, bytes!("a9059cbb")).with_value(U256::from(5));
    let relay = send_transaction(
        Some(&ica),
        &remote,
        request,
        &FeePolicy::Quoted { margin_bps: 10_000 },
    )
    .await?;

    // Gas is estimated on the remote chain, as the account.
    let estimates = remote.estimates();
    assert_eq!(estimates.len(), 1);
    assert_eq!(estimates[0].from, Some(ACCOUNT));
    assert_eq!(estimates[0].to, target);
    assert_eq!(estimates[0].value, U256::from(5));

    // The remote client never submits anything.
    assert!(remote.submitted().is_empty());

    let submitted = ica.origin_client().submitted();
    assert_eq!(submitted.len(), 1);
    let tx = &submitted[0];
    assert_eq!(tx.to, ORIGIN_ROUTER);
    assert_eq!(tx.value, U256::from(154_000));
    assert_eq!(tx.gas, None);
    assert_eq!(
        decode_message(&tx.data)?,
        RouterMessage::Override {
            destination: REMOTE,
            routing: RoutingOverride {
                router: REMOTE_ROUTER,
                ism: REMOTE_ISM,
            },
            calls: vec![Call::new(target, bytes!("a9059cbb")).with_value(U256::from(5))],
        }
    );

    assert_eq!(relay.origin_tx_hash, keccak256(1usize.to_be_bytes()));
    assert_eq!(relay.destination, REMOTE);
    assert_eq!(relay.fee, U256::from(154_000));
    assert_eq!(relay.remote_gas_limit, 77_000);
    Ok(())
}

#[tokio::test]
async fn test_explicit_gas_skips_estimation() -> eyre::Result<()> {
    let remote = MockChain::new(REMOTE);
    let ica = bind(MockChain::new(ORIGIN), &remote).await;

    let relay = build(Some(&ica), DispatchRequest::new(Address::repeat_byte(1), Bytes::new()).with_gas(42_000))?
        .resolve_gas(&remote)
        .await?
        .encode(&remote)
        .await?
        .submit(&FeePolicy::placeholder())
        .await?;

    assert!(remote.estimates().is_empty());
    assert_eq!(relay.remote_gas_limit, 42_000);
    assert_eq!(relay.fee, PLACEHOLDER_FEE);
    assert_eq!(ica.origin_client().submitted()[0].value, PLACEHOLDER_FEE);
    Ok(())
}

#[tokio::test]
async fn test_dispatch_without_account_fails_fast() {
    let remote = MockChain::new(REMOTE);
    let request = DispatchRequest::new(Address::repeat_byte(1), Bytes::new());

    assert!(matches!(
        build::<MockChain>(None, request.clone()),
        Err(IcaError::MissingAccount)
    ));
    let err = send_transaction::<MockChain, _>(None, &remote, request, &FeePolicy::placeholder())
        .await
        .unwrap_err();
    assert!(matches!(err, IcaError::MissingAccount));
    assert!(remote.estimates().is_empty());
}

#[tokio::test]
async fn test_submit_error_is_surfaced_unchanged() {
    let rejection = ChainCallError::Transport("nonce too low".into());
    let remote = MockChain::new(REMOTE);
    let ica = bind(MockChain::new(ORIGIN).failing_submit(rejection.clone()), &remote).await;

    let err = send_transaction(
        Some(&ica),
        &remote,
        DispatchRequest::new(Address::repeat_byte(1), Bytes::new()),
        &FeePolicy::placeholder(),
    )
    .await
    .unwrap_err();

    match err {
        IcaError::ChainCall {
            operation, source, ..
        } => {
            assert_eq!(operation, "submit_transaction");
            assert_eq!(source, rejection);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_failed_quote_submits_nothing() {
    // No gas price configured for the remote domain, so the quote reverts.
    let remote = MockChain::new(REMOTE);
    let ica = bind(MockChain::new(ORIGIN), &remote).await;

    let err = send_transaction(
        Some(&ica),
        &remote,
        DispatchRequest::new(Address::repeat_byte(1), Bytes::new()),
        &FeePolicy::Quoted { margin_bps: 12_000 },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err,
        IcaError::ChainCall {
            operation: "quoteGasPayment",
            source: ChainCallError::Reverted { .. },
            ..
        }
    ));
    assert!(ica.origin_client().submitted().is_empty());
}

#[test]
fn test_identity_only_encodes() {
    let ica = InterchainAccount::new(ACCOUNT, REMOTE_ROUTER, REMOTE_ISM, ORIGIN_ROUTER, ());
    let calls = [Call::new(Address::repeat_byte(0x11), bytes!("01"))];

    assert_eq!(
        ica.encode_calls(REMOTE, &calls).unwrap(),
        encode_override(REMOTE, ica.routing(), &calls).unwrap()
    );
    assert!(matches!(
        ica.sign_message(b"gm"),
        Err(IcaError::UnsupportedOperation { .. })
    ));
}

proptest! {
    #[test]
    fn prop_views_agree_with_offline_derivation(
        origin_domain in any::<u32>(),
        owner in arb_address(),
        origin_router in arb_address(),
        remote_router in arb_address(),
        remote_ism in arb_address(),
    ) {
        let route = AccountRoute { origin_domain, owner, origin_router, remote_router, remote_ism };
        let origin = MockChain::new(origin_domain);
        let remote = MockChain::new(REMOTE);

        let resolved = runtime().block_on(resolve_and_verify(&origin, &remote, &route)).unwrap();
        let predicted =
            predict_remote_account(origin_domain, owner, origin_router, remote_router, remote_ism);

        prop_assert_eq!(resolved, predicted);
        prop_assert_eq!(
            predicted,
            router_account(
                remote_router,
                origin_domain,
                owner.into_word(),
                origin_router.into_word(),
                remote_ism.into_word(),
            )
        );
    }

    #[test]
    fn prop_override_round_trip(
        destination in any::<u32>(),
        router in arb_address(),
        ism in arb_address(),
        calls in proptest::collection::vec(arb_call(), 1..5),
    ) {
        let routing = RoutingOverride { router, ism };
        let data = encode_override(destination, routing, &calls).unwrap();
        let (decoded_destination, decoded_routing, decoded) = decode_override(&data).unwrap();

        prop_assert_eq!(decoded_destination, destination);
        prop_assert_eq!(decoded_routing, routing);
        prop_assert_eq!(decoded.len(), calls.len());
        for (got, sent) in decoded.iter().zip(&calls) {
            prop_assert_eq!(got.to, sent.to);
            prop_assert_eq!(got.value, Some(sent.value_or_zero()));
            prop_assert_eq!(&got.data, &sent.data);
        }
    }
}
