use alloy_primitives::Address;

/// Protocol-level chain identifier (not the chain's native network id, though often equal).
pub type Domain = u32;

/// Identity of an interchain account: who owns it on the origin side and which router/ISM pair
/// it is bound to.
///
/// Two keys are the same account iff every field is byte-equal. Changing `router` or `ism`
/// yields a different account, since both are hashed into the salt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AccountKey {
    /// Domain the owner lives on.
    pub origin_domain: Domain,
    /// Owner on the origin domain.
    pub owner: Address,
    /// Origin-side router that dispatches on the owner's behalf.
    pub router: Address,
    /// Security module enforced for this account on the destination.
    pub ism: Address,
}

impl AccountKey {
    pub fn new(origin_domain: Domain, owner: Address, router: Address, ism: Address) -> Self {
        Self {
            origin_domain,
            owner,
            router,
            ism,
        }
    }
}

/// Router/ISM pair that replaces the enrolled defaults for a single dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RoutingOverride {
    pub router: Address,
    pub ism: Address,
}

/// Contract addresses a chain needs to take part in interchain account dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainAddresses {
    pub mailbox: Address,
    pub ism: Address,
    pub router: Address,
}
