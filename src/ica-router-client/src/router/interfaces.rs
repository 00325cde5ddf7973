//! Solidity ABI surface of the interchain account router and mailbox.
//!
//! Only the entry points this crate encodes against or reads from are declared. The argument
//! order and types here are the wire contract: the router decodes by fixed ABI layout.

use alloy_sol_types::sol;

sol! {
    /// Call executed by the interchain account. `to` is an address left-padded to 32 bytes.
    #[derive(Debug, PartialEq, Eq)]
    struct Call {
        bytes32 to;
        uint256 value;
        bytes data;
    }

    interface IInterchainAccountRouter {
        function callRemote(uint32 destination, Call[] calls, bytes hookMetadata)
            external
            payable
            returns (bytes32);

        function callRemoteWithOverrides(uint32 destination, bytes32 router, bytes32 ism, Call[] calls)
            external
            payable
            returns (bytes32);

        function getRemoteInterchainAccount(address owner, address router, address ism)
            external
            view
            returns (address);

        function getLocalInterchainAccount(uint32 origin, bytes32 owner, bytes32 router, address ism)
            external
            view
            returns (address);

        function quoteGasPayment(uint32 destination, bytes messageBody, uint256 gasLimit)
            external
            view
            returns (uint256);
    }

    interface IMailbox {
        event DispatchId(bytes32 indexed messageId);

        function defaultIsm() external view returns (address);
    }
}
