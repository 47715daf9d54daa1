use std::net::Ipv4Addr;

use async_trait::async_trait;
use tmd_common::config::QueryOptions;
use tmd_common::snmp::{Identifier, QueryError, QueryResult, RawValue};

/// A stateless query surface: every call stands on its own and owns whatever
/// socket it opens.
#[async_trait]
pub trait SnmpClient: Send + Sync {
    /// Fetches one scalar.
    ///
    /// Must give up after `opts.timeout` per attempt across `opts.attempts()`
    /// attempts.
    async fn get(&self, host: Ipv4Addr, oid: &Identifier, opts: &QueryOptions) -> QueryResult;

    /// Fetches the first value after `oid` in the agent's ordering.
    async fn get_next(
        &self,
        host: Ipv4Addr,
        oid: &Identifier,
        opts: &QueryOptions,
    ) -> Result<(Identifier, RawValue), QueryError>;
}
