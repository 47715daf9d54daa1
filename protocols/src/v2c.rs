//! Community-based (v2c) adapter for [`SnmpClient`].
//!
//! Every attempt opens its own session (and UDP socket) inside the timed
//! future, so an attempt that times out drops its socket before the next one
//! starts and nothing outlives the call.

use std::net::{Ipv4Addr, SocketAddr};

use async_trait::async_trait;
use snmp2::AsyncSession;
use tmd_common::config::QueryOptions;
use tmd_common::snmp::{Identifier, QueryError, QueryResult, RawValue};
use tracing::trace;

use crate::client::SnmpClient;
use crate::decode;

#[derive(Debug, Clone, Copy)]
enum Request {
    Get,
    GetNext,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct V2cClient;

impl V2cClient {
    pub fn new() -> Self {
        Self
    }

    async fn exchange(
        &self,
        host: Ipv4Addr,
        oid: &Identifier,
        opts: &QueryOptions,
        request: Request,
    ) -> Result<(Identifier, RawValue), QueryError> {
        let attempts = opts.attempts();

        for attempt in 1..=attempts {
            let reply = single_attempt(host, oid, opts, request);
            match tokio::time::timeout(opts.timeout, reply).await {
                Ok(result) => return result,
                Err(_elapsed) => {
                    trace!(%host, %oid, attempt, attempts, "no reply within timeout");
                }
            }
        }

        Err(QueryError::Timeout { attempts })
    }
}

#[async_trait]
impl SnmpClient for V2cClient {
    async fn get(&self, host: Ipv4Addr, oid: &Identifier, opts: &QueryOptions) -> QueryResult {
        self.exchange(host, oid, opts, Request::Get)
            .await
            .map(|(_, value)| value)
    }

    async fn get_next(
        &self,
        host: Ipv4Addr,
        oid: &Identifier,
        opts: &QueryOptions,
    ) -> Result<(Identifier, RawValue), QueryError> {
        self.exchange(host, oid, opts, Request::GetNext).await
    }
}

async fn single_attempt(
    host: Ipv4Addr,
    oid: &Identifier,
    opts: &QueryOptions,
    request: Request,
) -> Result<(Identifier, RawValue), QueryError> {
    let wire_oid = decode::to_wire_oid(oid)?;
    let target = SocketAddr::from((host, opts.port));
    let req_id: i32 = rand::random_range(1..i32::MAX);

    let mut session = AsyncSession::new_v2c(target, opts.community.as_bytes(), req_id).await?;

    let response = match request {
        Request::Get => session.get(&wire_oid).await,
        Request::GetNext => session.getnext(&wire_oid).await,
    };
    let pdu = response.map_err(|e| QueryError::Protocol {
        reason: e.to_string(),
    })?;

    if pdu.error_status != 0 {
        let (status, index) = (pdu.error_status, pdu.error_index);
        return Err(QueryError::Protocol {
            reason: format!("error-status {status} at index {index}"),
        });
    }

    let (name, value) = pdu
        .varbinds
        .into_iter()
        .next()
        .ok_or_else(|| QueryError::Protocol {
            reason: "empty response".to_string(),
        })?;

    let identifier = decode::from_wire_oid(&name)?;
    let raw = decode::raw_value(value)?;
    Ok((identifier, raw))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
