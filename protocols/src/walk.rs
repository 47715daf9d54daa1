//! # Subtree Walk
//!
//! Successive get-next queries starting at a prefix. The cursor is lazy (one
//! query per row pulled), always finite, and not restartable: walking the
//! same prefix again means building a new [`Walk`].

use std::net::Ipv4Addr;

use tmd_common::config::QueryOptions;
use tmd_common::snmp::{Identifier, QueryError, RawValue};
use tracing::{debug, trace};

use crate::client::SnmpClient;

/// Why a walk stopped producing rows.
#[derive(Debug)]
pub enum WalkEnd {
    /// The agent answered with an identifier outside the prefix.
    LeftSubtree,
    /// The agent has nothing after the last identifier.
    EndOfMibView,
    /// The agent answered with an identifier not after the previous one.
    NotIncreasing,
    /// `max_rows` rows were produced.
    RowLimit,
    Failed(QueryError),
}

impl WalkEnd {
    pub fn is_failure(&self) -> bool {
        matches!(self, WalkEnd::Failed(_) | WalkEnd::NotIncreasing)
    }
}

pub struct Walk<'a> {
    client: &'a dyn SnmpClient,
    host: Ipv4Addr,
    prefix: Identifier,
    cursor: Identifier,
    opts: &'a QueryOptions,
    remaining: usize,
    end: Option<WalkEnd>,
}

impl<'a> Walk<'a> {
    pub fn new(
        client: &'a dyn SnmpClient,
        host: Ipv4Addr,
        prefix: Identifier,
        opts: &'a QueryOptions,
        max_rows: usize,
    ) -> Self {
        Self {
            client,
            host,
            cursor: prefix.clone(),
            prefix,
            opts,
            remaining: max_rows,
            end: None,
        }
    }

    /// Pulls the next row, or `None` once the walk has ended.
    pub async fn next_row(&mut self) -> Option<(Identifier, RawValue)> {
        if self.end.is_some() {
            return None;
        }

        if self.remaining == 0 {
            return self.finish(WalkEnd::RowLimit);
        }

        let (oid, value) = match self.client.get_next(self.host, &self.cursor, self.opts).await {
            Ok(row) => row,
            Err(QueryError::EndOfMibView) => return self.finish(WalkEnd::EndOfMibView),
            Err(e) => return self.finish(WalkEnd::Failed(e)),
        };

        if !oid.starts_with(&self.prefix) || oid == self.prefix {
            return self.finish(WalkEnd::LeftSubtree);
        }

        if oid <= self.cursor {
            return self.finish(WalkEnd::NotIncreasing);
        }

        trace!(host = %self.host, %oid, "walk row");
        self.remaining -= 1;
        self.cursor = oid.clone();
        Some((oid, value))
    }

    pub fn end(&self) -> Option<&WalkEnd> {
        self.end.as_ref()
    }

    fn finish(&mut self, end: WalkEnd) -> Option<(Identifier, RawValue)> {
        debug!(host = %self.host, prefix = %self.prefix, reason = ?end, "walk finished");
        self.end = Some(end);
        None
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use tmd_common::snmp::QueryResult;

    const HOST: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 1);

    /// Answers get-next from a sorted map, like a well behaved agent.
    struct TreeAgent(BTreeMap<Identifier, RawValue>);

    impl TreeAgent {
        fn new(rows: &[(&str, RawValue)]) -> Self {
            Self(
                rows.iter()
                    .map(|(oid, value)| (oid.parse().unwrap(), value.clone()))
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl SnmpClient for TreeAgent {
        async fn get(&self, _: Ipv4Addr, oid: &Identifier, _: &QueryOptions) -> QueryResult {
            self.0.get(oid).cloned().ok_or(QueryError::Protocol {
                reason: "noSuchObject".into(),
            })
        }

        async fn get_next(
            &self,
            _: Ipv4Addr,
            oid: &Identifier,
            _: &QueryOptions,
        ) -> Result<(Identifier, RawValue), QueryError> {
            self.0
                .range(oid.clone()..)
                .find(|(key, _)| *key > oid)
                .map(|(key, value)| (key.clone(), value.clone()))
                .ok_or(QueryError::EndOfMibView)
        }
    }

    /// Keeps answering with the same identifier.
    struct StuckAgent;

    #[async_trait]
    impl SnmpClient for StuckAgent {
        async fn get(&self, _: Ipv4Addr, _: &Identifier, _: &QueryOptions) -> QueryResult {
            Ok(RawValue::Integer(1))
        }

        async fn get_next(
            &self,
            _: Ipv4Addr,
            _: &Identifier,
            _: &QueryOptions,
        ) -> Result<(Identifier, RawValue), QueryError> {
            let same: Identifier = "1.3.6.1.2.1.2.2.1.2.1".parse().unwrap();
            Ok((same, RawValue::Integer(1)))
        }
    }

    fn agent() -> TreeAgent {
        TreeAgent::new(&[
            ("1.3.6.1.2.1.1.5.0", RawValue::PlainString("sw1".into())),
            ("1.3.6.1.2.1.2.2.1.2.1", RawValue::PlainString("lo".into())),
            ("1.3.6.1.2.1.2.2.1.2.2", RawValue::PlainString("eth0".into())),
            ("1.3.6.1.2.1.2.2.1.8.1", RawValue::Integer(1)),
            ("1.3.6.1.2.1.2.2.1.8.2", RawValue::Integer(2)),
            ("1.3.6.1.2.1.4.1.0", RawValue::Integer(2)),
        ])
    }

    type Drained = (Vec<(Identifier, RawValue)>, Option<WalkEnd>);

    /// Pulls every row of a walk over `agent()` and returns how it ended.
    async fn drain(prefix: &str, max_rows: usize) -> Drained {
        let agent = agent();
        let opts = QueryOptions::default();
        let mut walk = Walk::new(&agent, HOST, prefix.parse().unwrap(), &opts, max_rows);

        let mut rows = Vec::new();
        while let Some(row) = walk.next_row().await {
            rows.push(row);
        }
        (rows, walk.end.take())
    }

    #[tokio::test]
    async fn walk_stays_inside_the_subtree() {
        let (rows, end) = drain("1.3.6.1.2.1.2.2.1", 100).await;

        assert_eq!(rows.len(), 4);
        assert!(matches!(end, Some(WalkEnd::LeftSubtree)));
        assert_eq!(rows[0].0.to_string(), "1.3.6.1.2.1.2.2.1.2.1");
        assert_eq!(rows[3].1, RawValue::Integer(2));
    }

    #[tokio::test]
    async fn walk_stops_at_end_of_mib() {
        let (rows, end) = drain("1.3.6.1.2.1.4", 100).await;

        assert_eq!(rows.len(), 1);
        assert!(matches!(end, Some(WalkEnd::EndOfMibView)));
    }

    #[tokio::test]
    async fn walk_is_cut_at_row_limit() {
        let (rows, end) = drain("1.3.6.1.2.1.2.2.1", 3).await;

        assert_eq!(rows.len(), 3);
        assert!(matches!(end, Some(WalkEnd::RowLimit)));
    }

    #[tokio::test]
    async fn non_increasing_agent_cannot_loop_forever() {
        let opts = QueryOptions::default();
        let prefix: Identifier = "1.3.6.1.2.1.2.2.1".parse().unwrap();
        let mut walk = Walk::new(&StuckAgent, HOST, prefix, &opts, 1_000);

        assert!(walk.next_row().await.is_some());
        assert!(walk.next_row().await.is_none());
        assert!(matches!(walk.end(), Some(WalkEnd::NotIncreasing)));
        assert!(walk.next_row().await.is_none());
    }
}
