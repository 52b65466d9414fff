//! EDNS Client-Subnet rewriting (RFC 7871).
//!
//! Every forwarded query leaves with exactly one Client-Subnet option. The
//! option either comes from the caller (when the policy allows keeping it) or
//! carries the configured anchor prefix for the caller's address family.

use hickory_proto::op::{Edns, Message};
use hickory_proto::rr::rdata::opt::{ClientSubnet, EdnsCode, EdnsOption};
use tracing::trace;
use zns_application::ports::{NormalizedQuery, QueryNormalizer};
use zns_domain::{DomainError, EcsConfig, EcsPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcsOutcome {
    /// The caller's non-empty option was kept.
    Preserved,
    /// No option was present; the anchor was added.
    Injected,
    /// Existing options were dropped in favour of the anchor.
    Replaced,
}

pub struct EcsNormalizer {
    config: EcsConfig,
}

impl EcsNormalizer {
    pub fn new(config: EcsConfig) -> Self {
        Self { config }
    }

    /// Rewrites the message's Client-Subnet options in place, creating the OPT record if needed.
    pub fn apply_policy(&self, message: &mut Message, client_is_ipv6: bool) -> EcsOutcome {
        let edns = message.extensions_mut().get_or_insert_with(Edns::new);
        let had_subnet = edns.option(EdnsCode::Subnet).is_some();

        if self.config.policy == EcsPolicy::Preserve {
            let options: &mut Vec<(EdnsCode, EdnsOption)> = edns.options_mut().as_mut();
            let mut kept = false;
            options.retain(|(code, option)| {
                if *code != EdnsCode::Subnet {
                    return true;
                }
                let keep = !kept && matches!(option, EdnsOption::Subnet(s) if s.source_prefix() > 0);
                kept |= keep;
                keep
            });
            if kept {
                return EcsOutcome::Preserved;
            }
        }

        let (anchor, prefix) = self.config.anchor_for(client_is_ipv6);
        let options = edns.options_mut();
        options.remove(EdnsCode::Subnet);
        options.insert(EdnsOption::Subnet(ClientSubnet::new(anchor, prefix, 0)));

        if had_subnet {
            EcsOutcome::Replaced
        } else {
            EcsOutcome::Injected
        }
    }
}

impl QueryNormalizer for EcsNormalizer {
    fn normalize(&self, wire: &[u8], client_is_ipv6: bool) -> Result<NormalizedQuery, DomainError> {
        let mut message =
            Message::from_vec(wire).map_err(|e| DomainError::DecodeError(e.to_string()))?;

        let outcome = self.apply_policy(&mut message, client_is_ipv6);
        let question_name = message.queries().first().map(|q| q.name().to_ascii());

        let wire = message
            .to_vec()
            .map_err(|e| DomainError::EncodeError(e.to_string()))?;
        ensure_complete(&message, &wire)?;

        trace!(?outcome, len = wire.len(), "Client-Subnet normalized");

        Ok(NormalizedQuery {
            wire,
            question_name,
        })
    }
}

/// The encoder drops records that overflow 65 535 bytes and sets TC instead
/// of failing, which would lose the OPT record. Section counts in the
/// written header must match what the message holds.
fn ensure_complete(message: &Message, wire: &[u8]) -> Result<(), DomainError> {
    let count_at = |offset: usize| {
        wire.get(offset..offset + 2)
            .map_or(0, |b| usize::from(u16::from_be_bytes([b[0], b[1]])))
    };
    let truncated_now = wire.get(2).is_some_and(|flags| flags & 0x02 != 0);

    let complete = count_at(6) == message.answers().len()
        && count_at(8) == message.name_servers().len()
        && count_at(10) == message.additionals().len() + usize::from(message.extensions().is_some())
        && (message.truncated() || !truncated_now);

    if complete {
        Ok(())
    } else {
        Err(DomainError::EncodeError(
            "message exceeds 65535 bytes after Client-Subnet rewrite".to_string(),
        ))
    }
}
