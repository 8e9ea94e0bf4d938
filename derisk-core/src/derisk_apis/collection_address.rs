use field_blockchain_data::Log;

use crate::error::UnresolvedAddress;

/// Payload of the settlement log emitted by the collection contract.
pub const EMPTY_PAYLOAD: &str = "0x";

/// Finds the collection contract among the receipt logs: the emitter of the log whose data is
/// empty. Repeats from the same contract (in any casing) resolve to the first spelling seen;
/// empty-payload logs from different contracts are reported as ambiguous.
pub fn resolve_collection_address(logs: &[Log]) -> Result<String, UnresolvedAddress> {
    let mut candidates: Vec<String> = Vec::new();

    for log in logs.iter().filter(|log| log.data == EMPTY_PAYLOAD) {
        let seen = candidates
            .iter()
            .any(|address| address.eq_ignore_ascii_case(&log.address));
        if !seen {
            candidates.push(log.address.clone());
        }
    }

    match candidates.len() {
        0 => Err(UnresolvedAddress::NoCandidate),
        1 => Ok(candidates.remove(0)),
        _ => Err(UnresolvedAddress::Ambiguous { candidates }),
    }
}
