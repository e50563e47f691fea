use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::account::AccountId;

pub type AccountSlot = Arc<Mutex<()>>;

/// One mutex per account id, serializing every transfer touching that account.
///
/// Slots are never evicted.
#[derive(Default)]
pub struct AccountLocks {
    slots: Mutex<HashMap<AccountId, AccountSlot>>,
}

impl AccountLocks {
    /// Slots for the distinct `ids`, ascending by id.
    ///
    /// Callers lock them in the returned order, which keeps two transfers
    /// over the same pair of accounts from deadlocking.
    pub fn acquire(&self, ids: &[AccountId]) -> Vec<AccountSlot> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        let mut slots = self.slots.lock();
        ids.into_iter()
            .map(|id| slots.entry(id).or_default().clone())
            .collect()
    }
}
