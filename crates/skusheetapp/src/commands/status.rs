use super::helpers::{display_rows, plural, selected_ids};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::index::RowSelector;
use crate::model::CheckStatus;
use crate::store::{RowStore, StorageBackend};

pub fn run<B: StorageBackend>(
    store: &mut RowStore<B>,
    selectors: &[RowSelector],
    status: CheckStatus,
) -> Result<CmdResult> {
    let ids = selected_ids(store, selectors)?;
    let changed = store.set_status(&ids, status)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Marked {} as {}",
        plural(changed, "row"),
        status.label()
    )));
    Ok(result.with_affected_rows(display_rows(store, &ids)))
}

pub fn verify<B: StorageBackend>(
    store: &mut RowStore<B>,
    selectors: &[RowSelector],
) -> Result<CmdResult> {
    run(store, selectors, CheckStatus::Verified)
}

pub fn unverify<B: StorageBackend>(
    store: &mut RowStore<B>,
    selectors: &[RowSelector],
) -> Result<CmdResult> {
    run(store, selectors, CheckStatus::Unverified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::parse_selectors;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn verify_then_unverify() {
        let mut store = StoreFixture::new().with_products(&["A", "B", "C"]).store;
        verify(&mut store, &parse_selectors(&["1-2"]).unwrap()).unwrap();
        let flags: Vec<_> = store.as_slice().iter().map(|r| r.is_verified()).collect();
        assert_eq!(flags, vec![true, true, false]);

        let result = unverify(&mut store, &parse_selectors(&["2"]).unwrap()).unwrap();
        assert!(!store.as_slice()[1].is_verified());
        assert_eq!(result.affected_rows[0].position, 2);
    }
}
