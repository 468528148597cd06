use booru_common::{Booru, BooruSelector};

/// Expands the user's imageboard selection into the list of backends to query, in order.
///
/// [`BooruSelector::All`] always yields every backend in the order of [`Booru::ALL`].
#[must_use]
pub fn dispatch(selector: BooruSelector) -> Vec<Booru> {
    selector
        .single()
        .map_or_else(|| Booru::ALL.to_vec(), |booru| vec![booru])
}
