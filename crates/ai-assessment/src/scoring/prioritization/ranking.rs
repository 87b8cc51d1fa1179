use std::cmp::Ordering;

use crate::assessment::report::PrioritizedItem;

/// Value descending, effort ascending, then name and id so equal scores never tie.
pub(crate) fn compare(a: &PrioritizedItem, b: &PrioritizedItem) -> Ordering {
    b.value_score
        .cmp(&a.value_score)
        .then_with(|| a.effort_score.cmp(&b.effort_score))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

pub(crate) fn rank(items: &mut [PrioritizedItem]) {
    items.sort_by(compare);
    for (position, item) in items.iter_mut().enumerate() {
        item.rank = position + 1;
    }
}
