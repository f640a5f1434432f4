use log::debug;
use vote_core::VoteResults;

use crate::content::{result_class, result_slot_id};
use crate::fragment::{Element, FragmentNode};

/// Writes live pick percentages into the result slots of a rendered card or
/// timeline. Only slots tagged with the vote's result class are touched, so
/// cards sharing option ids keep their own numbers. Returns how many slots
/// were filled.
pub fn apply_results(fragment: &mut FragmentNode, results: &VoteResults) -> usize {
    let class = result_class(&results.vote_id);
    let mut filled = 0;
    for (option_id, percent) in results.percentages() {
        let slot_id = result_slot_id(&option_id);
        let slot = fragment.find_mut(&|element: &Element| {
            element.id.as_deref() == Some(slot_id.as_str()) && element.has_class(&class)
        });
        match slot {
            Some(slot) => {
                slot.set_text(format!("{percent}%"));
                filled += 1;
            }
            None => debug!(
                "no result slot for option {option_id} of vote {}",
                results.vote_id
            ),
        }
    }
    filled
}
