//! Click actions attached by the builders and the ports they are dispatched to.

use log::debug;
use vote_core::{PanelState, PanelStates, VoteId};

/// What a control does when clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Toggle the vote panel of a card.
    Show(VoteId),
    /// Record the user's current selection for a vote.
    SubmitPick(VoteId),
    /// Toggle the bookmark identified by the control's element id.
    ClickBookmark(String),
    /// Produce a shareable link for a vote.
    SendLink(VoteId),
    Navigate(String),
}

impl Action {
    /// Short `kind:target` form, used for the `data-action` HTML attribute.
    pub fn describe(&self) -> String {
        match self {
            Action::Show(id) => format!("show:{id}"),
            Action::SubmitPick(id) => format!("submit_pick:{id}"),
            Action::ClickBookmark(element_id) => format!("click_bookmark:{element_id}"),
            Action::SendLink(id) => format!("send_link:{id}"),
            Action::Navigate(path) => format!("navigate:{path}"),
        }
    }
}

pub fn participants_path(vote_id: &VoteId) -> String {
    format!("{vote_id}/participants")
}

pub fn detail_path(vote_id: &VoteId) -> String {
    format!("{vote_id}/detail")
}

/// Collaborators that carry out card actions. Failures are theirs to handle.
pub trait TimelineActions {
    /// Called after the card's panel state flipped to `state`.
    fn show(&self, vote_id: &VoteId, state: PanelState);
    fn submit_pick(&self, vote_id: &VoteId);
    fn click_bookmark(&self, element_id: &str);
    fn send_link(&self, vote_id: &VoteId);
}

/// Moves the page to another path.
pub trait Navigator {
    fn navigate(&self, path: &str);
}

impl<T: TimelineActions + ?Sized> TimelineActions for &T {
    fn show(&self, vote_id: &VoteId, state: PanelState) {
        (**self).show(vote_id, state)
    }

    fn submit_pick(&self, vote_id: &VoteId) {
        (**self).submit_pick(vote_id)
    }

    fn click_bookmark(&self, element_id: &str) {
        (**self).click_bookmark(element_id)
    }

    fn send_link(&self, vote_id: &VoteId) {
        (**self).send_link(vote_id)
    }
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn navigate(&self, path: &str) {
        (**self).navigate(path)
    }
}

/// Routes one action to its collaborator. `Show` flips the card's panel
/// state first and hands the new state to `show`.
pub fn dispatch<A, N>(action: &Action, panels: &mut PanelStates, actions: &A, navigator: &N)
where
    A: TimelineActions + ?Sized,
    N: Navigator + ?Sized,
{
    debug!("dispatching {}", action.describe());
    match action {
        Action::Show(vote_id) => {
            let state = panels.toggle(vote_id);
            actions.show(vote_id, state);
        }
        Action::SubmitPick(vote_id) => actions.submit_pick(vote_id),
        Action::ClickBookmark(element_id) => actions.click_bookmark(element_id),
        Action::SendLink(vote_id) => actions.send_link(vote_id),
        Action::Navigate(path) => navigator.navigate(path),
    }
}

/// Owns the page's panel states together with the injected ports.
pub struct Dispatcher<A, N> {
    actions: A,
    navigator: N,
    panels: PanelStates,
}

impl<A: TimelineActions, N: Navigator> Dispatcher<A, N> {
    pub fn new(actions: A, navigator: N) -> Self {
        Self {
            actions,
            navigator,
            panels: PanelStates::default(),
        }
    }

    pub fn panels(&self) -> &PanelStates {
        &self.panels
    }

    pub fn dispatch(&mut self, action: &Action) {
        dispatch(action, &mut self.panels, &self.actions, &self.navigator);
    }

    /// Simulates a click on the element with `element_id` inside `fragment`.
    /// Returns `false` when the element is missing or has no handler.
    pub fn click(&mut self, fragment: &crate::FragmentNode, element_id: &str) -> bool {
        match fragment.handler_for(element_id) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => {
                debug!("click on {element_id} has no handler");
                false
            }
        }
    }

    pub fn into_parts(self) -> (A, N, PanelStates) {
        (self.actions, self.navigator, self.panels)
    }
}
