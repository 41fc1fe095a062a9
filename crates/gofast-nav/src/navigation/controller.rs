//! Deferred cursor placement across document switches.
//!
//! Switching the active document is asynchronous on the host side, so a jump
//! into another file cannot place the cursor right away. The controller
//! parks the jump in a single slot and applies it when the host reports that
//! the matching document became active.

use tracing::debug;

use crate::{
    navigation::types::{NavigationTarget, PendingJump, TextRange},
    paths,
};

/// Side effects the controller needs from the editor widget.
pub trait EditorHost {
    /// Ask the host to load and activate `path`. Completion is reported
    /// later through [`NavigationController::on_active_document_changed`].
    fn open_document(
        &mut self,
        path: &str,
    );

    fn reveal_range(
        &mut self,
        range: TextRange,
    );

    fn set_selection(
        &mut self,
        range: TextRange,
    );

    fn focus(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    AwaitingSwitch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpOutcome {
    /// The target was in the active document; the cursor moved already.
    Applied,
    /// A document switch was requested; the cursor moves once it lands.
    Deferred,
}

pub struct NavigationController<H> {
    host: H,
    active_path: Option<String>,
    pending: Option<PendingJump>,
}

impl<H: EditorHost> NavigationController<H> {
    pub fn new(
        host: H,
        active_path: Option<String>,
    ) -> Self {
        Self {
            host,
            active_path,
            pending: None,
        }
    }

    pub fn state(&self) -> ControllerState {
        if self.pending.is_some() {
            ControllerState::AwaitingSwitch
        } else {
            ControllerState::Idle
        }
    }

    pub fn pending(&self) -> Option<&PendingJump> {
        self.pending.as_ref()
    }

    pub fn active_path(&self) -> Option<&str> {
        self.active_path.as_deref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Jump to `target`, now or after the host switches documents.
    ///
    /// Any jump still waiting from an earlier request is dropped.
    pub fn request_jump(
        &mut self,
        target: &NavigationTarget,
    ) -> JumpOutcome {
        let selection = target.selection();

        if self.active_path.as_deref().is_some_and(|active| paths::same_location(active, &target.path)) {
            if let Some(stale) = self.pending.take() {
                debug!("[navigation] dropping pending jump into {}", stale.path);
            }
            self.apply(selection);
            return JumpOutcome::Applied;
        }

        if let Some(stale) = self.pending.replace(PendingJump {
            path: target.path.clone(),
            selection,
        }) {
            debug!("[navigation] superseding pending jump into {}", stale.path);
        }
        debug!("[navigation] awaiting switch to {}", target.path);
        self.host.open_document(&target.path);
        JumpOutcome::Deferred
    }

    /// Record a change of the host's active document, whatever caused it.
    ///
    /// Returns `true` if this completed the pending jump.
    pub fn on_active_document_changed(
        &mut self,
        new_path: &str,
    ) -> bool {
        self.active_path = Some(new_path.to_string());

        let matches = self.pending.as_ref().is_some_and(|pending| paths::same_location(&pending.path, new_path));
        if !matches {
            return false;
        }

        match self.pending.take() {
            Some(pending) => {
                debug!("[navigation] switch to {new_path} landed, applying pending jump");
                self.apply(pending.selection);
                true
            },
            None => false,
        }
    }

    fn apply(
        &mut self,
        selection: TextRange,
    ) {
        self.host.reveal_range(selection);
        self.host.set_selection(selection);
        self.host.focus();
    }
}

#[cfg(test)]
#[path = "../../tests/src/navigation/controller_tests.rs"]
mod tests;
