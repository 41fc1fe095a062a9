//! Entry point the editor calls when the user asks to follow a reference.
//!
//! Hosts register handlers with [`Navigator::on_navigation_requested`]; a
//! handler that returns `true` consumes the request. Unconsumed requests go
//! through symbol resolution or link following and end in the
//! [`NavigationController`].

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    backend::PathResolver,
    document, links,
    navigation::{EditorHost, JumpOutcome, NavigationController, NavigationTarget, TextPosition},
    resolver::ReferenceResolver,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    /// Go to the declaration of `name`, referenced at `position` in `origin_path`.
    Symbol {
        name: String,
        origin_path: String,
        position: TextPosition,
    },
    /// Open the file a quoted path inside `origin_path` points at.
    Link {
        reference: String,
        origin_path: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Applied(NavigationTarget),
    Deferred(NavigationTarget),
    /// A registered handler took the request.
    Intercepted,
    /// Nothing happened; the host should fall back to its default behaviour.
    Unresolved,
}

type NavigationHandler = Box<dyn FnMut(&NavigationRequest) -> bool + Send>;

pub struct Navigator<H> {
    resolver: ReferenceResolver,
    path_resolver: Arc<dyn PathResolver>,
    controller: NavigationController<H>,
    handlers: Vec<NavigationHandler>,
}

impl<H: EditorHost> Navigator<H> {
    pub fn new(
        resolver: ReferenceResolver,
        path_resolver: Arc<dyn PathResolver>,
        controller: NavigationController<H>,
    ) -> Self {
        Self {
            resolver,
            path_resolver,
            controller,
            handlers: Vec::new(),
        }
    }

    pub fn resolver(&self) -> &ReferenceResolver {
        &self.resolver
    }

    pub fn controller(&self) -> &NavigationController<H> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut NavigationController<H> {
        &mut self.controller
    }

    /// Register a handler consulted, in registration order, before the
    /// built-in handling.
    pub fn on_navigation_requested(
        &mut self,
        handler: impl FnMut(&NavigationRequest) -> bool + Send + 'static,
    ) {
        self.handlers.push(Box::new(handler));
    }

    /// Hand over content the host already loaded (e.g. a file opened from the
    /// explorer) so navigation into it needs no backend read.
    pub fn document_opened(
        &self,
        path: &str,
        content: String,
    ) {
        self.resolver.documents().register(path, content);
    }

    /// Forward a host active-document change to the controller.
    pub fn active_document_changed(
        &mut self,
        path: &str,
    ) -> bool {
        self.controller.on_active_document_changed(path)
    }

    pub async fn navigate(
        &mut self,
        request: NavigationRequest,
    ) -> NavigationOutcome {
        if self.handlers.iter_mut().any(|handler| handler(&request)) {
            debug!("[navigator] request intercepted: {request:?}");
            return NavigationOutcome::Intercepted;
        }

        let target = match &request {
            NavigationRequest::Symbol {
                name,
                origin_path,
                position,
            } => self.resolver.resolve(name, origin_path, *position).await,
            NavigationRequest::Link {
                reference,
                origin_path,
            } => self.follow_link(reference, origin_path).await,
        };

        let Some(target) = target else {
            return NavigationOutcome::Unresolved;
        };
        match self.controller.request_jump(&target) {
            JumpOutcome::Applied => NavigationOutcome::Applied(target),
            JumpOutcome::Deferred => NavigationOutcome::Deferred(target),
        }
    }

    /// Go-to-definition from a cursor position in the host's live buffer:
    /// a quoted path under the cursor is followed as a link, otherwise the
    /// identifier under it is resolved as a symbol. `line_text` is the
    /// current text of `position.line`.
    pub async fn goto_definition_in_line(
        &mut self,
        origin_path: &str,
        line_text: &str,
        position: TextPosition,
    ) -> NavigationOutcome {
        let request = if let Some(link) = links::link_at(line_text, position.line, position.column) {
            NavigationRequest::Link {
                reference: link.reference,
                origin_path: origin_path.to_string(),
            }
        } else if let Some((word, _)) = document::word_at(line_text, position) {
            NavigationRequest::Symbol {
                name: word,
                origin_path: origin_path.to_string(),
                position,
            }
        } else {
            return NavigationOutcome::Unresolved;
        };

        self.navigate(request).await
    }

    /// Like [`goto_definition_in_line`](Self::goto_definition_in_line), for
    /// hosts without a live buffer: the line is read from the document
    /// cache, loading `origin_path` if needed.
    pub async fn goto_definition_at(
        &mut self,
        origin_path: &str,
        position: TextPosition,
    ) -> NavigationOutcome {
        let documents = Arc::clone(self.resolver.documents());
        let model = match documents.ensure(origin_path).await {
            Ok(model) => model,
            Err(error) => {
                warn!("[navigator] {error}");
                return NavigationOutcome::Unresolved;
            },
        };
        let Some(line_text) = model.line_text(position.line) else {
            return NavigationOutcome::Unresolved;
        };

        self.goto_definition_in_line(origin_path, line_text, position).await
    }

    async fn follow_link(
        &self,
        reference: &str,
        origin_path: &str,
    ) -> Option<NavigationTarget> {
        let path = match self.path_resolver.resolve_path(origin_path, reference).await {
            Ok(path) => path,
            Err(error) => {
                warn!("[navigator] failed to resolve link {reference:?}: {error}");
                return None;
            },
        };
        if let Err(error) = self.resolver.documents().ensure(&path).await {
            warn!("[navigator] {error}");
            return None;
        }
        Some(NavigationTarget::file_start(path))
    }
}

#[cfg(test)]
#[path = "../tests/src/navigator_tests.rs"]
mod tests;
