use std::collections::HashMap;

use super::api::RenderApi;
use super::backend::Backend;

/// One [`Backend`] per API tag, registered once and looked up by the context.
#[derive(Default)]
pub struct BackendRegistry {
    backends: HashMap<RenderApi, Box<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backend` for `api`, replacing any previous one.
    ///
    /// `RenderApi::None` cannot carry a backend; the call is refused.
    pub fn register(&mut self, api: RenderApi, backend: Box<dyn Backend>) -> bool {
        if api == RenderApi::None {
            log::warn!("refusing to register backend '{}' for RenderApi::None", backend.name());
            return false;
        }
        log::debug!("registered backend '{}' for {api}", backend.name());
        self.backends.insert(api, backend);
        true
    }

    pub fn with(mut self, api: RenderApi, backend: Box<dyn Backend>) -> Self {
        self.register(api, backend);
        self
    }

    pub fn get(&self, api: RenderApi) -> Option<&dyn Backend> {
        self.backends.get(&api).map(|b| b.as_ref())
    }

    pub fn contains(&self, api: RenderApi) -> bool {
        self.backends.contains_key(&api)
    }
}

impl std::fmt::Debug for BackendRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.backends.keys()).finish()
    }
}
