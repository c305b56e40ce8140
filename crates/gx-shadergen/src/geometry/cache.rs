use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error};

use crate::shader_code::{ApiType, ShaderBuffer, ShaderCode};
use crate::state::{BackendInfo, PrimitiveType, VideoConfig, XfState};

use super::{
    generate_geometry_shader_code, get_geometry_shader_uid, GeometryShaderError, GeometryShaderUid,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderCacheLookupSource {
    /// The uid was already present in the cache.
    Memory,
    /// The generator ran and the text was inserted into the cache.
    Generated,
}

#[derive(Debug, Clone)]
pub struct GeometryShaderLookup {
    pub source: ShaderCacheLookupSource,
    pub uid: GeometryShaderUid,
    pub code: Arc<str>,
}

/// Geometry shader sources keyed by [`GeometryShaderUid`].
///
/// Uids only identify a variant within one backend, so the cache is bound to an [`ApiType`] and
/// drops every entry when the backend capabilities in the config change.
pub struct GeometryShaderCache {
    api: ApiType,
    backend: Option<BackendInfo>,
    shaders: HashMap<GeometryShaderUid, Arc<str>>,
    buffer: ShaderBuffer,
    uid_checks: bool,
    hits: u64,
    misses: u64,
}

impl GeometryShaderCache {
    pub fn new(api: ApiType) -> Self {
        Self {
            api,
            backend: None,
            shaders: HashMap::new(),
            buffer: ShaderBuffer::new(),
            uid_checks: false,
            hits: 0,
            misses: 0,
        }
    }

    pub fn api(&self) -> ApiType {
        self.api
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.shaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shaders.is_empty()
    }

    pub fn clear(&mut self) {
        self.shaders.clear();
    }

    /// When enabled, cache hits regenerate the source and compare it with the cached text.
    ///
    /// This is a debugging aid for generator changes; it costs a full generation per draw.
    pub fn set_uid_checks(&mut self, enabled: bool) {
        self.uid_checks = enabled;
    }

    pub fn get_or_generate(
        &mut self,
        primitive: PrimitiveType,
        xf: &XfState,
        config: &VideoConfig,
    ) -> Result<GeometryShaderLookup, GeometryShaderError> {
        if self.backend != Some(config.backend_info) {
            if self.backend.is_some() {
                debug!(
                    entries = self.shaders.len(),
                    "backend capabilities changed, dropping geometry shaders"
                );
            }
            self.shaders.clear();
            self.backend = Some(config.backend_info);
        }

        let uid = get_geometry_shader_uid(primitive, self.api, xf, config);

        match self.shaders.entry(uid) {
            Entry::Occupied(e) => {
                self.hits += 1;
                let cached = Arc::clone(e.get());

                if self.uid_checks {
                    let mut code = ShaderCode::new(&mut self.buffer);
                    generate_geometry_shader_code(&mut code, primitive, self.api, xf, config)?;
                    if code.as_str() != &*cached {
                        error!(%uid, "geometry shader uid mismatch");
                        return Err(GeometryShaderError::UidMismatch { uid });
                    }
                }

                Ok(GeometryShaderLookup {
                    source: ShaderCacheLookupSource::Memory,
                    uid,
                    code: cached,
                })
            }
            Entry::Vacant(e) => {
                self.misses += 1;
                let mut code = ShaderCode::new(&mut self.buffer);
                generate_geometry_shader_code(&mut code, primitive, self.api, xf, config)?;
                debug!(%uid, "geometry shader cache miss");

                let text: Arc<str> = Arc::from(code.as_str());
                e.insert(Arc::clone(&text));
                Ok(GeometryShaderLookup {
                    source: ShaderCacheLookupSource::Generated,
                    uid,
                    code: text,
                })
            }
        }
    }
}
