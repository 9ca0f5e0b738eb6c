//! Resolve font names through the directory cache and open them

use std::path::Path;
use tracing::{debug, info};

use super::cache::FontDirectoryCache;
use crate::error::{ShellError, ShellResult};
use crate::handle::{FontHandle, Handle};
use crate::platform::Platform;

/// Opens fonts by file name, rescanning the cache at most once per miss
pub struct FontLoader<'p, P: Platform> {
    platform: &'p P,
    cache: FontDirectoryCache,
}

impl<'p, P: Platform> FontLoader<'p, P> {
    pub fn new(platform: &'p P, cache: FontDirectoryCache) -> Self {
        Self { platform, cache }
    }

    /// Load `name` at `point_size`.
    ///
    /// A cache miss triggers exactly one rebuild followed by one more lookup;
    /// a second miss is `FontNotFound`. Open failures (corrupt or deleted file)
    /// are reported as `FontOpen` without retrying.
    pub fn load(&mut self, name: &str, point_size: f32) -> ShellResult<FontHandle<'p, P>> {
        let cached = self.cache.lookup(name).map(Path::to_path_buf);
        let path = match cached {
            Some(path) => path,
            None => {
                debug!(font = name, "Font not cached, rescanning font directories");
                self.cache.rebuild();
                self.cache
                    .lookup(name)
                    .ok_or_else(|| ShellError::FontNotFound {
                        name: name.to_string(),
                    })?
                    .to_path_buf()
            }
        };

        debug!(font = name, path = %path.display(), size = point_size, "Opening font");
        let raw = self
            .platform
            .open_font(&path, point_size)
            .map_err(|source| ShellError::FontOpen {
                name: name.to_string(),
                path: path.clone(),
                source,
            })?;

        info!(font = name, path = %path.display(), size = point_size, "Loaded font");
        Ok(Handle::new(self.platform, raw))
    }

    /// Names of every font currently cached
    pub fn available_fonts(&self) -> Vec<String> {
        self.cache.available_fonts()
    }

    pub fn cache(&self) -> &FontDirectoryCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut FontDirectoryCache {
        &mut self.cache
    }
}
