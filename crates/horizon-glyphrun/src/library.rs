//! Process-wide font library lifecycle.
//!
//! The [`FontLibrary`] is created once, before any session, and handed the
//! configuration every session starts from. It is an explicit value rather
//! than a hidden global: the application owns it and decides when it goes
//! away. Sessions keep the library state alive, so teardown happens only
//! after the library handle and every session opened from it are dropped.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tracing::{debug, info};

use horizon_glyphrun_core::GlyphProvider;
use horizon_glyphrun_core::logging::targets;

use crate::config::LibraryConfig;
use crate::error::GlyphRunResult;
use crate::session::FontSession;
use crate::ttf::TtfProvider;

/// State shared by the library handle and its sessions.
#[derive(Debug)]
pub(crate) struct LibraryState {
    config: LibraryConfig,
    open_sessions: AtomicUsize,
}

impl LibraryState {
    pub(crate) fn config(&self) -> &LibraryConfig {
        &self.config
    }

    pub(crate) fn session_opened(&self) {
        self.open_sessions.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn session_closed(&self) {
        self.open_sessions.fetch_sub(1, Ordering::Relaxed);
    }
}

impl Drop for LibraryState {
    fn drop(&mut self) {
        debug!(target: targets::LIBRARY, "font library torn down");
    }
}

/// The font library: configuration plus the lifecycle every session hangs off.
///
/// # Example
///
/// ```no_run
/// use horizon_glyphrun::{FontLibrary, LibraryConfig};
///
/// let library = FontLibrary::init(LibraryConfig::default())?;
/// let mut session = library.open_face("DejaVuSans.ttf")?;
///
/// session.set_text("Hello", 0.0);
/// session.draw_glyphs_to_bitmap()?;
/// session.write_bitmap("hello.raw")?;
/// # Ok::<(), horizon_glyphrun::GlyphRunError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FontLibrary {
    state: Arc<LibraryState>,
}

impl FontLibrary {
    /// Initialize the library.
    ///
    /// # Errors
    ///
    /// Returns [`GlyphRunError::Config`](crate::GlyphRunError::Config) if the
    /// default size in `config` is not usable.
    pub fn init(config: LibraryConfig) -> GlyphRunResult<Self> {
        config.validate()?;
        info!(
            target: targets::LIBRARY,
            point_size = config.default_point_size,
            dpi = config.default_dpi,
            "initialized font library"
        );
        Ok(Self {
            state: Arc::new(LibraryState {
                config,
                open_sessions: AtomicUsize::new(0),
            }),
        })
    }

    /// The configuration sessions start from.
    pub fn config(&self) -> &LibraryConfig {
        self.state.config()
    }

    /// Number of sessions currently open from this library.
    pub fn open_sessions(&self) -> usize {
        self.state.open_sessions.load(Ordering::Relaxed)
    }

    /// Open a font file as a new rendering session.
    pub fn open_face(&self, path: impl AsRef<Path>) -> GlyphRunResult<FontSession<TtfProvider>> {
        let mut provider = TtfProvider::from_file(path, self.config().face_index)?;
        provider.configure(self.config());
        self.open_with_provider(provider)
    }

    /// Open font bytes held in memory as a new rendering session.
    pub fn open_bytes(&self, data: Vec<u8>) -> GlyphRunResult<FontSession<TtfProvider>> {
        let mut provider = TtfProvider::from_bytes(data, self.config().face_index)?;
        provider.configure(self.config());
        self.open_with_provider(provider)
    }

    /// Open a session over any glyph backend.
    pub fn open_with_provider<P: GlyphProvider>(&self, provider: P) -> GlyphRunResult<FontSession<P>> {
        FontSession::new(provider, Arc::clone(&self.state))
    }
}
