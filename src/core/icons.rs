//! Theme-sensitive icon swapping.
//!
//! Icons ship in two files following a suffix convention (`name.svg` and
//! `name-white.svg`). [`IconManager`] records both sources for every managed
//! image and the favicon at start-up, then switches between them on theme
//! change.

use std::rc::Rc;

use crate::config::icons::{DARK_ALT_SUFFIX, WHITE_SUFFIX};
use crate::core::element::ElementHandle;
use crate::core::events::{ListenerId, ThemeBus};
use crate::models::Theme;

/// Light and dark sources of one icon.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconPair {
    pub original: String,
    pub white: String,
}

impl IconPair {
    /// Derive both variants from either one.
    ///
    /// The suffix goes before the file extension; query strings and fragments
    /// are preserved.
    pub fn from_source(src: &str) -> Self {
        let split_at = src.find(['?', '#']).unwrap_or(src.len());
        let (path, tail) = src.split_at(split_at);

        let file_start = path.rfind('/').map_or(0, |i| i + 1);
        let (stem, ext) = match path[file_start..].rfind('.') {
            Some(dot) => path.split_at(file_start + dot),
            None => (path, ""),
        };

        match stem.strip_suffix(WHITE_SUFFIX) {
            Some(base) => Self {
                original: format!("{}{}{}", base, ext, tail),
                white: src.to_string(),
            },
            None => Self {
                original: src.to_string(),
                white: format!("{}{}{}{}", stem, WHITE_SUFFIX, ext, tail),
            },
        }
    }

    pub fn for_theme(&self, theme: Theme) -> &str {
        if theme.is_dark() {
            &self.white
        } else {
            &self.original
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IconKind {
    /// `<img>`: swaps `src`, annotates `alt`.
    Image,
    /// `<link rel=icon>`: swaps `href`.
    Favicon,
}

impl IconKind {
    fn source_attribute(self) -> &'static str {
        match self {
            IconKind::Image => "src",
            IconKind::Favicon => "href",
        }
    }
}

struct ManagedIcon<E> {
    element: E,
    pair: IconPair,
    kind: IconKind,
}

pub struct IconManager<E> {
    icons: Vec<ManagedIcon<E>>,
}

impl<E: ElementHandle> IconManager<E> {
    /// Register `images` and the optional `favicon`.
    ///
    /// Elements without a source attribute are skipped.
    pub fn new(images: Vec<E>, favicon: Option<E>) -> Self {
        let candidates = images
            .into_iter()
            .map(|e| (e, IconKind::Image))
            .chain(favicon.map(|f| (f, IconKind::Favicon)));

        let icons = candidates
            .filter_map(|(element, kind)| {
                let Some(src) = element.attribute(kind.source_attribute()) else {
                    tracing::warn!(?kind, "managed icon has no source, skipping");
                    return None;
                };
                Some(ManagedIcon {
                    pair: IconPair::from_source(&src),
                    element,
                    kind,
                })
            })
            .collect::<Vec<_>>();

        tracing::debug!(count = icons.len(), "icons registered");
        Self { icons }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Point every icon at its `theme` variant. Returns how many changed.
    ///
    /// Icons already showing the right variant are left untouched. Per-icon
    /// failures are logged and skipped.
    pub fn apply(&self, theme: Theme) -> usize {
        let mut changed = 0;
        for icon in &self.icons {
            let attr = icon.kind.source_attribute();
            let target = icon.pair.for_theme(theme);
            if icon.element.attribute(attr).as_deref() == Some(target) {
                continue;
            }

            if let Err(err) = icon.element.set_attribute(attr, target) {
                tracing::warn!(src = target, error = %err, "failed to swap icon");
                continue;
            }
            changed += 1;

            if icon.kind == IconKind::Image {
                update_alt(&icon.element, theme);
            }
        }
        changed
    }

    /// Every variant URL, for cache warming.
    pub fn preload_urls(&self) -> Vec<String> {
        let mut urls = Vec::with_capacity(self.icons.len() * 2);
        for icon in &self.icons {
            for url in [&icon.pair.original, &icon.pair.white] {
                if !urls.contains(url) {
                    urls.push(url.clone());
                }
            }
        }
        urls
    }

    /// Follow theme changes for the lifetime of the bus.
    pub fn subscribe(self: &Rc<Self>, bus: &ThemeBus) -> ListenerId {
        let manager = Rc::clone(self);
        bus.subscribe(move |event| {
            manager.apply(event.theme);
            Ok(())
        })
    }
}

fn update_alt<E: ElementHandle>(element: &E, theme: Theme) {
    let Some(alt) = element.attribute("alt") else {
        return;
    };
    let next = match (theme.is_dark(), alt.strip_suffix(DARK_ALT_SUFFIX)) {
        (true, None) => format!("{}{}", alt, DARK_ALT_SUFFIX),
        (false, Some(base)) => base.to_string(),
        _ => return,
    };
    if let Err(err) = element.set_attribute("alt", &next) {
        tracing::debug!(error = %err, "failed to update icon alt text");
    }
}
