//! Carousel renders ordered decks of social-media carousel slides to fixed-size PNG images.
//!
//! Every slide is 1080x1350 and is painted in three stages on the CPU:
//!
//! - a solid color or cover-fit image background (images get a dark scrim)
//! - centered, word-wrapped bold text with a soft drop shadow
//! - an optional logo anchored to one corner
//!
//! Load a [`Deck`] (or build one with [`DeckBuilder`]), render it with a [`SlideRenderer`] and
//! write the results with [`write_pngs`]. Broken background or logo images never fail a render:
//! the slide falls back to its solid color or omits the logo.
#![forbid(unsafe_code)]

mod assets;
mod export;
mod foundation;
mod layout;
mod model;
mod render;

pub use crate::foundation::core::{
    Affine, CANVAS_HEIGHT, CANVAS_WIDTH, Canvas, LOGO_MARGIN, Point, Rect, Rgba8, Size,
    TEXT_PADDING,
};
pub use crate::foundation::error::{CarouselError, CarouselResult};

pub use crate::assets::cache::AssetCache;
pub use crate::assets::decode::{PreparedGraphic, PreparedImage, PreparedSvg};
pub use crate::assets::fonts::{FontFace, FontLibrary};
pub use crate::export::{ExportOpts, Manifest, ManifestEntry, slide_file_name, write_pngs};
pub use crate::layout::block::{PlacedLine, TextBlock};
pub use crate::layout::engine::{ShapedLine, StyledMeasurer, TextLayoutEngine, TextStyle};
pub use crate::layout::wrap::{FixedAdvance, TextMeasurer, wrap_text};
pub use crate::model::deck::Deck;
pub use crate::model::dsl::DeckBuilder;
pub use crate::model::settings::{GlobalRenderSettings, LogoPosition, LogoSettings, TextAlign};
pub use crate::model::slide::{BackgroundKind, ImageSource, SlideSpec};
pub use crate::render::background::{BackgroundOutcome, cover_rect};
pub use crate::render::batch::render_all;
pub use crate::render::canvas::SlideCanvas;
pub use crate::render::logo::{LogoOutcome, logo_rect, logo_size};
pub use crate::render::slide::{RenderStats, RenderedImage, RendererOpts, SlideRenderer};
